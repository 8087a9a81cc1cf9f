use chrono::Local;
use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

// Log destination injected into the pipeline. Constructed once in main and
// passed by reference into each component; there is no global logger.
pub trait LogSink {
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

// Timestamped lines on stderr, so stdout stays clean for the pasted result.
pub struct ConsoleSink {
    verbose: bool,
}

impl ConsoleSink {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl LogSink for ConsoleSink {
    fn log(&self, level: Level, message: &str) {
        if level == Level::Debug && !self.verbose {
            return;
        }
        eprintln!(
            "[{}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            message
        );
    }
}

// In-memory sink for tests and for callers that want to inspect what the
// pipeline reported. Single-threaded by design, hence RefCell.
#[derive(Default)]
pub struct MemorySink {
    lines: RefCell<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    pub fn contains(&self, level: Level, fragment: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(fragment))
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_levels_and_messages() {
        let sink = MemorySink::new();
        sink.info("profiling destination");
        sink.warn("unsupported dialect");
        assert!(sink.contains(Level::Info, "profiling"));
        assert!(sink.contains(Level::Warn, "unsupported"));
        assert!(!sink.contains(Level::Error, "profiling"));
        assert_eq!(sink.lines().len(), 2);
    }
}

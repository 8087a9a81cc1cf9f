use serde::Serialize;
use std::fmt;
use std::path::Path;

// Closed set of snippet dialects. Selected once at pipeline entry, either
// from the --dialect flag or from the destination file extension; every
// dialect-specific decision afterwards dispatches on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    PythonLike,
    CFamily,
    Unsupported,
}

impl Dialect {
    pub fn from_tag(tag: &str) -> Dialect {
        match tag.to_ascii_lowercase().as_str() {
            "python" | "py" => Dialect::PythonLike,
            "cfamily" | "javascript" | "typescript" | "js" | "ts" => Dialect::CFamily,
            _ => Dialect::Unsupported,
        }
    }

    pub fn from_extension(path: &Path) -> Dialect {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Dialect::PythonLike,
            Some("js") | Some("jsx") | Some("ts") | Some("tsx") | Some("mjs") | Some("cjs") => {
                Dialect::CFamily
            }
            _ => Dialect::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Dialect::Unsupported)
    }

    // Only the C-family dialect has a semicolon convention worth enforcing.
    pub fn applies_semicolon_rule(&self) -> bool {
        matches!(self, Dialect::CFamily)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::PythonLike => write!(f, "python"),
            Dialect::CFamily => write!(f, "cfamily"),
            Dialect::Unsupported => write!(f, "unsupported"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn tags_map_to_dialects() {
        assert_eq!(Dialect::from_tag("python"), Dialect::PythonLike);
        assert_eq!(Dialect::from_tag("TypeScript"), Dialect::CFamily);
        assert_eq!(Dialect::from_tag("ruby"), Dialect::Unsupported);
    }

    #[test]
    fn extensions_map_to_dialects() {
        assert_eq!(Dialect::from_extension(Path::new("a/b.py")), Dialect::PythonLike);
        assert_eq!(Dialect::from_extension(Path::new("a/b.tsx")), Dialect::CFamily);
        assert_eq!(Dialect::from_extension(Path::new("a/b.go")), Dialect::Unsupported);
        assert_eq!(Dialect::from_extension(Path::new("Makefile")), Dialect::Unsupported);
    }

    #[test]
    fn semicolon_rule_is_cfamily_only() {
        assert!(Dialect::CFamily.applies_semicolon_rule());
        assert!(!Dialect::PythonLike.applies_semicolon_rule());
        assert!(!Dialect::Unsupported.applies_semicolon_rule());
    }
}

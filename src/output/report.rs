use crate::pipeline::PasteOutcome;
use chrono::Local;
use std::path::Path;

pub trait ReportFormatter {
    fn format_outcome(&self, outcome: &PasteOutcome, dest_path: &Path) -> String;
}

// Human-readable report of one paste operation.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format_outcome(&self, outcome: &PasteOutcome, dest_path: &Path) -> String {
        let mut output = String::new();

        let now = Local::now();
        output.push_str(&format!(
            "Paste adapted at: {}\n",
            now.format("%Y-%m-%d %H:%M:%S")
        ));
        output.push_str(&format!("Destination: {}\n", dest_path.display()));
        output.push_str(&format!("Profile: {}\n", outcome.profile));
        output.push_str(&format!(
            "Adapted: {}\n\n",
            if outcome.adapted { "yes" } else { "no (original snippet kept)" }
        ));

        output.push_str("Code:\n");
        for line in outcome.code.split('\n') {
            output.push_str(&format!("  {}\n", line));
        }

        output.push_str(&format!(
            "\nImports to add ({}):\n",
            outcome.imports_to_add.len()
        ));
        for import in &outcome.imports_to_add {
            output.push_str(&format!("  {}\n", import));
        }

        output.push_str(&format!(
            "\nVersion conflicts ({}):\n",
            outcome.conflicts.len()
        ));
        for conflict in &outcome.conflicts {
            output.push_str(&format!("  {}\n", conflict));
        }

        output
    }
}

// Machine-readable report; serializes the whole outcome.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format_outcome(&self, outcome: &PasteOutcome, dest_path: &Path) -> String {
        let report = serde_json::json!({
            "timestamp": Local::now().to_rfc3339(),
            "destination": dest_path.display().to_string(),
            "outcome": outcome,
        });
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }
}

// Just the paste payload: missing imports first, then the adapted code. This
// is what lands in the destination file under --apply.
pub struct CodeFormatter;

impl ReportFormatter for CodeFormatter {
    fn format_outcome(&self, outcome: &PasteOutcome, _dest_path: &Path) -> String {
        let mut output = String::new();
        for import in &outcome.imports_to_add {
            output.push_str(import);
            output.push('\n');
        }
        output.push_str(&outcome.code);
        output
    }
}

pub fn formatter_for(format: &str) -> Box<dyn ReportFormatter> {
    match format {
        "json" => Box::new(JsonFormatter),
        "code" => Box::new(CodeFormatter),
        _ => Box::new(TextFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::models::{SnippetInfo, StyleProfile};
    use std::path::Path;

    fn outcome() -> PasteOutcome {
        PasteOutcome {
            code: "x = 1".to_string(),
            imports_to_add: vec!["import requests".to_string()],
            conflicts: Vec::new(),
            snippet: SnippetInfo::empty(Dialect::PythonLike),
            profile: StyleProfile::defaults(Dialect::PythonLike),
            adapted: true,
        }
    }

    #[test]
    fn text_report_lists_code_and_imports() {
        let report = TextFormatter.format_outcome(&outcome(), Path::new("main.py"));
        assert!(report.contains("Destination: main.py"));
        assert!(report.contains("  x = 1"));
        assert!(report.contains("Imports to add (1):"));
        assert!(report.contains("  import requests"));
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let report = JsonFormatter.format_outcome(&outcome(), Path::new("main.py"));
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["destination"], "main.py");
        assert_eq!(value["outcome"]["code"], "x = 1");
        assert_eq!(value["outcome"]["adapted"], true);
    }

    #[test]
    fn code_output_prepends_missing_imports() {
        let payload = CodeFormatter.format_outcome(&outcome(), Path::new("main.py"));
        assert_eq!(payload, "import requests\nx = 1");
    }
}

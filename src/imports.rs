use crate::analysis::snippet::extract_library_name;
use crate::logging::LogSink;
use serde::Serialize;

// How many leading destination lines are scanned for existing imports.
const IMPORT_SAMPLE: usize = 50;

// Result of import reconciliation. The code passes through untouched; the
// missing import lines carry their original snippet text verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct ImportPlan {
    pub code: String,
    pub imports_to_add: Vec<String>,
}

// Function to compute which of the snippet's imports the destination lacks.
// Comparison is by extracted library name, so differently-shaped imports of
// the same library count as present.
pub fn reconcile_imports(
    code: String,
    required_imports: &[String],
    dest_text: &str,
    log: &dyn LogSink,
) -> ImportPlan {
    let existing = existing_imports(dest_text);
    let existing_names: Vec<String> = existing
        .iter()
        .map(|import| extract_library_name(import))
        .collect();

    let mut imports_to_add = Vec::new();
    for required in required_imports {
        let name = extract_library_name(required);
        if !existing_names.contains(&name) {
            imports_to_add.push(required.clone());
        }
    }

    if imports_to_add.is_empty() {
        log.info("All snippet imports already present in the destination");
    } else {
        log.info(&format!(
            "Missing imports to add: {}",
            imports_to_add.join(", ")
        ));
    }

    ImportPlan {
        code,
        imports_to_add,
    }
}

// Import-looking lines near the top of the destination, either dialect's
// shape accepted.
fn existing_imports(dest_text: &str) -> Vec<String> {
    let mut imports = Vec::new();
    for line in dest_text.split('\n').take(IMPORT_SAMPLE) {
        let trimmed = line.trim();
        if trimmed.starts_with("import ")
            || trimmed.starts_with("from ")
            || trimmed.contains("require(")
        {
            imports.push(trimmed.to_string());
        }
    }
    imports
}

// Function to find the destination line index where new imports belong: just
// past the leading run of blank lines, comments and existing imports.
pub fn insertion_line(dest_text: &str) -> usize {
    let mut insert_at = 0;
    for (i, line) in dest_text.split('\n').enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            insert_at = i + 1;
            continue;
        }
        if trimmed.starts_with("import ")
            || trimmed.starts_with("from ")
            || trimmed.starts_with("const ")
            || trimmed.starts_with("require(")
        {
            insert_at = i + 1;
            continue;
        }
        break;
    }
    insert_at
}

// Function to build the destination document with missing imports spliced at
// the insertion point and the adapted snippet inserted before `paste_line`
// (1-based), or appended when no line is given.
pub fn splice_into_document(
    dest_text: &str,
    adapted_code: &str,
    imports_to_add: &[String],
    paste_line: Option<usize>,
) -> String {
    let mut lines: Vec<String> = dest_text.split('\n').map(|l| l.to_string()).collect();

    let import_at = insertion_line(dest_text).min(lines.len());
    let mut paste_at = match paste_line {
        Some(n) => n.saturating_sub(1).min(lines.len()),
        None => lines.len(),
    };

    for (offset, import) in imports_to_add.iter().enumerate() {
        lines.insert(import_at + offset, import.clone());
    }
    if paste_at >= import_at {
        paste_at += imports_to_add.len();
    }

    for (offset, snippet_line) in adapted_code.split('\n').enumerate() {
        lines.insert(paste_at + offset, snippet_line.to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;

    #[test]
    fn missing_imports_are_reported_verbatim() {
        let dest = "import os\n\ndef main():\n    pass\n";
        let required = vec![
            "import os".to_string(),
            "import requests".to_string(),
            "from requests import get".to_string(),
        ];
        let plan = reconcile_imports("code".to_string(), &required, dest, &MemorySink::new());
        assert_eq!(plan.code, "code");
        // `from requests import get` is missing too: only `os` is present.
        assert_eq!(
            plan.imports_to_add,
            vec!["import requests", "from requests import get"]
        );
    }

    #[test]
    fn same_library_different_import_shape_counts_as_present() {
        let dest = "from requests import post\n";
        let required = vec!["import requests".to_string()];
        let plan = reconcile_imports(String::new(), &required, dest, &MemorySink::new());
        assert!(plan.imports_to_add.is_empty());
    }

    #[test]
    fn require_imports_matched_for_cfamily_destinations() {
        let dest = "const axios = require('axios')\n";
        let required = vec!["import axios from 'axios'".to_string()];
        let plan = reconcile_imports(String::new(), &required, dest, &MemorySink::new());
        assert!(plan.imports_to_add.is_empty());
    }

    #[test]
    fn insertion_point_skips_comments_and_imports() {
        let dest = "# header\n\nimport os\nimport sys\n\ndef main():\n    pass\n";
        assert_eq!(insertion_line(dest), 5);
    }

    #[test]
    fn insertion_point_of_importless_file_is_top() {
        assert_eq!(insertion_line("def main():\n    pass\n"), 0);
    }

    #[test]
    fn splice_adds_imports_then_snippet_at_end() {
        let dest = "import os\n\ndef main():\n    pass\n";
        let merged = splice_into_document(
            dest,
            "def extra():\n    return 1",
            &["import requests".to_string()],
            None,
        );
        // The leading run of imports and blanks is skipped before splicing.
        assert_eq!(
            merged,
            "import os\n\nimport requests\ndef main():\n    pass\n\ndef extra():\n    return 1"
        );
    }

    #[test]
    fn splice_honors_an_explicit_paste_line() {
        let dest = "a\nb\nc";
        let merged = splice_into_document(dest, "X", &[], Some(2));
        assert_eq!(merged, "a\nX\nb\nc");
    }
}

use crate::dialect::Dialect;
use crate::logging::LogSink;
use crate::models::{FunctionDecl, LibraryRef, SnippetInfo};
use regex::Regex;
use std::sync::LazyLock;

// Python-like patterns
static PY_IMPORT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^import\s+(\w+)").unwrap());
static PY_FROM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^from\s+(\w+)\s+import").unwrap());
static PY_DEF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^def\s+(\w+)\s*\(").unwrap());

// C-family patterns
static JS_FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"from\s+['"]([^'"]+)['"]"#).unwrap());
static JS_REQUIRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());
static JS_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:function\s+(\w+)|(\w+)\s*[=:]\s*(?:function\b|\())").unwrap());

// Either dialect's library-name extraction, tried in order. Used both here
// and by the import reconciler, which has no dialect-tagged input per line.
static ANY_PY_LIBRARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:import|from)\s+(\w+)").unwrap());
static ANY_JS_LIBRARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"from\s+['"]([^'"]+)['"]|require\s*\(\s*['"]([^'"]+)['"]"#).unwrap()
});

impl Dialect {
    // Import-statement lines of the snippet, trimmed, in order of appearance.
    pub fn extract_imports(&self, code: &str) -> Vec<String> {
        let mut imports = Vec::new();
        for line in code.split('\n') {
            let trimmed = line.trim();
            if self.is_import_line(trimmed) {
                imports.push(trimmed.to_string());
            }
        }
        imports
    }

    pub fn is_import_line(&self, trimmed: &str) -> bool {
        match self {
            Dialect::PythonLike => {
                trimmed.starts_with("import ") || trimmed.starts_with("from ")
            }
            Dialect::CFamily => trimmed.starts_with("import ") || trimmed.contains("require("),
            Dialect::Unsupported => false,
        }
    }

    // Top-level function declarations, name only. Parameters, line and column
    // are left unpopulated.
    pub fn extract_functions(&self, code: &str) -> Vec<FunctionDecl> {
        let mut functions = Vec::new();
        for line in code.split('\n') {
            let trimmed = line.trim();
            let name = match self {
                Dialect::PythonLike => PY_DEF
                    .captures(trimmed)
                    .map(|c| c[1].to_string()),
                Dialect::CFamily => JS_FUNCTION.captures(trimmed).and_then(|c| {
                    c.get(1).or_else(|| c.get(2)).map(|m| m.as_str().to_string())
                }),
                Dialect::Unsupported => None,
            };
            if let Some(name) = name {
                functions.push(FunctionDecl {
                    name,
                    line: 0,
                    column: 0,
                });
            }
        }
        functions
    }

    fn extract_library(&self, import_statement: &str) -> Option<LibraryRef> {
        let name = match self {
            Dialect::PythonLike => PY_IMPORT
                .captures(import_statement)
                .or_else(|| PY_FROM.captures(import_statement))
                .map(|c| c[1].to_string()),
            Dialect::CFamily => JS_FROM
                .captures(import_statement)
                .or_else(|| JS_REQUIRE.captures(import_statement))
                .map(|c| c[1].to_string()),
            Dialect::Unsupported => None,
        }?;
        Some(LibraryRef {
            name,
            // Imports carry no version information; the auditor only ever
            // sees a snippet-side version if some future scanner supplies it.
            version: None,
            import_statement: import_statement.to_string(),
        })
    }
}

// Library name from an import statement, trying the Python-like pattern first
// and the C-family pattern second. Empty when neither matches.
pub fn extract_library_name(import_statement: &str) -> String {
    if let Some(capture) = ANY_PY_LIBRARY.captures(import_statement) {
        return capture[1].to_string();
    }
    if let Some(capture) = ANY_JS_LIBRARY.captures(import_statement) {
        if let Some(m) = capture.get(1).or_else(|| capture.get(2)) {
            return m.as_str().to_string();
        }
    }
    String::new()
}

// Function to scan the pasted text for imports, referenced libraries and
// function declarations. Unsupported dialects yield an empty result with a
// warning; that is a degraded mode, not an error.
pub fn analyze_snippet(code: &str, dialect: Dialect, log: &dyn LogSink) -> SnippetInfo {
    if !dialect.is_supported() {
        log.warn("Unsupported dialect; snippet scan skipped");
        return SnippetInfo::empty(dialect);
    }

    let mut info = SnippetInfo::empty(dialect);
    info.required_imports = dialect.extract_imports(code);
    for import in &info.required_imports {
        if let Some(library) = dialect.extract_library(import) {
            info.libraries.push(library);
        }
    }
    info.functions = dialect.extract_functions(code);

    log.info(&format!(
        "Snippet scanned: {} imports, {} libraries, {} functions",
        info.required_imports.len(),
        info.libraries.len(),
        info.functions.len()
    ));
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{Level, MemorySink};

    #[test]
    fn python_imports_and_functions_extracted() {
        let code = "import requests\nfrom collections import OrderedDict\n\ndef fetch_data(url):\n    return url\n";
        let info = analyze_snippet(code, Dialect::PythonLike, &MemorySink::new());
        assert_eq!(
            info.required_imports,
            vec!["import requests", "from collections import OrderedDict"]
        );
        let names: Vec<&str> = info.libraries.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["requests", "collections"]);
        assert_eq!(info.functions.len(), 1);
        assert_eq!(info.functions[0].name, "fetch_data");
    }

    #[test]
    fn cfamily_imports_cover_es_and_require_forms() {
        let code = "import { get } from 'axios'\nconst fs = require('fs')\n\nfunction run() {}\nconst handler = (req) => req\n";
        let info = analyze_snippet(code, Dialect::CFamily, &MemorySink::new());
        assert_eq!(info.required_imports.len(), 2);
        let names: Vec<&str> = info.libraries.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["axios", "fs"]);
        let functions: Vec<&str> = info.functions.iter().map(|f| f.name.as_str()).collect();
        assert!(functions.contains(&"run"));
        assert!(functions.contains(&"handler"));
    }

    #[test]
    fn snippet_libraries_never_carry_a_version() {
        let info = analyze_snippet("import requests\n", Dialect::PythonLike, &MemorySink::new());
        assert!(info.libraries.iter().all(|l| l.version.is_none()));
    }

    #[test]
    fn unsupported_dialect_warns_and_returns_empty() {
        let sink = MemorySink::new();
        let info = analyze_snippet("import foo\n", Dialect::Unsupported, &sink);
        assert!(info.required_imports.is_empty());
        assert!(info.functions.is_empty());
        assert!(sink.contains(Level::Warn, "Unsupported dialect"));
    }

    #[test]
    fn library_name_extraction_tries_both_patterns() {
        assert_eq!(extract_library_name("import numpy as np"), "numpy");
        assert_eq!(extract_library_name("from requests import get"), "requests");
        assert_eq!(extract_library_name("import x from 'lodash'"), "x");
        assert_eq!(extract_library_name("const _ = require('lodash')"), "lodash");
        assert_eq!(extract_library_name("let a = 1"), "");
    }
}

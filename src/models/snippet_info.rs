use crate::dialect::Dialect;
use serde::Serialize;
use std::fmt;

// Structure to store information about a library referenced by the snippet
#[derive(Debug, Clone, Serialize)]
pub struct LibraryRef {
    pub name: String,             // Library name as it appears in the import
    pub version: Option<String>,  // Version implied by the snippet, if any
    pub import_statement: String, // The raw import line that referenced it
}

impl fmt::Display for LibraryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} ({}): {}", self.name, version, self.import_statement),
            None => write!(f, "{}: {}", self.name, self.import_statement),
        }
    }
}

// Structure to store information about a top-level function declaration.
// Line and column are placeholders; nothing downstream consumes them yet.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDecl {
    pub name: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for FunctionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.name, self.line, self.column)
    }
}

// Everything the snippet scan learned about the pasted text. Read-only once
// built; the transcoding passes never feed back into it.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetInfo {
    pub required_imports: Vec<String>,
    pub libraries: Vec<LibraryRef>,
    pub functions: Vec<FunctionDecl>,
    pub dialect: Dialect,
}

impl SnippetInfo {
    pub fn empty(dialect: Dialect) -> Self {
        Self {
            required_imports: Vec::new(),
            libraries: Vec::new(),
            functions: Vec::new(),
            dialect,
        }
    }
}

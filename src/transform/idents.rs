use crate::logging::LogSink;
use crate::models::{Casing, StyleProfile};
use crate::pipeline::StageError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// Maximal identifier-shaped tokens. Matches inside strings and comments too;
// the pass is line-local with no notion of lexical context.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());

// Union of the Python and JS/TS keyword lists, protected regardless of the
// active dialect. A reserved word is never rewritten.
static KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let python = [
        "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else",
        "except", "exec", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "not", "or", "pass", "print", "raise", "return", "try", "while", "with",
        "yield", "True", "False", "None",
    ];
    let js = [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default",
        "delete", "do", "else", "export", "extends", "false", "finally", "for", "function",
        "if", "import", "in", "instanceof", "let", "new", "null", "return", "super",
        "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void",
        "while", "with", "yield", "async", "await",
    ];
    python.iter().chain(js.iter()).copied().collect()
});

// Function to classify a token's casing convention. None means the token
// satisfies no predicate and is treated as a single opaque part.
pub fn detect_casing(token: &str) -> Option<Casing> {
    let mut chars = token.chars();
    let first = chars.next()?;
    let alnum = token.chars().all(|c| c.is_ascii_alphanumeric());
    let has_upper = token.chars().any(|c| c.is_ascii_uppercase());

    if first.is_ascii_lowercase() && alnum && has_upper {
        Some(Casing::Camel)
    } else if first.is_ascii_lowercase()
        && token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && token.contains('_')
    {
        Some(Casing::Snake)
    } else if first.is_ascii_uppercase() && alnum {
        Some(Casing::Pascal)
    } else {
        None
    }
}

// Split a token into sub-word parts according to its detected casing.
fn split_parts(token: &str, casing: Option<Casing>) -> Vec<String> {
    match casing {
        Some(Casing::Camel) | Some(Casing::Pascal) => {
            let mut parts = Vec::new();
            let mut current = String::new();
            for c in token.chars() {
                if c.is_ascii_uppercase() && !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
                current.push(c);
            }
            if !current.is_empty() {
                parts.push(current);
            }
            parts
        }
        Some(Casing::Snake) => token
            .split('_')
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect(),
        None => vec![token.to_string()],
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

impl Casing {
    // Rejoin sub-word parts under this convention.
    pub fn join(&self, parts: &[String]) -> String {
        if parts.is_empty() {
            return String::new();
        }
        match self {
            Casing::Camel => {
                let mut joined = parts[0].to_ascii_lowercase();
                for part in &parts[1..] {
                    joined.push_str(&capitalize(&part.to_ascii_lowercase()));
                }
                joined
            }
            Casing::Snake => parts
                .iter()
                .map(|p| p.to_ascii_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
            Casing::Pascal => parts
                .iter()
                .map(|p| capitalize(&p.to_ascii_lowercase()))
                .collect(),
        }
    }
}

// Convert a single token to the target convention. Tokens already in the
// target convention come back unchanged.
pub fn convert_token(token: &str, target: Casing) -> String {
    let current = detect_casing(token);
    if current == Some(target) {
        return token.to_string();
    }
    target.join(&split_parts(token, current))
}

// Function to rewrite every eligible identifier in the text to the profiled
// casing. Replacement is per line, whole-word, by exact literal match; no
// symbol table is kept across lines.
pub fn transcode_identifiers(
    code: &str,
    profile: &StyleProfile,
    log: &dyn LogSink,
) -> Result<String, StageError> {
    let target = profile.identifier_casing;
    log.info(&format!("Renaming identifiers to {}", target));

    let mut converted_lines = Vec::new();
    for line in code.split('\n') {
        let mut converted_line = line.to_string();
        for token_match in TOKEN.find_iter(line) {
            let token = token_match.as_str();
            if KEYWORDS.contains(token) {
                continue;
            }
            let converted = convert_token(token, target);
            if converted != token {
                let pattern = format!(r"\b{}\b", regex::escape(token));
                let word = Regex::new(&pattern).map_err(|source| StageError::Pattern {
                    token: token.to_string(),
                    source,
                })?;
                converted_line = word
                    .replace_all(&converted_line, converted.as_str())
                    .into_owned();
            }
        }
        converted_lines.push(converted_line);
    }

    Ok(converted_lines.join("\n"))
}

use crate::logging::LogSink;
use crate::models::{QuoteStyle, StyleProfile};
use crate::pipeline::StageError;
use regex::Regex;
use std::sync::LazyLock;

// Contiguous quoted runs per delimiter. Not literal-aware: a delimiter inside
// a comment or inside the other quote style gets rewritten as well, and
// escaped delimiters terminate a run early.
static DOUBLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]*)""#).unwrap());
static SINGLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*)'").unwrap());

// Statement-like lines containing these fragments never get a semicolon
// appended.
const CONTROL_FLOW: [&str; 4] = ["if ", "for ", "while ", "else"];

// Function to rewrite indentation, quotes and semicolons to the profiled
// conventions. Each pass consumes the previous pass's full output.
pub fn transcode_style(
    code: &str,
    profile: &StyleProfile,
    log: &dyn LogSink,
) -> Result<String, StageError> {
    log.info("Adapting snippet style");

    let mut adapted = adapt_indentation(code, profile);
    adapted = adapt_quotes(&adapted, profile);
    if profile.dialect.applies_semicolon_rule() {
        adapted = adapt_semicolons(&adapted, profile);
    }

    Ok(adapted)
}

// Re-emit each line at its current indent level in the destination's unit.
// Tab-led whitespace counts one level per character; space-led whitespace
// assumes the common 4-spaces-per-level layout. Blank lines come out empty.
fn adapt_indentation(code: &str, profile: &StyleProfile) -> String {
    let unit = profile.indent_unit();
    let mut adapted_lines = Vec::new();

    for line in code.split('\n') {
        if line.trim().is_empty() {
            adapted_lines.push(String::new());
            continue;
        }

        let trimmed_start = line.trim_start();
        let leading = &line[..line.len() - trimmed_start.len()];
        let level = if leading.contains('\t') {
            leading.chars().count()
        } else {
            leading.len() / 4
        };

        adapted_lines.push(unit.repeat(level) + line.trim());
    }

    adapted_lines.join("\n")
}

// One global substitution swapping runs delimited by the non-target quote to
// the target quote. Greedy within a line segment and unaware of nesting.
fn adapt_quotes(code: &str, profile: &StyleProfile) -> String {
    let target = profile.quotes.delimiter();
    let replacement = format!("{target}${{1}}{target}");
    match profile.quotes.opposite() {
        QuoteStyle::Double => DOUBLE_QUOTED.replace_all(code, replacement.as_str()),
        QuoteStyle::Single => SINGLE_QUOTED.replace_all(code, replacement.as_str()),
    }
    .into_owned()
}

// Append or strip a single trailing semicolon per statement-like line.
// Multi-line statements, chained calls and operator-ending lines will be
// under- or over-adjusted; the pass is strictly line-local.
fn adapt_semicolons(code: &str, profile: &StyleProfile) -> String {
    let mut adapted_lines = Vec::new();

    for line in code.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with("/*") {
            adapted_lines.push(line.to_string());
            continue;
        }

        if profile.semicolons {
            let exempt = trimmed.ends_with(';')
                || trimmed.ends_with('{')
                || trimmed.ends_with('}')
                || CONTROL_FLOW.iter().any(|kw| trimmed.contains(kw));
            if exempt {
                adapted_lines.push(line.to_string());
            } else {
                adapted_lines.push(line.trim_end().to_string() + ";");
            }
        } else if trimmed.ends_with(';') {
            adapted_lines.push(line.strip_suffix(';').unwrap_or(line).to_string());
        } else {
            adapted_lines.push(line.to_string());
        }
    }

    adapted_lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::logging::MemorySink;
    use crate::models::Indentation;

    fn adapt(code: &str, profile: &StyleProfile) -> String {
        transcode_style(code, profile, &MemorySink::new()).unwrap()
    }

    fn cfamily_profile() -> StyleProfile {
        StyleProfile::defaults(Dialect::CFamily)
    }

    #[test]
    fn eight_spaces_become_two_levels_of_the_target_unit() {
        let mut profile = StyleProfile::defaults(Dialect::PythonLike);
        profile.indentation = Indentation::Spaces;
        profile.indent_size = 2;
        let out = adapt("        x = 1", &profile);
        assert_eq!(out, "    x = 1");
    }

    #[test]
    fn tab_indent_maps_one_level_per_character() {
        let mut profile = cfamily_profile();
        profile.indentation = Indentation::Spaces;
        profile.indent_size = 4;
        profile.quotes = QuoteStyle::Single;
        profile.semicolons = false;
        let out = adapt("\t\treturn x", &profile);
        assert_eq!(out, "        return x");
    }

    #[test]
    fn blank_lines_come_out_empty() {
        let profile = StyleProfile::defaults(Dialect::PythonLike);
        let out = adapt("x = 1\n   \ny = 2", &profile);
        assert_eq!(out, "x = 1\n\ny = 2");
    }

    #[test]
    fn quotes_rewritten_to_single_target() {
        let mut profile = StyleProfile::defaults(Dialect::PythonLike);
        profile.quotes = QuoteStyle::Single;
        let out = adapt(r#"name = "alice""#, &profile);
        assert_eq!(out, "name = 'alice'");
    }

    #[test]
    fn quote_style_round_trips_on_simple_strings() {
        let original = "greet('hello')\nfarewell('bye')";
        let mut profile = StyleProfile::defaults(Dialect::PythonLike);
        profile.quotes = QuoteStyle::Double;
        let doubled = adapt(original, &profile);
        assert_eq!(doubled, "greet(\"hello\")\nfarewell(\"bye\")");
        profile.quotes = QuoteStyle::Single;
        assert_eq!(adapt(&doubled, &profile), original);
    }

    #[test]
    fn semicolons_appended_when_profile_requires_them() {
        let mut profile = cfamily_profile();
        profile.semicolons = true;
        let out = adapt("const a = 1\nif (a) {\n}\nb = 2", &profile);
        assert_eq!(out, "const a = 1;\nif (a) {\n}\nb = 2;");
    }

    #[test]
    fn control_flow_lines_are_exempt_from_appending() {
        let mut profile = cfamily_profile();
        profile.semicolons = true;
        let out = adapt("while (x) doWork()\nelse fallback()", &profile);
        assert_eq!(out, "while (x) doWork()\nelse fallback()");
    }

    #[test]
    fn semicolons_stripped_when_profile_forbids_them() {
        let mut profile = cfamily_profile();
        profile.semicolons = false;
        let out = adapt("const a = 1;\nconst b = 2", &profile);
        assert_eq!(out, "const a = 1\nconst b = 2");
    }

    #[test]
    fn comment_lines_never_gain_semicolons() {
        let mut profile = cfamily_profile();
        profile.semicolons = true;
        let out = adapt("// setup\nconst a = 1", &profile);
        assert_eq!(out, "// setup\nconst a = 1;");
    }

    #[test]
    fn python_dialect_skips_the_semicolon_pass() {
        let mut profile = StyleProfile::defaults(Dialect::PythonLike);
        profile.semicolons = true;
        let out = adapt("x = 1", &profile);
        assert_eq!(out, "x = 1");
    }
}

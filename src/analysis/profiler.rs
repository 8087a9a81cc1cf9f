use crate::dialect::Dialect;
use crate::logging::LogSink;
use crate::models::{Casing, Indentation, QuoteStyle, StyleProfile};
use crate::transform::idents::detect_casing;
use regex::Regex;
use std::sync::LazyLock;

// Sampling windows over the destination file. Indentation and naming get a
// deeper sample than the punctuation signals.
const STRUCTURE_SAMPLE: usize = 100;
const PUNCTUATION_SAMPLE: usize = 50;

// Candidate identifier followed by `=` or `:`, i.e. something being assigned
// or annotated. Not assignment-aware; `==` comparisons vote too.
static ASSIGNED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z_][A-Za-z0-9_]*)\s*[=:]").unwrap());

// Function to profile the destination file's conventions. Always returns a
// fully populated profile; fields with no signal keep their defaults.
pub fn profile_document(text: &str, dialect: Dialect, log: &dyn LogSink) -> StyleProfile {
    let mut profile = StyleProfile::defaults(dialect);
    let lines: Vec<&str> = text.split('\n').collect();

    let (indentation, indent_size) = detect_indentation(&lines);
    profile.indentation = indentation;
    profile.indent_size = indent_size;
    profile.identifier_casing = detect_identifier_casing(&lines);
    profile.quotes = detect_quote_style(&lines);

    if dialect.applies_semicolon_rule() {
        profile.semicolons = detect_semicolon_usage(&lines);
        profile.trailing_commas = detect_trailing_commas(&lines);
    }

    log.info(&format!("Destination style profiled: {}", profile));
    profile
}

// Majority vote between tab-led and space-led lines. The space unit is the
// smallest leading run observed, capped at 4, biasing toward the smallest
// consistent unit rather than the most common one.
fn detect_indentation(lines: &[&str]) -> (Indentation, usize) {
    let mut tab_count = 0usize;
    let mut space_count = 0usize;
    let mut space_size = 4usize;

    for line in lines.iter().take(STRUCTURE_SAMPLE) {
        if line.starts_with('\t') {
            tab_count += 1;
        } else if line.starts_with(' ') {
            space_count += 1;
            let run = line.chars().take_while(|c| *c == ' ').count();
            if run < space_size {
                space_size = run;
            }
        }
    }

    let unit = if tab_count > space_count {
        Indentation::Tabs
    } else {
        Indentation::Spaces
    };
    (unit, space_size)
}

// Vote on identifier casing over assignment-like sites. Names matching none
// of the three predicates are excluded from the vote; camelCase wins ties.
fn detect_identifier_casing(lines: &[&str]) -> Casing {
    let mut camel = 0usize;
    let mut snake = 0usize;
    let mut pascal = 0usize;

    for line in lines.iter().take(STRUCTURE_SAMPLE) {
        for capture in ASSIGNED_NAME.captures_iter(line) {
            match detect_casing(&capture[1]) {
                Some(Casing::Camel) => camel += 1,
                Some(Casing::Snake) => snake += 1,
                Some(Casing::Pascal) => pascal += 1,
                None => {}
            }
        }
    }

    if snake > camel && snake > pascal {
        Casing::Snake
    } else if pascal > camel {
        Casing::Pascal
    } else {
        Casing::Camel
    }
}

// Raw character count, not quote-pair aware. Double wins ties.
fn detect_quote_style(lines: &[&str]) -> QuoteStyle {
    let mut single = 0usize;
    let mut double = 0usize;

    for line in lines.iter().take(PUNCTUATION_SAMPLE) {
        single += line.matches('\'').count();
        double += line.matches('"').count();
    }

    if single > double {
        QuoteStyle::Single
    } else {
        QuoteStyle::Double
    }
}

fn detect_semicolon_usage(lines: &[&str]) -> bool {
    let mut with_semicolon = 0usize;
    let mut total = 0usize;

    for line in lines.iter().take(PUNCTUATION_SAMPLE) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with("/*") {
            continue;
        }
        total += 1;
        if trimmed.ends_with(';') {
            with_semicolon += 1;
        }
    }

    total > 0 && with_semicolon * 2 > total
}

// For every line closing a block or array, check whether the previous line
// left a trailing comma.
fn detect_trailing_commas(lines: &[&str]) -> bool {
    let mut trailing = 0usize;
    let mut closers = 0usize;

    for (i, line) in lines.iter().enumerate().take(PUNCTUATION_SAMPLE) {
        let trimmed = line.trim();
        if trimmed.ends_with('}') || trimmed.ends_with(']') {
            closers += 1;
            if i > 0 && lines[i - 1].trim().ends_with(',') {
                trailing += 1;
            }
        }
    }

    closers > 0 && trailing * 2 > closers
}

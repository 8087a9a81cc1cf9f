use crate::dialect::Dialect;
use serde::Serialize;
use std::fmt;

// Indentation unit preferred by the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Indentation {
    Tabs,
    Spaces,
}

// Identifier casing convention. Detection predicates and conversion live in
// transform::idents; profiling votes with the same predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Casing {
    #[serde(rename = "camelCase")]
    Camel,
    #[serde(rename = "snake_case")]
    Snake,
    #[serde(rename = "PascalCase")]
    Pascal,
}

impl fmt::Display for Casing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Casing::Camel => write!(f, "camelCase"),
            Casing::Snake => write!(f, "snake_case"),
            Casing::Pascal => write!(f, "PascalCase"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    pub fn delimiter(&self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }

    // The quote character a transcoding pass rewrites away from.
    pub fn opposite(&self) -> QuoteStyle {
        match self {
            QuoteStyle::Single => QuoteStyle::Double,
            QuoteStyle::Double => QuoteStyle::Single,
        }
    }
}

// Structure to store the conventions profiled from the destination file.
// Built once per paste operation and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct StyleProfile {
    pub indentation: Indentation,
    pub indent_size: usize,
    pub identifier_casing: Casing,
    pub quotes: QuoteStyle,
    pub semicolons: bool,
    pub trailing_commas: bool,
    pub dialect: Dialect,
}

impl StyleProfile {
    // Baseline profile used before any signal is read, and kept for fields
    // whose detection finds nothing to vote on.
    pub fn defaults(dialect: Dialect) -> Self {
        Self {
            indentation: Indentation::Spaces,
            indent_size: 4,
            identifier_casing: Casing::Camel,
            quotes: QuoteStyle::Single,
            semicolons: true,
            trailing_commas: false,
            dialect,
        }
    }

    pub fn indent_unit(&self) -> String {
        match self.indentation {
            Indentation::Tabs => "\t".to_string(),
            Indentation::Spaces => " ".repeat(self.indent_size),
        }
    }
}

impl fmt::Display for StyleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = match self.indentation {
            Indentation::Tabs => "tabs".to_string(),
            Indentation::Spaces => format!("{} spaces", self.indent_size),
        };
        write!(
            f,
            "indent: {}, naming: {}, quotes: {}, semicolons: {}, trailing commas: {}",
            indent,
            self.identifier_casing,
            match self.quotes {
                QuoteStyle::Single => "single",
                QuoteStyle::Double => "double",
            },
            self.semicolons,
            self.trailing_commas
        )
    }
}

use crate::analysis::profiler::profile_document;
use crate::analysis::snippet::analyze_snippet;
use crate::dialect::Dialect;
use crate::imports::{reconcile_imports, ImportPlan};
use crate::logging::LogSink;
use crate::models::{SnippetInfo, StyleProfile, VersionConflict};
use crate::transform::idents::transcode_identifiers;
use crate::transform::style::transcode_style;
use crate::versions::audit_versions;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

// Typed failure reason for a transcoding stage. Stages report rather than
// recover; the pipeline driver alone decides what to do with a failure.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("replacement pattern for `{token}` failed: {source}")]
    Pattern {
        token: String,
        source: regex::Error,
    },
}

// Everything one paste operation produced. Value object, discarded after the
// result is rendered or applied.
#[derive(Debug, Clone, Serialize)]
pub struct PasteOutcome {
    pub code: String,
    pub imports_to_add: Vec<String>,
    pub conflicts: Vec<VersionConflict>,
    pub snippet: SnippetInfo,
    pub profile: StyleProfile,
    // False when the snippet passed through untouched, either because the
    // dialect is unsupported or because a transform stage failed.
    pub adapted: bool,
}

// Function to run one paste operation end to end: profile the destination,
// scan the snippet, transcode style then identifiers, reconcile imports and
// audit versions. Fail-soft: a stage failure falls back to the original
// snippet text, never to an error for the caller.
pub fn run(
    snippet_text: &str,
    dest_text: &str,
    dialect: Dialect,
    project_root: Option<&Path>,
    log: &dyn LogSink,
) -> PasteOutcome {
    let profile = profile_document(dest_text, dialect, log);
    let snippet = analyze_snippet(snippet_text, dialect, log);

    if !dialect.is_supported() {
        log.warn("Dialect not supported; pasting the snippet unchanged");
        return PasteOutcome {
            code: snippet_text.to_string(),
            imports_to_add: Vec::new(),
            conflicts: Vec::new(),
            snippet,
            profile,
            adapted: false,
        };
    }

    log.debug(&format!(
        "Snippet functions: {}",
        snippet
            .functions
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    let (code, adapted) = match transcode_style(snippet_text, &profile, log)
        .and_then(|styled| {
            log.debug(&format!("Style pass output: {} bytes", styled.len()));
            transcode_identifiers(&styled, &profile, log)
        }) {
        Ok(code) => (code, true),
        Err(error) => {
            log.error(&format!(
                "Transform failed, falling back to the original snippet: {error}"
            ));
            (snippet_text.to_string(), false)
        }
    };

    let ImportPlan {
        code,
        imports_to_add,
    } = reconcile_imports(code, &snippet.required_imports, dest_text, log);

    let conflicts = match project_root {
        Some(root) => audit_versions(&snippet.libraries, root, log),
        None => {
            log.warn("No project root found; skipping the version audit");
            Vec::new()
        }
    };

    PasteOutcome {
        code,
        imports_to_add,
        conflicts,
        snippet,
        profile,
        adapted,
    }
}

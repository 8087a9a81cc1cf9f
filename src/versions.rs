use crate::logging::LogSink;
use crate::models::{LibraryRef, VersionConflict};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const JSON_MANIFEST: &str = "package.json";
pub const FLAT_MANIFEST: &str = "requirements.txt";

// `name<comparator>version` entries in the flat-text manifest.
static FLAT_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9_-]+)([>=<~!]+)(.+)$").unwrap());

// Function to find the nearest ancestor directory holding a dependency
// manifest, starting from the destination file's directory.
pub fn find_project_root(start_dir: &Path) -> Option<PathBuf> {
    if start_dir.join(JSON_MANIFEST).exists() || start_dir.join(FLAT_MANIFEST).exists() {
        return Some(start_dir.to_path_buf());
    }
    let parent = start_dir.parent()?;
    find_project_root(parent)
}

// Function to compare the snippet's library references against the project's
// declared dependency versions. Advisory only: the result is a list of
// incompatibilities for display, and a missing manifest means zero conflicts.
pub fn audit_versions(
    libraries: &[LibraryRef],
    project_root: &Path,
    log: &dyn LogSink,
) -> Vec<VersionConflict> {
    let mut conflicts = Vec::new();

    let json_path = project_root.join(JSON_MANIFEST);
    if json_path.exists() {
        conflicts.extend(check_json_manifest(libraries, &json_path, log));
    }

    let flat_path = project_root.join(FLAT_MANIFEST);
    if flat_path.exists() {
        conflicts.extend(check_flat_manifest(libraries, &flat_path, log));
    }

    if !conflicts.is_empty() {
        log.warn(&format!(
            "Potential version conflicts detected: {}",
            conflicts
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        ));
    }

    conflicts
}

// JSON manifest: a single object with optional `dependencies` and
// `devDependencies` maps of name to version-range string, merged.
fn check_json_manifest(
    libraries: &[LibraryRef],
    path: &Path,
    log: &dyn LogSink,
) -> Vec<VersionConflict> {
    let manifest: Value = match fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
    {
        Ok(value) => value,
        Err(error) => {
            log.error(&format!("Failed to read {}: {}", path.display(), error));
            return Vec::new();
        }
    };

    let mut installed = HashMap::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(map) = manifest.get(section).and_then(|v| v.as_object()) {
            for (name, version) in map {
                if let Some(version) = version.as_str() {
                    installed.insert(name.clone(), version.to_string());
                }
            }
        }
    }

    collect_conflicts(libraries, &installed)
}

// Flat-text manifest: one `name<op>version` entry per line, `#` comments and
// blank lines skipped. Unparseable lines are ignored.
fn check_flat_manifest(
    libraries: &[LibraryRef],
    path: &Path,
    log: &dyn LogSink,
) -> Vec<VersionConflict> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            log.error(&format!("Failed to read {}: {}", path.display(), error));
            return Vec::new();
        }
    };

    let mut installed = HashMap::new();
    for line in content.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(capture) = FLAT_ENTRY.captures(trimmed) {
            installed.insert(capture[1].to_string(), capture[3].to_string());
        }
    }

    collect_conflicts(libraries, &installed)
}

// A conflict needs both sides of the comparison: a snippet-side version and
// an installed version. Libraries lacking either are skipped.
fn collect_conflicts(
    libraries: &[LibraryRef],
    installed: &HashMap<String, String>,
) -> Vec<VersionConflict> {
    let mut conflicts = Vec::new();
    for library in libraries {
        let (Some(required), Some(installed_version)) =
            (&library.version, installed.get(&library.name))
        else {
            continue;
        };
        if !versions_compatible(required, installed_version) {
            conflicts.push(VersionConflict {
                library: library.name.clone(),
                required_version: required.clone(),
                installed_version: installed_version.clone(),
                compatible: false,
            });
        }
    }
    conflicts
}

// Major.minor comparison, patch ignored: compatible iff the majors match and
// the required minor is not newer than the installed one.
pub fn versions_compatible(required: &str, installed: &str) -> bool {
    let (req_major, req_minor, _) = parse_version(required);
    let (inst_major, inst_minor, _) = parse_version(installed);
    req_major == inst_major && req_minor <= inst_minor
}

// Strip range operators and anything else non-numeric, then split on dots.
// Missing or unparseable components read as zero.
fn parse_version(version: &str) -> (u64, u64, u64) {
    let clean: String = version
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let mut parts = clean.split('.').map(|p| p.parse::<u64>().unwrap_or(0));
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

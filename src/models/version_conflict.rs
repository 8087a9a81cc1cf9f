use serde::Serialize;
use std::fmt;

// Structure to store a version mismatch between the snippet and the manifest.
// Advisory only; produced for display and discarded with the operation.
#[derive(Debug, Clone, Serialize)]
pub struct VersionConflict {
    pub library: String,
    pub required_version: String,
    pub installed_version: String,
    pub compatible: bool,
}

impl fmt::Display for VersionConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: requires {}, installed {}",
            self.library, self.required_version, self.installed_version
        )
    }
}

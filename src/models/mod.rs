pub mod snippet_info;
pub mod style_profile;
pub mod version_conflict;

pub use snippet_info::*;
pub use style_profile::*;
pub use version_conflict::*;

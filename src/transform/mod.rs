pub mod idents;
pub mod style;

pub use idents::*;
pub use style::*;

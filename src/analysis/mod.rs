pub mod profiler;
pub mod snippet;

pub use profiler::*;
pub use snippet::*;

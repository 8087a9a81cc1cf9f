pub mod analysis;
pub mod args;
pub mod dialect;
pub mod imports;
pub mod logging;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod transform;
pub mod versions;

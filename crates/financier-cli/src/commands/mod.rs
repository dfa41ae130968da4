//! CLI command implementations
//!
//! - `analyze` - Load, validate and aggregate a data file, then write the
//!   report, chart data and dashboard
//! - `output` - Output directory and snapshot file naming

pub mod analyze;
pub mod output;

// Re-export command functions for main.rs
pub use analyze::*;
pub use output::*;

//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod decode;
pub mod models;
pub mod stats;
pub mod utils;

// Re-export main command functions
pub use decode::{execute_decode, validate_args};
pub use models::{DecodeArgs, StatsArgs};
pub use stats::execute_stats;
pub use utils::{display_schema, display_version, validate_report_file};

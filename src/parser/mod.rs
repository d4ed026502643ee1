//! Trace input loading and report schema definitions.
//!
//! This module handles:
//! - Reading serialized records from JSON files or stdin
//! - Classifying the runtime fault reported alongside a trace
//! - Defining output schema

pub mod input;
pub mod schema;
pub mod trap;

// Re-export main types
pub use input::{load_input, parse_input, SimulationResponse, TraceInput};
pub use schema::{to_report, CallFrameReport, HotPath, TraceReport};
pub use trap::{classify_trap, Trap, TrapKind};

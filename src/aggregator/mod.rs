//! Aggregation of call trees into collapsed stacks and statistics.
//!
//! This module transforms reconstructed call trees into:
//! - Collapsed stack format (for flamegraph generation)
//! - Hot path analysis (frames with the most events)
//! - Per-contract cost ranking

pub mod metrics;
pub mod stack_builder;
pub mod stats;

// Re-export main types and functions
pub use metrics::{calculate_event_distribution, calculate_hot_paths, EventDistribution};
pub use stack_builder::{build_collapsed_stacks, CollapsedStack};
pub use stats::{build_contract_stats, top_contract_stats, ContractStat};

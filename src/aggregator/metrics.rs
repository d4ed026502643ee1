//! Calculate hot paths and event distribution from collapsed stacks.
//!
//! Hot paths are the call paths with the most attributed events.
//! These are the first places to look when a trace is noisy or expensive.

use super::stack_builder::CollapsedStack;
use crate::parser::schema::HotPath;
use log::debug;

/// Calculate hot paths from collapsed stacks
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `stacks` - Collapsed stacks from stack_builder, heaviest first
/// * `top_n` - Number of top paths to return (e.g., 10)
///
/// # Returns
/// Vector of hot paths, sorted by event count (descending)
pub fn calculate_hot_paths(stacks: &[CollapsedStack], top_n: usize) -> Vec<HotPath> {
    debug!(
        "Calculating top {} hot paths from {} stacks",
        top_n,
        stacks.len()
    );

    // Total weight of these stacks is our base for percentages
    let total: u64 = stacks.iter().map(|s| s.weight).sum();

    stacks
        .iter()
        .take(top_n)
        .map(|stack| create_hot_path(stack, total))
        .collect()
}

/// Create a HotPath from a CollapsedStack
pub fn create_hot_path(stack: &CollapsedStack, denominator: u64) -> HotPath {
    let percentage = if denominator > 0 {
        (stack.weight as f64 / denominator as f64) * 100.0
    } else {
        0.0
    };

    HotPath {
        stack: stack.stack.clone(),
        events: stack.weight,
        percentage,
    }
}

/// Calculate event distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_event_distribution(stacks: &[CollapsedStack]) -> EventDistribution {
    if stacks.is_empty() {
        return EventDistribution::default();
    }

    let total: u64 = stacks.iter().map(|s| s.weight).sum();
    let count = stacks.len();

    let mut weights: Vec<u64> = stacks.iter().map(|s| s.weight).collect();
    weights.sort_unstable();

    EventDistribution {
        total_events: total,
        stack_count: count,
        mean_events_per_stack: total / count as u64,
        median_events_per_stack: weights[weights.len() / 2],
        max_events_per_stack: weights[weights.len() - 1],
    }
}

/// Event distribution statistics
///
/// **Public** - returned from calculate_event_distribution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDistribution {
    pub total_events: u64,
    pub stack_count: usize,
    pub mean_events_per_stack: u64,
    pub median_events_per_stack: u64,
    pub max_events_per_stack: u64,
}

impl EventDistribution {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Events: {} | Stacks: {} | Mean: {} | Median: {} | Max: {}",
            self.total_events,
            self.stack_count,
            self.mean_events_per_stack,
            self.median_events_per_stack,
            self.max_events_per_stack
        )
    }
}

//! Flamegraph generation using the inferno library.
//!
//! This module converts collapsed stacks into interactive SVG flamegraphs.
//! Flamegraphs show which call paths attract the most events.

pub mod generator;

// Re-export main types
pub use generator::{
    generate_flamegraph,
    generate_text_summary,
    FlamegraphConfig,
    FlamegraphPalette,
};

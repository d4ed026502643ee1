//! Output writers for reports, flamegraphs and terminal views.
//!
//! This module handles writing data to disk in various formats:
//! - JSON reports
//! - SVG flamegraphs
//! - Text trees and tables

pub mod json;
pub mod svg;
pub mod tree;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report};
pub use svg::write_svg;
pub use tree::{render_diagnostics, render_stats_table, render_tree, TreeStyle};

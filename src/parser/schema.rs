//! Output JSON schema definitions for decoded traces.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::ContractStat;
use crate::decoder::{CallTree, DecodeDiagnostics, DecodedTrace, DiagnosticEvent, NodeId};
use crate::parser::trap::Trap;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Number of records in the input
    pub record_count: usize,

    /// Non-fatal conditions absorbed during decoding
    pub diagnostics: DecodeDiagnostics,

    /// Fault that ended the execution, if the simulator reported one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fault: Option<Trap>,

    /// Reconstructed call tree
    pub call_tree: CallFrameReport,

    /// Frames with the most events
    #[serde(default)]
    pub hot_paths: Vec<HotPath>,

    /// Most expensive contracts
    #[serde(default)]
    pub stats: Vec<ContractStat>,

    /// Timestamp when report was generated
    pub generated_at: String,
}

/// Nested, owned form of one call frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFrameReport {
    pub function: String,

    /// False for frames that never saw their own Return
    pub returned: bool,

    pub events: Vec<DiagnosticEvent>,

    #[serde(default)]
    pub sub_calls: Vec<CallFrameReport>,
}

impl CallFrameReport {
    /// Convert the whole tree, starting at the root
    pub fn from_tree(tree: &CallTree) -> Self {
        Self::from_node(tree, NodeId::ROOT)
    }

    fn from_node(tree: &CallTree, id: NodeId) -> Self {
        let node = &tree[id];
        Self {
            function: node.function().to_string(),
            returned: node.is_returned(),
            events: node.events().to_vec(),
            sub_calls: node
                .sub_calls()
                .iter()
                .map(|child| Self::from_node(tree, *child))
                .collect(),
        }
    }

    /// Frames in this subtree, including self
    pub fn frame_count(&self) -> usize {
        1 + self.sub_calls.iter().map(Self::frame_count).sum::<usize>()
    }
}

/// A hot path in the execution (call path with its event count)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotPath {
    /// Collapsed stack representation (e.g., "TOP_LEVEL;swap;transfer")
    pub stack: String,

    /// Events attributed to the innermost frame
    pub events: u64,

    /// Percentage of all attributed events
    pub percentage: f64,
}

/// Assemble the final report
///
/// **Public** - used by commands to create final output
pub fn to_report(
    decoded: &DecodedTrace,
    hot_paths: Vec<HotPath>,
    stats: Vec<ContractStat>,
    fault: Option<Trap>,
) -> TraceReport {
    use chrono::Utc;

    TraceReport {
        version: SCHEMA_VERSION.to_string(),
        record_count: decoded.record_count,
        diagnostics: decoded.diagnostics.clone(),
        fault,
        call_tree: CallFrameReport::from_tree(&decoded.tree),
        hot_paths,
        stats,
        generated_at: Utc::now().to_rfc3339(),
    }
}

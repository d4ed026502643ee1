//! Diagnostic event decoding and call-tree reconstruction.
//!
//! This module handles:
//! - Decoding serialized records into structured events
//! - Classifying events as Call, Return or Other
//! - Rebuilding the nested call tree from the ordered event stream
//!
//! Everything here is pure and performs no I/O.

pub mod call_tree;
pub mod classify;
pub mod event;

// Re-export main types
pub use call_tree::{
    build_call_tree, decode_events, decode_events_with, CallNode, CallTree, CallTreeBuilder,
    DecodeDiagnostics, DecodedTrace, NodeId,
};
pub use classify::{classify, EventKind};
pub use event::{decode_record, ContractEventKind, DiagnosticEvent, OpaqueValue, Topic};

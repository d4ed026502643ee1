//! Call-tree reconstruction from classified events.
//!
//! Frames live in a single arena and refer to each other by [`NodeId`].
//! The builder keeps an explicit stack of open frames whose bottom is the
//! synthetic `TOP_LEVEL` root.
//!
//! Policy for imperfect traces:
//! - a Return pops every frame above the nearest frame of the same name;
//!   the popped frames keep what they had and never see the Return
//! - a Return with no open frame of that name stays with the active frame
//! - frames still open at end of input stay in the tree as built

use super::classify::{classify, is_framing_marker, EventKind};
use super::event::DiagnosticEvent;
use crate::utils::config::{DecodeOptions, SuccessPolicy, ROOT_FUNCTION};
use crate::utils::error::DecodeError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Index of a frame inside its [`CallTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root is always the first node of the arena
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// One reconstructed call frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNode {
    function: String,
    events: Vec<DiagnosticEvent>,
    sub_calls: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl CallNode {
    fn new(function: String, parent: Option<NodeId>) -> Self {
        Self {
            function,
            events: Vec::new(),
            sub_calls: Vec::new(),
            parent,
        }
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    /// Events attributed to this frame, in input order
    pub fn events(&self) -> &[DiagnosticEvent] {
        &self.events
    }

    /// Child frames, in call order
    pub fn sub_calls(&self) -> &[NodeId] {
        &self.sub_calls
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether the frame was closed by its own Return event
    pub fn is_returned(&self) -> bool {
        !self.is_root()
            && self
                .events
                .last()
                .is_some_and(|ev| classify(ev) == EventKind::Return(self.function.as_str()))
    }
}

/// Immutable call tree produced by a decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTree {
    nodes: Vec<CallNode>,
}

impl CallTree {
    pub fn root(&self) -> &CallNode {
        &self.nodes[NodeId::ROOT.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&CallNode> {
        self.nodes.get(id.0)
    }

    /// Child frames of `id`
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &CallNode> + '_ {
        self[id].sub_calls.iter().map(move |child| &self[*child])
    }

    /// Parent frame of `id`, `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<&CallNode> {
        self[id].parent.map(|p| &self[p])
    }

    /// Number of frames, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Distance from the root (root is 0)
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self[id].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self[parent].parent;
        }
        depth
    }

    /// Deepest nesting level of any frame
    pub fn max_depth(&self) -> usize {
        self.iter().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// Pre-order walk yielding `(id, depth)`
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            pending: vec![(NodeId::ROOT, 0)],
        }
    }

    /// First frame in pre-order with the given function name
    pub fn find(&self, function: &str) -> Option<NodeId> {
        self.iter()
            .map(|(id, _)| id)
            .find(|id| !self[*id].is_root() && self[*id].function == function)
    }

    /// Total number of attributed events
    pub fn event_count(&self) -> usize {
        self.nodes.iter().map(|n| n.events.len()).sum()
    }
}

impl Index<NodeId> for CallTree {
    type Output = CallNode;

    fn index(&self, id: NodeId) -> &CallNode {
        &self.nodes[id.0]
    }
}

/// Pre-order iterator over a [`CallTree`]
pub struct PreOrder<'a> {
    tree: &'a CallTree,
    pending: Vec<(NodeId, usize)>,
}

impl Iterator for PreOrder<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.pending.pop()?;
        self.pending.extend(
            self.tree[id]
                .sub_calls
                .iter()
                .rev()
                .map(|child| (*child, depth + 1)),
        );
        Some((id, depth))
    }
}

/// Non-fatal conditions absorbed while building
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeDiagnostics {
    /// Input positions of framing markers without a function name
    pub malformed_framing: Vec<usize>,

    /// Input positions of Returns with no open frame of that name
    pub unmatched_returns: Vec<usize>,

    /// Frames popped by a Return that matched an ancestor
    pub unwound_frames: usize,

    /// Frames still open when input ended
    pub open_frames: usize,
}

impl DecodeDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.malformed_framing.is_empty()
            && self.unmatched_returns.is_empty()
            && self.unwound_frames == 0
            && self.open_frames == 0
    }
}

/// Stack machine that turns classified events into a [`CallTree`]
///
/// **Public** - use [`build_call_tree`] unless events arrive incrementally
#[derive(Debug)]
pub struct CallTreeBuilder {
    nodes: Vec<CallNode>,
    stack: Vec<NodeId>,
    diagnostics: DecodeDiagnostics,
}

impl Default for CallTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CallTreeBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![CallNode::new(ROOT_FUNCTION.to_string(), None)],
            stack: vec![NodeId::ROOT],
            diagnostics: DecodeDiagnostics::default(),
        }
    }

    /// Number of currently open frames, root excluded
    pub fn open_depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Feed the event found at input position `index`
    pub fn push(&mut self, index: usize, event: DiagnosticEvent) {
        match classify(&event) {
            EventKind::Call(name) => {
                let name = name.to_owned();
                self.open_frame(name, event);
            }
            EventKind::Return(name) => {
                let name = name.to_owned();
                self.close_frame(index, &name, event);
            }
            EventKind::Other => {
                if is_framing_marker(&event) {
                    warn!(
                        "Framing event {} has no function name, treating it as a plain event",
                        index
                    );
                    self.diagnostics.malformed_framing.push(index);
                }
                self.attach_to_top(event);
            }
        }
    }

    /// Freeze the tree
    pub fn finish(mut self) -> (CallTree, DecodeDiagnostics) {
        self.diagnostics.open_frames = self.open_depth();
        if self.diagnostics.open_frames > 0 {
            debug!(
                "Trace ended with {} open frame(s), innermost '{}'",
                self.diagnostics.open_frames,
                self.nodes[self.top().0].function
            );
        }
        (CallTree { nodes: self.nodes }, self.diagnostics)
    }

    fn top(&self) -> NodeId {
        // root is never popped
        self.stack[self.stack.len() - 1]
    }

    fn attach_to_top(&mut self, event: DiagnosticEvent) {
        let top = self.top();
        self.nodes[top.0].events.push(event);
    }

    fn open_frame(&mut self, function: String, event: DiagnosticEvent) {
        let parent = self.top();
        let id = NodeId(self.nodes.len());

        let mut node = CallNode::new(function, Some(parent));
        node.events.push(event);
        self.nodes.push(node);

        self.nodes[parent.0].sub_calls.push(id);
        self.stack.push(id);
    }

    fn close_frame(&mut self, index: usize, function: &str, event: DiagnosticEvent) {
        let nodes = &self.nodes;
        let matched = self.stack[1..]
            .iter()
            .rposition(|id| nodes[id.0].function == function)
            .map(|pos| pos + 1);

        let Some(pos) = matched else {
            warn!(
                "Return {} of '{}' has no open call, attaching it to '{}'",
                index,
                function,
                self.nodes[self.top().0].function
            );
            self.diagnostics.unmatched_returns.push(index);
            self.attach_to_top(event);
            return;
        };

        let unwound = self.stack.len() - pos - 1;
        if unwound > 0 {
            debug!(
                "Return {} of '{}' unwinds {} frame(s) that never returned",
                index, function, unwound
            );
            self.diagnostics.unwound_frames += unwound;
        }

        let frame = self.stack[pos];
        self.stack.truncate(pos);
        self.nodes[frame.0].events.push(event);
    }
}

/// Output of a full decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTrace {
    pub tree: CallTree,
    pub diagnostics: DecodeDiagnostics,

    /// Number of input records, before any filtering
    pub record_count: usize,
}

/// Build a tree from already decoded events
///
/// **Public** - never fails; imperfect framing is absorbed into the shape
pub fn build_call_tree(events: impl IntoIterator<Item = DiagnosticEvent>) -> DecodedTrace {
    build_indexed(events.into_iter().enumerate())
}

fn build_indexed(events: impl Iterator<Item = (usize, DiagnosticEvent)>) -> DecodedTrace {
    let mut builder = CallTreeBuilder::new();
    let mut record_count = 0;
    for (index, event) in events {
        builder.push(index, event);
        record_count += 1;
    }
    let (tree, diagnostics) = builder.finish();
    DecodedTrace {
        tree,
        diagnostics,
        record_count,
    }
}

/// Decode serialized records and build the call tree
///
/// **Public** - main entry point of the library
///
/// # Errors
/// * `DecodeError::Record` - the first record that fails raw decoding; no tree is built
pub fn decode_events<S: AsRef<str>>(records: &[S]) -> Result<DecodedTrace, DecodeError> {
    decode_events_with(records, &DecodeOptions::default())
}

/// [`decode_events`] with an explicit success-flag policy
pub fn decode_events_with<S: AsRef<str>>(
    records: &[S],
    options: &DecodeOptions,
) -> Result<DecodedTrace, DecodeError> {
    debug!("Decoding {} diagnostic event records", records.len());

    let mut events = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let event = super::event::decode_record(record.as_ref())
            .map_err(|source| DecodeError::Record { index, source })?;
        events.push((index, event));
    }

    if options.success_policy == SuccessPolicy::DropFailed {
        let before = events.len();
        events.retain(|(_, event)| event.success);
        debug!(
            "Dropped {} event(s) outside successful invocations",
            before - events.len()
        );
    }

    let mut decoded = build_indexed(events.into_iter());
    decoded.record_count = records.len();

    debug!(
        "Built call tree: {} frames, max depth {}",
        decoded.tree.len(),
        decoded.tree.max_depth()
    );
    Ok(decoded)
}

//! Build collapsed stack format from a call tree.
//!
//! Collapsed stacks are the input format for flamegraph generation.
//! Format: "parent;child;grandchild weight"
//!
//! Example: "TOP_LEVEL;swap;transfer 4"
//! This means: swap called transfer, and 4 events were attributed to that transfer frame.

use crate::decoder::CallTree;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single collapsed stack entry
///
/// **Public** - used by flamegraph generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string
    pub stack: String,

    /// Weight (events attributed directly to the innermost frame)
    pub weight: u64,
}

impl CollapsedStack {
    /// Create a new collapsed stack
    ///
    /// **Public** - constructor
    pub fn new(stack: String, weight: u64) -> Self {
        Self { stack, weight }
    }

    /// Innermost frame name
    pub fn leaf(&self) -> &str {
        self.stack.rsplit(';').next().unwrap_or(&self.stack)
    }

    /// Line in the `stack weight` format
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }
}

/// Build collapsed stacks from a call tree
///
/// **Public** - main entry point for stack building
///
/// # Algorithm
/// 1. Walk frames in pre-order, extending the parent's path
/// 2. Weight each path by the events attributed to that frame
/// 3. Aggregate identical paths (repeated calls to the same function)
/// 4. Sort by weight, heaviest first
pub fn build_collapsed_stacks(tree: &CallTree) -> Vec<CollapsedStack> {
    debug!("Building collapsed stacks from {} frames", tree.len());

    let mut paths: Vec<String> = vec![String::new(); tree.len()];
    let mut stack_map: HashMap<String, u64> = HashMap::new();

    for (id, _) in tree.iter() {
        let node = &tree[id];
        let name = sanitize_frame(node.function());

        let path = match node.parent() {
            Some(parent) => format!("{};{}", paths[parent.index()], name),
            None => name,
        };

        let weight = node.events().len() as u64;
        if weight > 0 {
            *stack_map.entry(path.clone()).or_insert(0) += weight;
        }
        paths[id.index()] = path;
    }

    let mut stacks: Vec<CollapsedStack> = stack_map
        .into_iter()
        .map(|(stack, weight)| CollapsedStack::new(stack, weight))
        .collect();

    stacks.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.stack.cmp(&b.stack)));
    debug!("Built {} unique collapsed stacks", stacks.len());

    stacks
}

/// Frame names may not contain the separator or whitespace
fn sanitize_frame(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ';' => ':',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{build_call_tree, DiagnosticEvent, Topic};

    fn ev(a: &str, b: &str) -> DiagnosticEvent {
        DiagnosticEvent::from_topics(vec![Topic::symbol(a), Topic::symbol(b)])
    }

    #[test]
    fn test_sanitize_frame() {
        assert_eq!(sanitize_frame("a;b c"), "a:b_c");
    }

    #[test]
    fn test_repeated_calls_merge() {
        let decoded = build_call_tree(vec![
            ev("fn_call", "A"),
            ev("fn_call", "B"),
            ev("fn_return", "B"),
            ev("fn_call", "B"),
            ev("log", "x"),
            ev("fn_return", "B"),
            ev("fn_return", "A"),
        ]);

        let stacks = build_collapsed_stacks(&decoded.tree);

        assert_eq!(
            stacks,
            vec![
                CollapsedStack::new("TOP_LEVEL;A;B".to_string(), 5),
                CollapsedStack::new("TOP_LEVEL;A".to_string(), 2),
            ]
        );
        assert_eq!(stacks[0].leaf(), "B");
        assert_eq!(stacks[1].to_line(), "TOP_LEVEL;A 2");
    }

    #[test]
    fn test_empty_tree_has_no_stacks() {
        let decoded = build_call_tree(Vec::new());
        assert!(build_collapsed_stacks(&decoded.tree).is_empty());
    }
}

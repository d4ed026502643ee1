//! Per-contract cost statistics.
//!
//! Every event carrying a contract id contributes to that contract's
//! estimated cost. Weights follow the ledger resource model: storage
//! writes are the most expensive, then auth checks, then everything else.

use crate::decoder::CallTree;
use crate::utils::config::{CostWeights, AUTH_TYPES, STORAGE_WRITE_TYPES};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Aggregated cost of one contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStat {
    pub contract_id: String,
    pub event_count: u64,
    pub storage_writes: u64,
    pub auth_checks: u64,
    pub estimated_cost: u64,

    /// Number of distinct event types the contract emitted
    pub call_depth: usize,

    /// Deepest frame at which the contract emitted an event
    pub frame_depth: usize,
}

impl ContractStat {
    fn new(contract_id: &str) -> Self {
        Self {
            contract_id: contract_id.to_string(),
            ..Default::default()
        }
    }

    fn record(&mut self, event_type: &str, depth: usize, weights: &CostWeights) {
        self.event_count += 1;
        self.frame_depth = self.frame_depth.max(depth);

        if STORAGE_WRITE_TYPES.contains(&event_type) {
            self.storage_writes += 1;
            self.estimated_cost += weights.storage_write;
        } else if AUTH_TYPES.contains(&event_type) {
            self.auth_checks += 1;
            self.estimated_cost += weights.auth;
        } else {
            self.estimated_cost += weights.other;
        }
    }
}

/// Build statistics for every contract seen in the tree
///
/// **Public** - main entry point for cost ranking
///
/// # Returns
/// All contracts, most expensive first; ties ordered by contract id
pub fn build_contract_stats(tree: &CallTree, weights: &CostWeights) -> Vec<ContractStat> {
    let mut index: BTreeMap<&str, (ContractStat, BTreeSet<String>)> = BTreeMap::new();

    for (id, depth) in tree.iter() {
        for event in tree[id].events() {
            let Some(contract_id) = event.contract_id.as_deref().filter(|c| !c.is_empty()) else {
                continue;
            };
            let event_type = event.event_type();
            let (stat, seen_types) = index
                .entry(contract_id)
                .or_insert_with(|| (ContractStat::new(contract_id), BTreeSet::new()));

            stat.record(&event_type, depth, weights);
            if seen_types.insert(event_type) {
                stat.call_depth += 1;
            }
        }
    }

    let mut stats: Vec<ContractStat> = index.into_values().map(|(stat, _)| stat).collect();
    stats.sort_by(|a, b| {
        b.estimated_cost
            .cmp(&a.estimated_cost)
            .then_with(|| a.contract_id.cmp(&b.contract_id))
    });

    debug!("Collected stats for {} contract(s)", stats.len());
    stats
}

/// The `top_n` most expensive contracts
pub fn top_contract_stats(
    tree: &CallTree,
    weights: &CostWeights,
    top_n: usize,
) -> Vec<ContractStat> {
    let mut stats = build_contract_stats(tree, weights);
    stats.truncate(top_n);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{build_call_tree, DiagnosticEvent, Topic};

    fn event(contract: &str, tag: &str) -> DiagnosticEvent {
        DiagnosticEvent::from_topics(vec![Topic::symbol(tag)]).with_contract_id(contract)
    }

    #[test]
    fn test_weighted_cost() {
        let decoded = build_call_tree(vec![
            event("aa", "storage_write"),
            event("aa", "require_auth"),
            event("aa", "log"),
            event("bb", "AUTH"),
        ]);

        let stats = build_contract_stats(&decoded.tree, &CostWeights::default());

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].contract_id, "aa");
        assert_eq!(stats[0].estimated_cost, 6);
        assert_eq!(stats[0].storage_writes, 1);
        assert_eq!(stats[0].auth_checks, 1);
        assert_eq!(stats[0].event_count, 3);
        assert_eq!(stats[1].estimated_cost, 2);
    }

    #[test]
    fn test_events_without_contract_are_skipped() {
        let decoded = build_call_tree(vec![
            DiagnosticEvent::from_topics(vec![Topic::symbol("log")]),
            event("", "log"),
        ]);

        assert!(build_contract_stats(&decoded.tree, &CostWeights::default()).is_empty());
    }

    #[test]
    fn test_ties_sorted_by_id_and_truncated() {
        let decoded = build_call_tree(vec![event("cc", "log"), event("aa", "log"), event("bb", "log")]);

        let stats = top_contract_stats(&decoded.tree, &CostWeights::default(), 2);
        let ids: Vec<&str> = stats.iter().map(|s| s.contract_id.as_str()).collect();
        assert_eq!(ids, vec!["aa", "bb"]);
    }

    #[test]
    fn test_call_depth_counts_distinct_types() {
        let decoded = build_call_tree(vec![
            event("aa", "log"),
            event("aa", "storage_write"),
            event("aa", "LOG"),
            event("aa", "require_auth"),
        ]);

        let stats = build_contract_stats(&decoded.tree, &CostWeights::default());
        assert_eq!(stats[0].call_depth, 3);
        assert_eq!(stats[0].frame_depth, 0);
    }

    #[test]
    fn test_frame_depth_from_tree() {
        let call = |name: &str| {
            DiagnosticEvent::from_topics(vec![Topic::symbol("fn_call"), Topic::symbol(name)])
                .with_contract_id("aa")
        };
        let decoded = build_call_tree(vec![call("outer"), call("inner"), event("aa", "log")]);

        let stats = build_contract_stats(&decoded.tree, &CostWeights::default());
        assert_eq!(stats[0].frame_depth, 2);
        assert_eq!(stats[0].call_depth, 2);
        assert_eq!(stats[0].event_count, 3);
    }
}

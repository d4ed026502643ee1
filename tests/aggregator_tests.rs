mod common;

use common::{call, contract_hex, log, ret, tagged};
use pretty_assertions::assert_eq;
use soroban_call_trace::aggregator::{
    build_collapsed_stacks, build_contract_stats, calculate_hot_paths, top_contract_stats,
};
use soroban_call_trace::decoder::decode_events;
use soroban_call_trace::utils::config::CostWeights;

#[test]
fn test_collapsed_stacks_follow_tree() {
    let records = vec![
        call("swap"),
        call("transfer"),
        log("moved"),
        ret("transfer"),
        call("transfer"),
        ret("transfer"),
        ret("swap"),
    ];
    let trace = decode_events(&records).unwrap();
    let stacks = build_collapsed_stacks(&trace.tree);
    let lines: Vec<String> = stacks.iter().map(|s| s.to_line()).collect();

    // both transfer frames share one path
    assert_eq!(lines, vec!["TOP_LEVEL;swap;transfer 5", "TOP_LEVEL;swap 2"]);
    assert_eq!(stacks[0].leaf(), "transfer");
}

#[test]
fn test_hot_paths_percentages() {
    let records = vec![call("A"), log("1"), log("2"), ret("A"), log("top")];
    let trace = decode_events(&records).unwrap();
    let stacks = build_collapsed_stacks(&trace.tree);
    let hot = calculate_hot_paths(&stacks, 5);

    assert_eq!(hot.len(), 2);
    assert_eq!(hot[0].stack, "TOP_LEVEL;A");
    assert_eq!(hot[0].events, 4);
    assert!((hot[0].percentage - 80.0).abs() < 1e-9);
    assert!((hot[1].percentage - 20.0).abs() < 1e-9);
}

#[test]
fn test_contract_ranking() {
    let records = vec![
        call("A"),
        tagged("storage_write", 1),
        tagged("storage_write", 1),
        call("B"),
        tagged("require_auth", 2),
        tagged("log", 2),
        ret("B"),
        ret("A"),
        tagged("auth", 3),
    ];
    let trace = decode_events(&records).unwrap();
    let stats = build_contract_stats(&trace.tree, &CostWeights::default());

    assert_eq!(stats.len(), 3);
    assert_eq!(stats[0].contract_id, contract_hex(1));
    assert_eq!(stats[0].estimated_cost, 6);
    assert_eq!(stats[0].storage_writes, 2);
    assert_eq!(stats[0].call_depth, 1);
    assert_eq!(stats[0].frame_depth, 1);

    assert_eq!(stats[1].contract_id, contract_hex(2));
    assert_eq!(stats[1].estimated_cost, 3);
    assert_eq!(stats[1].auth_checks, 1);
    assert_eq!(stats[1].call_depth, 2);
    assert_eq!(stats[1].frame_depth, 2);

    assert_eq!(stats[2].contract_id, contract_hex(3));
    assert_eq!(stats[2].call_depth, 1);
    assert_eq!(stats[2].frame_depth, 0);
}

#[test]
fn test_ties_break_on_contract_id() {
    let records = vec![tagged("log", 9), tagged("log", 4)];
    let trace = decode_events(&records).unwrap();
    let stats = build_contract_stats(&trace.tree, &CostWeights::default());

    assert_eq!(stats[0].contract_id, contract_hex(4));
    assert_eq!(stats[1].contract_id, contract_hex(9));
}

#[test]
fn test_top_n_truncates() {
    let records: Vec<String> = (1..=8).map(|b| tagged("log", b)).collect();
    let trace = decode_events(&records).unwrap();

    assert_eq!(top_contract_stats(&trace.tree, &CostWeights::default(), 5).len(), 5);
    assert_eq!(top_contract_stats(&trace.tree, &CostWeights::default(), 20).len(), 8);
}

#[test]
fn test_custom_weights() {
    let records = vec![tagged("storage_write", 1), tagged("log", 2), tagged("log", 2)];
    let trace = decode_events(&records).unwrap();
    let weights = CostWeights {
        storage_write: 1,
        auth: 1,
        other: 10,
    };
    let stats = build_contract_stats(&trace.tree, &weights);

    assert_eq!(stats[0].contract_id, contract_hex(2));
    assert_eq!(stats[0].estimated_cost, 20);
}

#[test]
fn test_call_depth_is_independent_of_nesting() {
    let records = vec![
        tagged("log", 5),
        tagged("storage_write", 5),
        tagged("require_auth", 5),
        tagged("log", 5),
    ];
    let trace = decode_events(&records).unwrap();
    let stats = build_contract_stats(&trace.tree, &CostWeights::default());

    assert_eq!(stats[0].call_depth, 3);
    assert_eq!(stats[0].frame_depth, 0);
    assert_eq!(stats[0].event_count, 4);
}

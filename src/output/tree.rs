//! Terminal rendering of call trees and stats tables.

use crate::aggregator::ContractStat;
use crate::decoder::{CallTree, DecodeDiagnostics, NodeId};
use crate::utils::config::STATS_CONTRACT_COLUMN;
use colored::Colorize;

/// Options for [`render_tree`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeStyle {
    /// Print each attributed event under its frame
    pub show_events: bool,
}

/// Render a call tree as an indented outline
pub fn render_tree(tree: &CallTree, style: TreeStyle) -> String {
    let mut lines = Vec::new();

    for (id, depth) in tree.iter() {
        let node = &tree[id];
        let indent = "  ".repeat(depth);

        let name = if id == NodeId::ROOT {
            node.function().bold()
        } else if node.is_returned() {
            node.function().green()
        } else {
            node.function().yellow()
        };

        let mut line = format!("{}{} ({} events)", indent, name, node.events().len());
        if id != NodeId::ROOT && !node.is_returned() {
            line.push_str(&format!(" {}", "(no return)".red()));
        }
        lines.push(line);

        if style.show_events {
            for event in node.events() {
                let topics: Vec<String> = event.topics.iter().map(ToString::to_string).collect();
                lines.push(format!("{}  - {}", indent, topics.join(" ").dimmed()));
            }
        }
    }

    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// Short human-readable account of absorbed trace problems
pub fn render_diagnostics(diagnostics: &DecodeDiagnostics) -> Option<String> {
    if diagnostics.is_clean() {
        return None;
    }

    let mut lines = Vec::new();
    if diagnostics.open_frames > 0 {
        lines.push(format!(
            "{} {} frame(s) never returned",
            "warning:".yellow(),
            diagnostics.open_frames
        ));
    }
    if diagnostics.unwound_frames > 0 {
        lines.push(format!(
            "{} {} frame(s) were unwound by an ancestor's return",
            "warning:".yellow(),
            diagnostics.unwound_frames
        ));
    }
    if !diagnostics.unmatched_returns.is_empty() {
        lines.push(format!(
            "{} returns without a matching call at records {:?}",
            "warning:".yellow(),
            diagnostics.unmatched_returns
        ));
    }
    if !diagnostics.malformed_framing.is_empty() {
        lines.push(format!(
            "{} framing events without a function name at records {:?}",
            "warning:".yellow(),
            diagnostics.malformed_framing
        ));
    }
    Some(lines.join("\n"))
}

/// Render the contract ranking as a fixed-width table
pub fn render_stats_table(stats: &[ContractStat]) -> String {
    const COL_COST: usize = 12;
    const COL_DEPTH: usize = 7;

    let mut lines = vec![
        format!("Top {} most expensive contract calls", stats.len()),
        String::new(),
        format!(
            "{:<width$} | {:<cost$} | {:<depth$}",
            "Contract ID",
            "Est. Cost",
            "Depth",
            width = STATS_CONTRACT_COLUMN,
            cost = COL_COST,
            depth = COL_DEPTH
        ),
        "-".repeat(STATS_CONTRACT_COLUMN + COL_COST + COL_DEPTH + 6),
    ];

    for (i, stat) in stats.iter().enumerate() {
        lines.push(format!(
            "{}. {:<width$} | {:<cost$} | {:<depth$}",
            i + 1,
            truncate_id(&stat.contract_id, STATS_CONTRACT_COLUMN),
            stat.estimated_cost,
            stat.call_depth,
            width = STATS_CONTRACT_COLUMN - 3,
            cost = COL_COST,
            depth = COL_DEPTH
        ));
    }

    lines.iter().map(|line| format!("{}\n", line)).collect()
}

fn truncate_id(id: &str, max: usize) -> String {
    if id.chars().count() > max {
        let head: String = id.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{build_call_tree, DiagnosticEvent, Topic};

    fn ev(a: &str, b: &str) -> DiagnosticEvent {
        DiagnosticEvent::from_topics(vec![Topic::symbol(a), Topic::symbol(b)])
    }

    #[test]
    fn test_render_tree_marks_open_frames() {
        colored::control::set_override(false);
        let decoded = build_call_tree(vec![ev("fn_call", "A"), ev("fn_call", "B"), ev("fn_return", "A")]);

        let text = render_tree(&decoded.tree, TreeStyle { show_events: false });
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "TOP_LEVEL (0 events)");
        assert_eq!(lines[1], "  A (2 events)");
        assert_eq!(lines[2], "    B (1 events) (no return)");
    }

    #[test]
    fn test_render_tree_with_events() {
        colored::control::set_override(false);
        let decoded = build_call_tree(vec![ev("log", "hello")]);

        let text = render_tree(&decoded.tree, TreeStyle { show_events: true });
        assert!(text.contains("  - log hello"));
    }

    #[test]
    fn test_default_style_hides_events() {
        colored::control::set_override(false);
        let decoded = build_call_tree(vec![ev("log", "hello")]);

        let text = render_tree(&decoded.tree, TreeStyle::default());
        assert_eq!(text, "TOP_LEVEL (1 events)\n");
    }

    #[test]
    fn test_render_diagnostics() {
        assert!(render_diagnostics(&DecodeDiagnostics::default()).is_none());

        colored::control::set_override(false);
        let diag = DecodeDiagnostics {
            unmatched_returns: vec![3],
            ..Default::default()
        };
        let text = render_diagnostics(&diag).unwrap();
        assert!(text.contains("records [3]"));
    }

    #[test]
    fn test_truncate_id() {
        let long = "c".repeat(56);
        let shown = truncate_id(&long, 44);
        assert_eq!(shown.len(), 44);
        assert!(shown.ends_with("..."));
        assert_eq!(truncate_id("short", 44), "short");
    }

    #[test]
    fn test_render_stats_table() {
        let stats = vec![ContractStat {
            contract_id: "ab".repeat(32),
            event_count: 4,
            storage_writes: 1,
            auth_checks: 0,
            estimated_cost: 6,
            call_depth: 2,
            frame_depth: 1,
        }];

        let table = render_stats_table(&stats);
        assert!(table.starts_with("Top 1 most expensive contract calls\n\nContract ID"));
        assert!(table.ends_with("| 2      \n"));
        assert!(table.contains("1. "));
        assert!(table.contains("..."));
    }
}

//! Stats command: rank contracts by estimated cost.

use super::models::StatsArgs;
use crate::aggregator::{top_contract_stats, ContractStat};
use crate::decoder::decode_events_with;
use crate::output::render_stats_table;
use crate::parser::load_input;
use anyhow::{Context, Result};
use log::info;

/// Execute the stats command
///
/// Prints the ranking table and returns the rows shown.
pub fn execute_stats(args: StatsArgs) -> Result<Vec<ContractStat>> {
    args.config.validate()?;

    let input = load_input(&args.input)
        .with_context(|| format!("Failed to load trace input from {}", args.input.display()))?;
    let decoded = decode_events_with(&input.records, &args.config.decode)
        .context("Failed to decode diagnostic events")?;

    let stats = top_contract_stats(
        &decoded.tree,
        &args.config.stats.weights,
        args.config.stats.top_n,
    );
    info!("Ranked {} contract(s)", stats.len());

    if stats.is_empty() {
        println!("No contract call data found in the trace.");
    } else {
        print!("{}", render_stats_table(&stats));
    }

    Ok(stats)
}

//! Decode command implementation.
//!
//! The decode command:
//! 1. Loads serialized records
//! 2. Decodes them and rebuilds the call tree
//! 3. Builds collapsed stacks and hot paths
//! 4. Ranks contracts by estimated cost
//! 5. Generates flamegraph
//! 6. Writes output files

use super::models::DecodeArgs;
use crate::aggregator::{
    build_collapsed_stacks, calculate_event_distribution, calculate_hot_paths, top_contract_stats,
};
use crate::decoder::decode_events_with;
use crate::flamegraph::{generate_flamegraph, generate_text_summary};
use crate::output::{render_diagnostics, render_tree, write_report, write_svg, TreeStyle};
use crate::parser::{classify_trap, load_input, to_report, TraceReport};
use crate::utils::config::MAX_STATS_TOP_N;
use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::time::Instant;

/// Validate decode arguments before doing any work
pub fn validate_args(args: &DecodeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        bail!("Input path cannot be empty");
    }

    if args.top_paths == 0 {
        bail!("top_paths must be at least 1");
    }

    if args.top_paths > MAX_STATS_TOP_N {
        bail!("top_paths cannot exceed {}", MAX_STATS_TOP_N);
    }

    if let (Some(json), Some(svg)) = (&args.output_json, &args.output_svg) {
        if json == svg {
            bail!("JSON report and flamegraph cannot share a path");
        }
    }

    args.config.validate()?;
    Ok(())
}

/// Execute the decode command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was (or would have been) written
///
/// # Errors
/// * Input read or format failures
/// * Record decode errors (with the offending record index)
/// * File write errors
pub fn execute_decode(args: DecodeArgs) -> Result<TraceReport> {
    let start_time = Instant::now();

    info!("Step 1/6: Loading trace input from {}", args.input.display());
    let input = load_input(&args.input)
        .with_context(|| format!("Failed to load trace input from {}", args.input.display()))?;

    for line in &input.logs {
        debug!("simulator: {}", line);
    }

    info!("Step 2/6: Decoding {} records...", input.records.len());
    let decoded = decode_events_with(&input.records, &args.config.decode)
        .context("Failed to decode diagnostic events")?;

    debug!(
        "Call tree: {} frames, {} events, max depth {}",
        decoded.tree.len(),
        decoded.tree.event_count(),
        decoded.tree.max_depth()
    );

    info!("Step 3/6: Building collapsed stacks...");
    let stacks = build_collapsed_stacks(&decoded.tree);
    info!(
        "Event distribution: {}",
        calculate_event_distribution(&stacks).summary()
    );
    let hot_paths = calculate_hot_paths(&stacks, args.top_paths);

    info!("Step 4/6: Ranking contracts...");
    let stats = top_contract_stats(
        &decoded.tree,
        &args.config.stats.weights,
        args.config.stats.top_n,
    );

    let fault = input.fault.as_deref().map(classify_trap);
    if let Some(trap) = &fault {
        warn!("{}", trap);
    }

    let svg_content = match (&args.output_svg, stacks.is_empty()) {
        (Some(_), false) => {
            info!("Step 5/6: Generating flamegraph...");
            Some(
                generate_flamegraph(&stacks, args.flamegraph_config.as_ref())
                    .context("Failed to generate flamegraph")?,
            )
        }
        (Some(_), true) => {
            warn!("Step 5/6: Trace has no events, skipping flamegraph");
            None
        }
        (None, _) => {
            info!("Step 5/6: Skipping flamegraph generation (not requested)");
            None
        }
    };

    info!("Step 6/6: Writing output files...");
    let report = to_report(&decoded, hot_paths, stats, fault);

    if let Some(path) = &args.output_json {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if let (Some(svg), Some(svg_path)) = (svg_content, &args.output_svg) {
        write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
        info!("✓ Flamegraph written to: {}", svg_path.display());
    }

    if args.print_tree {
        print!(
            "{}",
            render_tree(
                &decoded.tree,
                TreeStyle {
                    show_events: args.show_events
                }
            )
        );
        if let Some(text) = render_diagnostics(&decoded.diagnostics) {
            println!("{}", text);
        }
        if let Some(trap) = &report.fault {
            println!("{}", trap);
        }
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(72));
        println!("TRACE SUMMARY");
        println!("{}", "=".repeat(72));
        println!("Records:       {}", report.record_count);
        println!("Frames:        {}", decoded.tree.len() - 1);
        println!("Max Depth:     {}", decoded.tree.max_depth());
        println!("Unique Stacks: {}", stacks.len());
        println!("\n{}", generate_text_summary(&stacks, 10));
        println!("{}", "=".repeat(72));
    }

    info!(
        "Decode completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(report)
}

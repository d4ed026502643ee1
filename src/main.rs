//! Soroban Call Trace CLI
//!
//! Rebuilds call trees from Soroban diagnostic events.
//! Generates tree views, flamegraphs and per-contract cost rankings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use soroban_call_trace::commands::{
    display_schema, display_version, execute_decode, execute_stats, validate_args,
    validate_report_file, DecodeArgs, StatsArgs,
};
use soroban_call_trace::flamegraph::FlamegraphConfig;
use soroban_call_trace::utils::config::{load_config, AppConfig, SuccessPolicy};

/// Soroban Call Trace - call trees from diagnostic events
#[derive(Parser, Debug)]
#[command(name = "soroban-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode records and print the call tree
    Decode {
        /// Trace file: JSON array of records or a simulation response (`-` for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output path for JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for SVG flamegraph (optional)
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of top hot paths to include
        #[arg(long, default_value = "20")]
        top_paths: usize,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value = "1200")]
        width: usize,

        /// List each frame's events in the tree view
        #[arg(long)]
        events: bool,

        /// Skip events the host marked as failed
        #[arg(long)]
        drop_failed: bool,

        /// Do not print the call tree
        #[arg(long)]
        no_tree: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Rank contracts by estimated cost
    Stats {
        /// Trace file (`-` for stdin)
        #[arg(default_value = "-")]
        input: PathBuf,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of contracts to show
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Skip events the host marked as failed
        #[arg(long)]
        drop_failed: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    // Execute command
    match cli.command {
        Commands::Decode {
            input,
            output,
            flamegraph,
            config,
            top_paths,
            title,
            width,
            events,
            drop_failed,
            no_tree,
            summary,
        } => {
            let mut flamegraph_config = FlamegraphConfig::new();
            if let Some(t) = title {
                flamegraph_config = flamegraph_config.with_title(t);
            }
            flamegraph_config.width = width;

            let args = DecodeArgs {
                input,
                output_json: output,
                output_svg: flamegraph,
                flamegraph_config: Some(flamegraph_config),
                top_paths,
                config: resolve_config(config.as_deref(), drop_failed)?,
                print_tree: !no_tree,
                show_events: events,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_decode(args)?;
        }

        Commands::Stats {
            input,
            config,
            top_n,
            drop_failed,
        } => {
            let mut config = resolve_config(config.as_deref(), drop_failed)?;
            if let Some(n) = top_n {
                config.stats.top_n = n;
            }

            execute_stats(StatsArgs { input, config })?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Load the config file if one was given, then apply flag overrides
fn resolve_config(path: Option<&Path>, drop_failed: bool) -> Result<AppConfig> {
    let mut config = match path {
        Some(p) => load_config(p)
            .with_context(|| format!("Failed to load config from {}", p.display()))?,
        None => AppConfig::default(),
    };

    if drop_failed {
        config.decode.success_policy = SuccessPolicy::DropFailed;
    }

    Ok(config)
}

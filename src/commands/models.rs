use crate::flamegraph::FlamegraphConfig;
use crate::utils::config::AppConfig;
use std::path::PathBuf;

/// Arguments for the decode command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DecodeArgs {
    /// Trace input file (`-` for stdin)
    pub input: PathBuf,

    /// Output path for JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Flamegraph configuration
    pub flamegraph_config: Option<FlamegraphConfig>,

    /// Number of top hot paths to include in the report
    pub top_paths: usize,

    /// Decode and stats settings
    pub config: AppConfig,

    /// Print the call tree to stdout
    pub print_tree: bool,

    /// List events under each frame in the printed tree
    pub show_events: bool,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for DecodeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            output_json: None,
            output_svg: None,
            flamegraph_config: None,
            top_paths: 20,
            config: AppConfig::default(),
            print_tree: true,
            show_events: false,
            print_summary: false,
        }
    }
}

/// Arguments for the stats command
#[derive(Debug, Clone)]
pub struct StatsArgs {
    /// Trace input file (`-` for stdin)
    pub input: PathBuf,

    /// Decode and stats settings
    pub config: AppConfig,
}

impl Default for StatsArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            config: AppConfig::default(),
        }
    }
}

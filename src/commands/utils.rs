use crate::output::read_report;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: impl AsRef<Path>) -> Result<()> {
    let file_path = file_path.as_ref();
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Records: {}", report.record_count);
    println!("  Frames: {}", report.call_tree.frame_count() - 1);
    println!("  Hot Paths: {}", report.hot_paths.len());
    println!("  Contracts Ranked: {}", report.stats.len());
    if let Some(fault) = &report.fault {
        println!("  Fault: {}", fault);
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Soroban Call Trace Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string           - Schema version (e.g., '1.0.0')");
        println!("  record_count: number      - Records in the input");
        println!("  diagnostics: object       - Problems absorbed while decoding");
        println!("    malformed_framing: array  - Framing events without a function name");
        println!("    unmatched_returns: array  - Returns with no open call");
        println!("    unwound_frames: number    - Frames closed by an ancestor's return");
        println!("    open_frames: number       - Frames open at end of trace");
        println!("  fault: object?            - Runtime fault reported by the simulator");
        println!("  call_tree: object         - Root frame (TOP_LEVEL)");
        println!("    function: string        - Function name");
        println!("    returned: bool          - Whether the frame saw its own return");
        println!("    events: array           - Events attributed to the frame");
        println!("    sub_calls: array        - Nested frames, in call order");
        println!("  hot_paths: array          - Call paths with the most events");
        println!("  stats: array              - Most expensive contracts");
        println!("  generated_at: string      - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Soroban Call Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Call-tree reconstruction for Soroban diagnostic event traces.");
}

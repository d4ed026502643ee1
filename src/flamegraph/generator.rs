//! SVG flamegraph generation using the inferno library.
//!
//! Each frame's width is the number of events attributed to it and its
//! descendants, so noisy sub-calls stand out at a glance.

use crate::aggregator::stack_builder::CollapsedStack;
use crate::utils::error::FlamegraphError;
use colored::Colorize;
use inferno::flamegraph::color::{BasicPalette, Palette};
use inferno::flamegraph::{self, Options};
use log::info;

/// Color palette for the flamegraph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlamegraphPalette {
    #[default]
    Hot,
    Mem,
    Io,
    Aqua,
}

impl From<FlamegraphPalette> for Palette {
    fn from(palette: FlamegraphPalette) -> Self {
        match palette {
            FlamegraphPalette::Hot => Palette::Basic(BasicPalette::Hot),
            FlamegraphPalette::Mem => Palette::Basic(BasicPalette::Mem),
            FlamegraphPalette::Io => Palette::Basic(BasicPalette::Io),
            FlamegraphPalette::Aqua => Palette::Basic(BasicPalette::Aqua),
        }
    }
}

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    pub palette: FlamegraphPalette,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Soroban Call Trace".to_string(),
            width: 1200,
            palette: FlamegraphPalette::default(),
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_palette(mut self, palette: FlamegraphPalette) -> Self {
        self.palette = palette;
        self
    }
}

/// Generate SVG flamegraph from collapsed stacks
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - nothing to draw
/// * `FlamegraphError::Render` - inferno failed to render
pub fn generate_flamegraph(
    stacks: &[CollapsedStack],
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    if stacks.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph with {} stacks", stacks.len());

    let mut options = Options::default();
    options.title = config.title;
    options.count_name = "events".to_string();
    options.image_width = Some(config.width);
    options.colors = config.palette.into();

    let lines: Vec<String> = stacks.iter().map(CollapsedStack::to_line).collect();
    let mut svg = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
        .map_err(|e| FlamegraphError::Render(e.to_string()))?;

    let svg = String::from_utf8(svg)?;
    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Create a text summary of the heaviest call paths
pub fn generate_text_summary(stacks: &[CollapsedStack], max_lines: usize) -> String {
    let mut lines = Vec::new();
    let total: u64 = stacks.iter().map(|s| s.weight).sum::<u64>().max(1);

    lines.push("  HOT CALL PATHS".bold().to_string());
    lines.push(format!("  {:<52} {:>8} {:>7}", "Call Path (Busiest First)", "EVENTS", "%"));
    lines.push(format!("  {}", "-".repeat(69)));

    for stack in stacks.iter().take(max_lines) {
        let percentage = (stack.weight as f64 / total as f64) * 100.0;

        // Truncate stack if too long for display
        let display_stack = if stack.stack.chars().count() > 52 {
            let tail: String = stack
                .stack
                .chars()
                .rev()
                .take(49)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{}", tail)
        } else {
            stack.stack.clone()
        };

        lines.push(format!(
            "  {:<52} {:>8} {:>6.1}%",
            display_stack.cyan(),
            stack.weight,
            percentage
        ));
    }

    if stacks.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} unique paths)",
            max_lines,
            stacks.len()
        ));
    }

    lines.join("\n")
}

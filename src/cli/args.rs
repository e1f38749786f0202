//! Command-line argument definitions

use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand};

use crate::domain::model::{TimeSpec, MAX_SEGMENTS};

/// Accepts seconds, MM:SS or HH:MM:SS
fn parse_time(value: &str) -> Result<f64, String> {
    TimeSpec::parse(value)
        .map(|t| t.as_seconds())
        .map_err(|e| e.to_string())
}

/// `START-END`, each side in any accepted time format; a `-` right after `e`/`E` is an exponent sign
fn parse_range(value: &str) -> Result<(f64, f64), String> {
    let separator = value
        .char_indices()
        .find(|&(i, c)| c == '-' && i > 0 && !value[..i].ends_with(|p: char| p == 'e' || p == 'E'))
        .map(|(i, _)| i)
        .ok_or_else(|| format!("Expected START-END, got '{}'", value))?;
    let (start, end) = (&value[..separator], &value[separator + 1..]);
    Ok((parse_time(start)?, parse_time(end)?))
}

fn parse_parts(value: &str) -> Result<u32, String> {
    clap_num::number_range(value, 2, MAX_SEGMENTS)
}

fn parse_overlap(value: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("Invalid overlap '{}'", value))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err("Overlap must be zero or positive".to_string());
    }
    Ok(seconds)
}

/// Arguments for the preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Naming pattern (default: the configured pattern)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Source base name
    #[arg(short, long, default_value = "example")]
    pub name: String,

    /// Start of the first segment
    #[arg(short, long, default_value = "0", value_parser = parse_time)]
    pub start: f64,

    /// End of the first segment
    #[arg(short, long, default_value = "60", value_parser = parse_time)]
    pub end: f64,

    /// Output format (default: the configured format)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Naming pattern to validate
    #[arg(short, long)]
    pub pattern: String,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("method").args(["parts", "segment", "range"])))]
pub struct PlanArgs {
    /// Source audio file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Total duration of the source
    #[arg(short, long, value_parser = parse_time)]
    pub duration: f64,

    /// Split into this many equal parts (default: 2)
    #[arg(long, value_parser = parse_parts)]
    pub parts: Option<u32>,

    /// Split into segments of this length
    #[arg(long, value_parser = parse_time)]
    pub segment: Option<f64>,

    /// Custom range START-END; repeat for more segments
    #[arg(long, value_parser = parse_range)]
    pub range: Vec<(f64, f64)>,

    /// Overlap in seconds between neighbouring segments (default: configured overlap)
    #[arg(long, value_parser = parse_overlap)]
    pub overlap: Option<f64>,

    /// Naming pattern (default: the configured pattern)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Output format, or "same" to keep the source format
    #[arg(short, long)]
    pub format: Option<String>,

    /// Output directory (default: configured directory, else the source directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Add the source to recent files and remember these options
    #[arg(long)]
    pub remember: bool,
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Settings actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the current settings as TOML
    Show,
    /// Print the settings file location
    Path,
    /// Set the default naming pattern
    SetPattern {
        /// New pattern
        pattern: String,
    },
    /// Set the default output format
    SetFormat {
        /// New format
        format: String,
    },
    /// List recent files
    Recent {
        /// Forget all recent files instead
        #[arg(long)]
        clear: bool,
    },
}

//! CLI module for SplitKit
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// SplitKit - plan audio splits and name the segments
///
/// Computes segment boundaries for equal parts, fixed durations or custom
/// ranges and expands a naming pattern for every segment. Audio export is left
/// to the external audio toolkit.
#[derive(Parser, Debug)]
#[command(name = "splitkit")]
#[command(about = "SplitKit - audio split planning and segment naming")]
#[command(version)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Settings file to use instead of the default location
    #[arg(long, global = true, env = "SPLITKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the file name a pattern produces for the first segment
    Preview(args::PreviewArgs),
    /// Validate a naming pattern without naming anything
    Check(args::CheckArgs),
    /// Plan segment boundaries and output names for one source file
    Plan(args::PlanArgs),
    /// List supported audio files in a directory
    Scan(args::ScanArgs),
    /// Inspect or edit saved settings
    Config(args::ConfigArgs),
}

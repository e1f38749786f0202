//! SplitKit CLI
//!
//! Plans audio splits and generates segment file names from naming patterns.
//!
//! # Usage
//!
//! ```bash
//! splitkit preview --pattern "{original_name}_part_{number:03d}" --name MySong
//! splitkit check --pattern "{original_name}_({start_time}-{end_time})"
//! splitkit plan --input song.mp3 --duration 03:00 --parts 3
//! splitkit plan --input song.mp3 --duration 10:00 --segment 01:00 --overlap 2
//! splitkit plan --input song.mp3 --duration 05:00 --range 00:30-01:30 --range 02:00-03:00
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use splitkit_cli::cli::{commands, Cli};
use splitkit_cli::utils::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};

/// Main entry point for the SplitKit CLI
fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: LogLevel::parse(&cli.log_level)?,
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        },
        target: false,
    };
    init_logging(&logging)?;

    info!("Starting SplitKit");
    debug!("Command: {:?}", cli.command);

    commands::run(cli)?;

    info!("SplitKit completed successfully");
    Ok(())
}

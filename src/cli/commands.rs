//! Command implementations

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::container::AppContainer;
use crate::app::{PlanRequest, SplitPlan};
use crate::cli::args::{CheckArgs, ConfigAction, ConfigArgs, PlanArgs, PreviewArgs, ScanArgs};
use crate::cli::{Cli, Commands};
use crate::domain::model::{PatternTemplate, SplitMethod};
use crate::utils::format_file_size;
use crate::utils::path::PathUtils;

/// Dispatch the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let container = AppContainer::new(cli.config);

    match cli.command {
        Commands::Preview(args) => preview(&container, args),
        Commands::Check(args) => check(args),
        Commands::Plan(args) => plan(&container, args),
        Commands::Scan(args) => scan(args),
        Commands::Config(args) => config(&container, args),
    }
}

/// Execute the preview command
pub fn preview(container: &AppContainer, args: PreviewArgs) -> Result<()> {
    let planner = container.plan_interactor()?;
    let pattern = args
        .pattern
        .unwrap_or_else(|| planner.settings().naming_pattern.clone());

    let name = planner
        .preview(&pattern, &args.name, args.start, args.end, args.format.as_deref())
        .with_context(|| format!("Cannot preview pattern '{}'", pattern))?;

    println!("{}", name);
    Ok(())
}

/// Execute the check command
pub fn check(args: CheckArgs) -> Result<()> {
    let template = PatternTemplate::parse(&args.pattern)
        .with_context(|| format!("Invalid naming pattern '{}'", args.pattern))?;
    template
        .validate()
        .with_context(|| format!("Pattern '{}' cannot produce a valid file name", args.pattern))?;

    println!("ok");
    if !template.varies_by_index() {
        warn!("Pattern '{}' has no {{number}} placeholder", args.pattern);
        println!("note: pattern has no {{number}}; segments may receive identical names");
    }
    Ok(())
}

/// Execute the plan command
pub fn plan(container: &AppContainer, args: PlanArgs) -> Result<()> {
    let planner = container.plan_interactor()?;
    let overlap = args.overlap.unwrap_or(planner.settings().overlap_seconds);
    let method = split_method(&args, overlap);

    let request = PlanRequest {
        input: args.input.clone(),
        total_seconds: args.duration,
        method,
        pattern: args.pattern.clone(),
        format: args.format.clone(),
        output_dir: args.output_dir.clone(),
    };

    let split_plan = planner
        .plan(&request)
        .with_context(|| format!("Failed to plan split of {}", args.input.display()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&split_plan)
            .context("Failed to serialize plan to JSON")?;
        println!("{}", json);
    } else {
        display_plan(&split_plan);
    }

    if args.remember {
        remember_job(container, &split_plan)?;
    }
    Ok(())
}

fn split_method(args: &PlanArgs, overlap: f64) -> SplitMethod {
    if !args.range.is_empty() {
        SplitMethod::CustomRanges {
            ranges: args.range.clone(),
        }
    } else if let Some(duration) = args.segment {
        SplitMethod::FixedDuration { duration, overlap }
    } else {
        SplitMethod::EqualParts {
            parts: args.parts.unwrap_or(2),
            overlap,
        }
    }
}

/// Settings entries describing a planned job, parameters included
fn job_configuration(plan: &SplitPlan) -> Vec<(String, String)> {
    let mut configuration = vec![
        ("method".to_string(), plan.method.clone()),
        ("naming_pattern".to_string(), plan.pattern.clone()),
        ("output_format".to_string(), plan.format.clone()),
        ("output_directory".to_string(), plan.output_dir.display().to_string()),
    ];

    match &plan.split {
        SplitMethod::EqualParts { parts, overlap } => {
            configuration.push(("parts".to_string(), parts.to_string()));
            configuration.push(("overlap_seconds".to_string(), overlap.to_string()));
        }
        SplitMethod::FixedDuration { duration, overlap } => {
            configuration.push(("segment_seconds".to_string(), duration.to_string()));
            configuration.push(("overlap_seconds".to_string(), overlap.to_string()));
        }
        SplitMethod::CustomRanges { ranges } => {
            let ranges = ranges
                .iter()
                .map(|(start, end)| format!("{}-{}", start, end))
                .collect::<Vec<_>>()
                .join(",");
            configuration.push(("ranges".to_string(), ranges));
        }
    }
    configuration
}

fn remember_job(container: &AppContainer, plan: &SplitPlan) -> Result<()> {
    let configuration = job_configuration(plan);
    container
        .settings_interactor()
        .record_job(&plan.source.display().to_string(), configuration)
        .context("Failed to save settings")?;
    Ok(())
}

/// Execute the scan command
pub fn scan(args: ScanArgs) -> Result<()> {
    let files = PathUtils::collect_audio_files(&args.dir, args.recursive)
        .with_context(|| format!("Cannot scan {}", args.dir.display()))?;
    info!("Found {} audio files in {}", files.len(), args.dir.display());

    for file in files {
        let size = std::fs::metadata(&file).map(|m| m.len()).unwrap_or(0);
        println!("{}\t{}", file.display(), format_file_size(size));
    }
    Ok(())
}

/// Execute the config command
pub fn config(container: &AppContainer, args: ConfigArgs) -> Result<()> {
    let settings = container.settings_interactor();

    match args.action {
        ConfigAction::Show => {
            let current = settings.load().context("Failed to load settings")?;
            let rendered =
                toml::to_string_pretty(&current).context("Failed to render settings")?;
            print!("{}", rendered);
        }
        ConfigAction::Path => println!("{}", settings.location()),
        ConfigAction::SetPattern { pattern } => {
            settings
                .set_naming_pattern(&pattern)
                .with_context(|| format!("Cannot use naming pattern '{}'", pattern))?;
            println!("naming_pattern = {}", pattern);
        }
        ConfigAction::SetFormat { format } => {
            let updated = settings
                .set_output_format(&format)
                .with_context(|| format!("Cannot use output format '{}'", format))?;
            println!("output_format = {}", updated.output_format);
        }
        ConfigAction::Recent { clear } => {
            if clear {
                settings.clear_recent_files().context("Failed to save settings")?;
                println!("recent files cleared");
            } else {
                for file in settings.load().context("Failed to load settings")?.recent_files {
                    println!("{}", file);
                }
            }
        }
    }
    Ok(())
}

/// Display plan in human-readable format
fn display_plan(plan: &SplitPlan) {
    println!("Source: {}", plan.source.display());
    println!("Method: {}", plan.method);
    println!("Pattern: {}", plan.pattern);
    println!("Output: {}", plan.output_dir.display());
    println!();
    for segment in &plan.segments {
        println!(
            "{:>4}  {} - {}  {}",
            segment.index, segment.start, segment.end, segment.file_name
        );
    }
}

// Plan interactor - Orchestrates a split job up to the point where files would be written

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::app::naming_interactor::BatchNamer;
use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::domain::rules::SegmentPlanner;
use crate::domain::settings::{normalize_format, AppSettings};
use crate::error::SplitKitResult;
use crate::utils::path::PathUtils;

/// Output format keyword meaning "reuse the source extension"
pub const SAME_FORMAT: &str = "same";

/// Everything needed to plan one split job
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub input: PathBuf,
    pub total_seconds: f64,
    pub method: SplitMethod,
    /// Overrides the configured naming pattern
    pub pattern: Option<String>,
    /// Overrides the configured output format; `same` keeps the source format
    pub format: Option<String>,
    /// Overrides the configured output directory
    pub output_dir: Option<PathBuf>,
}

/// One output file of the plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedSegment {
    pub index: u32,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub start: String,
    pub end: String,
    pub file_name: String,
    pub output_path: PathBuf,
}

/// Validated, collision-free set of segments ready for the export stage
#[derive(Debug, Clone, Serialize)]
pub struct SplitPlan {
    pub source: PathBuf,
    pub method: String,
    /// Method parameters as resolved for this job
    pub split: SplitMethod,
    pub pattern: String,
    pub format: String,
    pub output_dir: PathBuf,
    pub segments: Vec<PlannedSegment>,
}

/// Interactor for the split planning use case
pub struct PlanInteractor {
    settings: AppSettings,
}

impl PlanInteractor {
    /// Create a planner on top of already-resolved settings
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Plan and name every segment; nothing touches the filesystem
    pub fn plan(&self, request: &PlanRequest) -> SplitKitResult<SplitPlan> {
        let original_name = PathUtils::get_stem(&request.input)?;
        let format = self.resolve_format(&request.input, request.format.as_deref())?;
        let pattern = request
            .pattern
            .clone()
            .unwrap_or_else(|| self.settings.naming_pattern.clone());
        let output_dir = self.resolve_output_dir(&request.input, request.output_dir.as_deref());

        info!(
            source = %request.input.display(),
            method = request.method.label(),
            pattern = %pattern,
            format = %format,
            "Planning split"
        );

        let namer = BatchNamer::from_pattern(&pattern)?;
        let contexts =
            SegmentPlanner::plan(&request.method, request.total_seconds, &original_name, &format)?;
        let names = namer.name_all(&contexts)?;

        let segments = contexts
            .iter()
            .zip(names)
            .map(|(context, name)| {
                let file_name = name.file_name();
                PlannedSegment {
                    index: context.index,
                    start_seconds: context.start_seconds,
                    end_seconds: context.end_seconds,
                    start: TimeSpec::from_seconds(context.start_seconds).to_string(),
                    end: TimeSpec::from_seconds(context.end_seconds).to_string(),
                    output_path: output_dir.join(&file_name),
                    file_name,
                }
            })
            .collect::<Vec<_>>();

        info!(segments = segments.len(), "Split planned");

        Ok(SplitPlan {
            source: request.input.clone(),
            method: request.method.label().to_string(),
            split: request.method.clone(),
            pattern,
            format,
            output_dir,
            segments,
        })
    }

    /// Name shown while the user edits the pattern, using the configured format
    pub fn preview(
        &self,
        pattern: &str,
        original_name: &str,
        start_seconds: f64,
        end_seconds: f64,
        format: Option<&str>,
    ) -> Result<ExpandedName, DomainError> {
        let extension = match format {
            Some(format) => normalize_format(format)?,
            None => self.settings.output_format.clone(),
        };
        let first = SegmentContext::new(original_name, 1, start_seconds, end_seconds)?
            .with_extension(extension);
        BatchNamer::from_pattern(pattern)?.preview(Some(&first))
    }

    fn resolve_format(&self, input: &Path, requested: Option<&str>) -> Result<String, DomainError> {
        let format = requested.unwrap_or(self.settings.output_format.as_str());
        if format.eq_ignore_ascii_case(SAME_FORMAT) {
            return normalize_format(&PathUtils::get_extension(input));
        }
        normalize_format(format)
    }

    fn resolve_output_dir(&self, input: &Path, requested: Option<&Path>) -> PathBuf {
        requested
            .map(Path::to_path_buf)
            .or_else(|| self.settings.output_directory.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathUtils::default_output_dir(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitKitError;

    fn request(method: SplitMethod) -> PlanRequest {
        PlanRequest {
            input: PathBuf::from("/music/MySong.wav"),
            total_seconds: 180.0,
            method,
            pattern: None,
            format: None,
            output_dir: None,
        }
    }

    #[test]
    fn test_plan_with_defaults() {
        let interactor = PlanInteractor::new(AppSettings::default());
        let plan = interactor
            .plan(&request(SplitMethod::EqualParts {
                parts: 3,
                overlap: 0.0,
            }))
            .unwrap();

        assert_eq!(plan.format, "mp3");
        assert_eq!(plan.output_dir, PathBuf::from("/music"));
        assert_eq!(plan.segments.len(), 3);
        assert_eq!(plan.segments[0].file_name, "MySong_part_001.mp3");
        assert_eq!(plan.segments[2].start, "02:00");
        assert_eq!(plan.segments[2].end, "03:00");
        assert_eq!(
            plan.segments[1].output_path,
            PathBuf::from("/music/MySong_part_002.mp3")
        );
    }

    #[test]
    fn test_same_format_keeps_source_extension() {
        let interactor = PlanInteractor::new(AppSettings::default());
        let mut req = request(SplitMethod::FixedDuration {
            duration: 60.0,
            overlap: 0.0,
        });
        req.format = Some("same".to_string());
        req.output_dir = Some(PathBuf::from("/out"));
        req.pattern = Some("{original_name}_({start_time}-{end_time})".to_string());

        let plan = interactor.plan(&req).unwrap();
        assert_eq!(plan.format, "wav");
        let names: Vec<_> = plan.segments.iter().map(|s| s.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "MySong_(00:00-01:00).wav",
                "MySong_(01:00-02:00).wav",
                "MySong_(02:00-03:00).wav"
            ]
        );
        assert_eq!(plan.output_dir, PathBuf::from("/out"));
    }

    #[test]
    fn test_settings_output_directory_is_used() {
        let settings = AppSettings {
            output_directory: Some("/exports".to_string()),
            ..AppSettings::default()
        };
        let plan = PlanInteractor::new(settings)
            .plan(&request(SplitMethod::EqualParts {
                parts: 2,
                overlap: 0.0,
            }))
            .unwrap();
        assert_eq!(plan.output_dir, PathBuf::from("/exports"));
    }

    #[test]
    fn test_duplicate_names_fail_the_plan() {
        let interactor = PlanInteractor::new(AppSettings::default());
        let mut req = request(SplitMethod::EqualParts {
            parts: 2,
            overlap: 0.0,
        });
        req.pattern = Some("{original_name}".to_string());

        assert!(matches!(
            interactor.plan(&req),
            Err(SplitKitError::Domain(DomainError::DuplicateName { .. }))
        ));
    }

    #[test]
    fn test_unsupported_format() {
        let interactor = PlanInteractor::new(AppSettings::default());
        let mut req = request(SplitMethod::EqualParts {
            parts: 2,
            overlap: 0.0,
        });
        req.format = Some("mp4".to_string());
        assert!(interactor.plan(&req).is_err());
    }

    #[test]
    fn test_preview_uses_configured_format() {
        let interactor = PlanInteractor::new(AppSettings::default());
        let name = interactor
            .preview("{original_name}_{number:03d}", "Track", 0.0, 30.0, None)
            .unwrap();
        assert_eq!(name.file_name(), "Track_001.mp3");

        let name = interactor
            .preview("{original_name}", "Track", 0.0, 30.0, Some("FLAC"))
            .unwrap();
        assert_eq!(name.file_name(), "Track.flac");
    }
}

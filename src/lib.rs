//! SplitKit Library
//!
//! Plans how an audio file is cut into segments (equal parts, fixed durations
//! or custom ranges) and turns a naming pattern such as
//! `{original_name}_part_{number:03d}` into the file name of every segment.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{BatchNamer, PlanInteractor, PlanRequest, PlannedSegment, SplitPlan};
pub use domain::errors::{DomainError, PatternError};
pub use domain::model::{
    expand, ExpandedName, PatternPart, PatternTemplate, Placeholder, SegmentContext, SplitMethod,
    TimeSpec, DEFAULT_NAMING_PATTERN,
};
pub use domain::rules::{DuplicateNameDetector, NameValidator, SegmentPlanner};
pub use domain::settings::AppSettings;
pub use error::{SplitKitError, SplitKitResult};

// Domain rules - Business logic and policies

use std::collections::HashMap;

use tracing::warn;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Characters no segment file name may contain
pub const FORBIDDEN_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Device names Windows refuses as file stems, with or without an extension
pub const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Filesystem-safety rules for expanded names
pub struct NameValidator;

impl NameValidator {
    /// First character in `text` that cannot appear in a file name
    pub fn forbidden_char(text: &str) -> Option<char> {
        text.chars()
            .find(|c| FORBIDDEN_CHARS.contains(c) || c.is_ascii_control())
    }

    /// Reject user-supplied text (literal template text or the source name) carrying forbidden characters
    pub fn check_component(text: &str, index: u32, what: &str) -> Result<(), DomainError> {
        match Self::forbidden_char(text) {
            Some(ch) => Err(DomainError::InvalidName {
                index,
                name: text.to_string(),
                reason: format!("{} contains forbidden character {:?}", what, ch),
            }),
            None => Ok(()),
        }
    }

    /// Whole-stem checks: emptiness, dot names and reserved device names
    pub fn check_stem(stem: &str, index: u32) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidName {
            index,
            name: stem.to_string(),
            reason: reason.to_string(),
        };

        if stem.trim().is_empty() {
            return Err(invalid("file name is empty"));
        }
        if stem == "." || stem == ".." {
            return Err(invalid("file name is a directory reference"));
        }
        if Self::is_reserved(stem) {
            return Err(invalid("file name is a reserved device name"));
        }
        Ok(())
    }

    fn is_reserved(stem: &str) -> bool {
        let base = stem.split('.').next().unwrap_or(stem).trim().to_ascii_uppercase();
        RESERVED_NAMES.contains(&base.as_str())
    }
}

/// Batch-level uniqueness check run before any segment is written
pub struct DuplicateNameDetector;

impl DuplicateNameDetector {
    /// Fail on the first name claimed by two segments; comparison ignores ASCII case
    pub fn check<'a, I>(names: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (u32, &'a ExpandedName)>,
    {
        let mut seen: HashMap<String, u32> = HashMap::new();

        for (index, name) in names {
            let file_name = name.file_name();
            if let Some(first_index) = seen.insert(file_name.to_ascii_lowercase(), index) {
                return Err(DomainError::DuplicateName {
                    name: file_name,
                    first_index,
                    second_index: index,
                });
            }
        }
        Ok(())
    }
}

/// Turns a split method and a known source duration into segment contexts
pub struct SegmentPlanner;

impl SegmentPlanner {
    /// Plan every segment for a source of `total_seconds`
    pub fn plan(
        method: &SplitMethod,
        total_seconds: f64,
        original_name: &str,
        extension: &str,
    ) -> Result<Vec<SegmentContext>, DomainError> {
        if !total_seconds.is_finite() || total_seconds <= 0.0 {
            return Err(DomainError::InvalidSegment(format!(
                "Source duration must be positive, got {}",
                total_seconds
            )));
        }

        let bounds = match method {
            SplitMethod::EqualParts { parts, overlap } => {
                Self::equal_parts(*parts, *overlap, total_seconds)?
            }
            SplitMethod::FixedDuration { duration, overlap } => {
                Self::fixed_duration(*duration, *overlap, total_seconds)?
            }
            SplitMethod::CustomRanges { ranges } => Self::custom_ranges(ranges, total_seconds)?,
        };

        bounds
            .into_iter()
            .enumerate()
            .map(|(i, (start, end))| {
                SegmentContext::new(original_name, i as u32 + 1, start, end)
                    .map(|context| context.with_extension(extension))
            })
            .collect()
    }

    fn check_overlap(overlap: f64) -> Result<(), DomainError> {
        if !overlap.is_finite() || overlap < 0.0 {
            return Err(DomainError::BadArgs(format!(
                "Overlap must be zero or positive, got {}",
                overlap
            )));
        }
        Ok(())
    }

    fn equal_parts(parts: u32, overlap: f64, total: f64) -> Result<Vec<(f64, f64)>, DomainError> {
        if parts < 2 {
            return Err(DomainError::BadArgs(
                "Number of parts must be at least 2".to_string(),
            ));
        }
        if parts > MAX_SEGMENTS {
            return Err(DomainError::BadArgs(format!(
                "Number of parts must be at most {}",
                MAX_SEGMENTS
            )));
        }
        Self::check_overlap(overlap)?;

        let part = total / parts as f64;
        Ok((0..parts)
            .map(|i| {
                let start = (i as f64 * part - overlap).max(0.0);
                let end = ((i + 1) as f64 * part + overlap).min(total);
                (start, end)
            })
            .collect())
    }

    fn fixed_duration(
        duration: f64,
        overlap: f64,
        total: f64,
    ) -> Result<Vec<(f64, f64)>, DomainError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DomainError::BadArgs(
                "Segment duration must be greater than 0".to_string(),
            ));
        }
        Self::check_overlap(overlap)?;
        if overlap >= duration {
            return Err(DomainError::BadArgs(format!(
                "Overlap ({}s) must be shorter than the segment duration ({}s)",
                overlap, duration
            )));
        }

        let step = duration - overlap;
        let count = ((total - duration).max(0.0) / step).ceil() + 1.0;
        if count > MAX_SEGMENTS as f64 {
            return Err(DomainError::BadArgs(format!(
                "Segment duration {}s would cut {}s into more than {} segments",
                duration, total, MAX_SEGMENTS
            )));
        }

        let mut bounds = Vec::with_capacity(count as usize);
        for i in 0..=count as u32 {
            // Multiply instead of accumulating so float drift cannot add a sliver segment.
            let start = i as f64 * step;
            if start >= total {
                break;
            }
            let end = (start + duration).min(total);
            bounds.push((start, end));
            if end >= total {
                break;
            }
        }
        Ok(bounds)
    }

    fn custom_ranges(ranges: &[(f64, f64)], total: f64) -> Result<Vec<(f64, f64)>, DomainError> {
        if ranges.is_empty() {
            return Err(DomainError::InvalidSegment(
                "No time ranges specified".to_string(),
            ));
        }

        let mut bounds = Vec::with_capacity(ranges.len());
        for &(start, end) in ranges {
            let clamped_start = start.max(0.0);
            let clamped_end = end.min(total);
            if !start.is_finite()
                || !end.is_finite()
                || clamped_start >= clamped_end
                || clamped_start >= total
            {
                warn!(start, end, total, "Skipping invalid range");
                continue;
            }
            bounds.push((clamped_start, clamped_end));
        }

        if bounds.is_empty() {
            return Err(DomainError::InvalidSegment(
                "None of the time ranges fall inside the source".to_string(),
            ));
        }
        Ok(bounds)
    }
}

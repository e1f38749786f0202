// Domain models - Core types and data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, PatternError};
use crate::domain::rules::NameValidator;

/// Largest zero-pad width accepted by `{number:0Nd}`
pub const MAX_PAD_WIDTH: usize = 64;

/// Most segments a single job may plan
pub const MAX_SEGMENTS: u32 = 10_000;

/// Pattern used when neither the user nor the settings file supplies one
pub const DEFAULT_NAMING_PATTERN: &str = "{original_name}_part_{number:03d}";

/// Time offset in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Parse `seconds`, `MM:SS` or `HH:MM:SS`, fractional seconds allowed
    pub fn parse(time_str: &str) -> Result<Self, DomainError> {
        let trimmed = time_str.trim();

        if let Ok(seconds) = trimmed.parse::<f64>() {
            if !seconds.is_finite() {
                return Err(DomainError::BadArgs(format!("Time must be finite: {}", trimmed)));
            }
            if seconds < 0.0 {
                return Err(DomainError::BadArgs("Time cannot be negative".to_string()));
            }
            return Ok(Self::from_seconds(seconds));
        }

        let parts: Vec<&str> = trimmed.split(':').collect();
        let bad = |what: &str| DomainError::BadArgs(format!("Invalid {} in time '{}'", what, trimmed));

        match parts.as_slice() {
            [minutes, seconds] => {
                let minutes = minutes.parse::<u32>().map_err(|_| bad("minutes"))?;
                let seconds = Self::parse_seconds_field(seconds).ok_or_else(|| bad("seconds"))?;
                Ok(Self::from_seconds(minutes as f64 * 60.0 + seconds))
            }
            [hours, minutes, seconds] => {
                let hours = hours.parse::<u32>().map_err(|_| bad("hours"))?;
                let minutes = minutes.parse::<u32>().map_err(|_| bad("minutes"))?;
                if minutes >= 60 {
                    return Err(DomainError::BadArgs("Minutes must be less than 60".to_string()));
                }
                let seconds = Self::parse_seconds_field(seconds).ok_or_else(|| bad("seconds"))?;
                Ok(Self::from_seconds(
                    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds,
                ))
            }
            _ => Err(DomainError::BadArgs(format!(
                "Invalid time '{}'. Supported formats: seconds (e.g. 90.5), MM:SS (e.g. 01:30), HH:MM:SS (e.g. 1:02:30)",
                trimmed
            ))),
        }
    }

    fn parse_seconds_field(field: &str) -> Option<f64> {
        if field.starts_with('-') || field.starts_with('+') {
            return None;
        }
        field
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite() && *s < 60.0)
    }

    /// Render as zero-padded `MM:SS`, minutes growing past 59 instead of rolling into hours
    pub fn format_clock(&self) -> String {
        let total = self.seconds.max(0.0).round() as u64;
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_clock())
    }
}

/// One placeholder kind recognized inside `{...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{original_name}`
    OriginalName,
    /// `{number}` or `{number:0Nd}`
    Number { width: Option<usize> },
    /// `{start_time}`
    StartTime,
    /// `{end_time}`
    EndTime,
}

impl Placeholder {
    /// Parse the text between the braces; names are case-sensitive and whitespace is not trimmed
    fn parse(body: &str, position: usize) -> Result<Self, PatternError> {
        if body.is_empty() {
            return Err(PatternError::EmptyPlaceholder { position });
        }

        let (name, spec) = match body.split_once(':') {
            Some((name, spec)) => (name, Some(spec)),
            None => (body, None),
        };

        let plain = |placeholder: Placeholder| match spec {
            None => Ok(placeholder),
            Some(spec) => Err(PatternError::UnsupportedFormat {
                token: name.to_string(),
                spec: spec.to_string(),
            }),
        };

        match name {
            "original_name" => plain(Placeholder::OriginalName),
            "start_time" => plain(Placeholder::StartTime),
            "end_time" => plain(Placeholder::EndTime),
            "number" => {
                let width = spec.map(Self::parse_pad_width).transpose()?;
                Ok(Placeholder::Number { width })
            }
            _ => Err(PatternError::UnknownToken {
                token: body.to_string(),
            }),
        }
    }

    /// `0Nd` -> N
    fn parse_pad_width(spec: &str) -> Result<usize, PatternError> {
        let malformed = || PatternError::MalformedNumberFormat {
            spec: spec.to_string(),
        };

        let digits = spec
            .strip_prefix('0')
            .and_then(|rest| rest.strip_suffix('d'))
            .ok_or_else(malformed)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        // Anything that overflows usize is far past the cap anyway.
        let width = digits.parse::<usize>().unwrap_or(usize::MAX);
        if width > MAX_PAD_WIDTH {
            return Err(PatternError::PadWidthTooLarge {
                width,
                max: MAX_PAD_WIDTH,
            });
        }
        Ok(width)
    }

    /// Whether the rendered value is guaranteed to differ between segments
    pub fn varies_by_index(&self) -> bool {
        matches!(self, Placeholder::Number { .. })
    }

    fn render(&self, context: &SegmentContext) -> String {
        match self {
            Placeholder::OriginalName => context.original_name.clone(),
            Placeholder::Number { width: Some(width) } => {
                format!("{:0width$}", context.index, width = *width)
            }
            Placeholder::Number { width: None } => context.index.to_string(),
            Placeholder::StartTime => TimeSpec::from_seconds(context.start_seconds).to_string(),
            Placeholder::EndTime => TimeSpec::from_seconds(context.end_seconds).to_string(),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::OriginalName => write!(f, "{{original_name}}"),
            Placeholder::Number { width: Some(width) } => write!(f, "{{number:0{}d}}", width),
            Placeholder::Number { width: None } => write!(f, "{{number}}"),
            Placeholder::StartTime => write!(f, "{{start_time}}"),
            Placeholder::EndTime => write!(f, "{{end_time}}"),
        }
    }
}

/// A compiled piece of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternPart {
    Literal(String),
    Placeholder(Placeholder),
}

/// Immutable, pre-validated naming template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTemplate {
    source: String,
    parts: Vec<PatternPart>,
}

impl PatternTemplate {
    /// Compile a template, rejecting unknown tokens and malformed grammar
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().enumerate().peekable();

        while let Some((position, ch)) = chars.next() {
            match ch {
                '{' => {
                    if matches!(chars.peek(), Some((_, '{'))) {
                        chars.next();
                        literal.push('{');
                        continue;
                    }

                    let mut body = String::new();
                    let mut closed = false;
                    for (inner_position, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(PatternError::NestedBrace {
                                    position: inner_position,
                                })
                            }
                            other => body.push(other),
                        }
                    }
                    if !closed {
                        return Err(PatternError::UnterminatedPlaceholder { position });
                    }

                    let placeholder = Placeholder::parse(&body, position)?;
                    if !literal.is_empty() {
                        parts.push(PatternPart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(PatternPart::Placeholder(placeholder));
                }
                '}' => {
                    if matches!(chars.peek(), Some((_, '}'))) {
                        chars.next();
                        literal.push('}');
                    } else {
                        return Err(PatternError::UnmatchedClosingBrace { position });
                    }
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            parts.push(PatternPart::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }

    /// Original template text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn parts(&self) -> &[PatternPart] {
        &self.parts
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.parts.iter().filter_map(|part| match part {
            PatternPart::Placeholder(placeholder) => Some(placeholder),
            PatternPart::Literal(_) => None,
        })
    }

    /// True when at least one token is guaranteed to change with the segment index
    pub fn varies_by_index(&self) -> bool {
        self.placeholders().any(Placeholder::varies_by_index)
    }

    /// Substitute every placeholder for one segment and validate the result
    pub fn expand(&self, context: &SegmentContext) -> Result<ExpandedName, DomainError> {
        let mut stem = String::new();

        for part in &self.parts {
            match part {
                PatternPart::Literal(text) => {
                    NameValidator::check_component(text, context.index, "pattern text")?;
                    stem.push_str(text);
                }
                PatternPart::Placeholder(placeholder) => {
                    let value = placeholder.render(context);
                    if matches!(placeholder, Placeholder::OriginalName) {
                        NameValidator::check_component(&value, context.index, "original name")?;
                    }
                    stem.push_str(&value);
                }
            }
        }

        let extension = context.extension.trim_start_matches('.');
        let appended = if extension.is_empty() || self.ends_with_extension(extension) {
            None
        } else {
            Some(extension.to_string())
        };

        NameValidator::check_stem(&stem, context.index)?;

        Ok(ExpandedName {
            stem,
            extension: appended,
        })
    }

    /// Render the live example shown while a pattern is being edited
    pub fn preview(&self, first_segment: &SegmentContext) -> Result<ExpandedName, DomainError> {
        let mut context = first_segment.clone();
        context.index = 1;
        self.expand(&context)
    }

    /// Expand against a synthetic segment so name errors surface before a job starts
    pub fn validate(&self) -> Result<(), DomainError> {
        self.expand(&SegmentContext::synthetic()).map(|_| ())
    }

    fn ends_with_extension(&self, extension: &str) -> bool {
        match self.parts.last() {
            Some(PatternPart::Literal(text)) => {
                let suffix = format!(".{}", extension.to_ascii_lowercase());
                text.to_ascii_lowercase().ends_with(&suffix)
            }
            _ => false,
        }
    }
}

impl FromStr for PatternTemplate {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Default for PatternTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_NAMING_PATTERN.to_string(),
            parts: vec![
                PatternPart::Placeholder(Placeholder::OriginalName),
                PatternPart::Literal("_part_".to_string()),
                PatternPart::Placeholder(Placeholder::Number { width: Some(3) }),
            ],
        }
    }
}

impl fmt::Display for PatternTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Per-segment data a template is expanded against
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentContext {
    /// Source base name, extension already stripped
    pub original_name: String,
    /// 1-based, contiguous within a job
    pub index: u32,
    pub start_seconds: f64,
    pub end_seconds: f64,
    /// Output extension without the dot; empty for none
    pub extension: String,
}

impl SegmentContext {
    /// Create a context, rejecting indices below 1 and empty or inverted ranges
    pub fn new(
        original_name: impl Into<String>,
        index: u32,
        start_seconds: f64,
        end_seconds: f64,
    ) -> Result<Self, DomainError> {
        if index == 0 {
            return Err(DomainError::InvalidSegment(
                "Segment index is 1-based and cannot be 0".to_string(),
            ));
        }
        if !start_seconds.is_finite() || !end_seconds.is_finite() {
            return Err(DomainError::InvalidSegment(format!(
                "Segment {} has non-finite bounds",
                index
            )));
        }
        if start_seconds < 0.0 {
            return Err(DomainError::InvalidSegment(format!(
                "Segment {} starts before 0 ({})",
                index, start_seconds
            )));
        }
        if end_seconds <= start_seconds {
            return Err(DomainError::InvalidSegment(format!(
                "Segment {} must end after it starts ({} >= {})",
                index, start_seconds, end_seconds
            )));
        }

        Ok(Self {
            original_name: original_name.into(),
            index,
            start_seconds,
            end_seconds,
            extension: String::new(),
        })
    }

    /// Set the output extension; a leading dot is dropped
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Stand-in segment used for static validation and empty previews
    pub fn synthetic() -> Self {
        Self {
            original_name: "example".to_string(),
            index: 1,
            start_seconds: 0.0,
            end_seconds: 60.0,
            extension: String::new(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// Literal output file name for one segment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    stem: String,
    extension: Option<String>,
}

impl ExpandedName {
    /// Substituted template text, before any appended extension
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Extension appended by the expander, if the template did not carry one
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn file_name(&self) -> String {
        match &self.extension {
            Some(extension) => format!("{}.{}", self.stem, extension),
            None => self.stem.clone(),
        }
    }
}

impl fmt::Display for ExpandedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Expand `template` once for `context`
pub fn expand(template: &str, context: &SegmentContext) -> Result<ExpandedName, DomainError> {
    PatternTemplate::parse(template)?.expand(context)
}

/// How a source is cut into segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SplitMethod {
    /// Same-length parts, optionally widened by `overlap` on each side
    EqualParts { parts: u32, overlap: f64 },
    /// Consecutive windows of `duration`, each starting `duration - overlap` after the previous
    FixedDuration { duration: f64, overlap: f64 },
    /// Explicit `(start, end)` ranges in seconds
    CustomRanges { ranges: Vec<(f64, f64)> },
}

impl SplitMethod {
    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            SplitMethod::EqualParts { .. } => "equal_parts",
            SplitMethod::FixedDuration { .. } => "fixed_duration",
            SplitMethod::CustomRanges { .. } => "custom_ranges",
        }
    }
}

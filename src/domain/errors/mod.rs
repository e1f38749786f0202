// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Why a naming pattern failed to compile
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Placeholder name is not one of the recognized tokens
    #[error("unknown placeholder '{{{token}}}'")]
    UnknownToken { token: String },

    /// Token does not accept a format spec at all
    #[error("placeholder '{token}' does not accept a format spec (got ':{spec}')")]
    UnsupportedFormat { token: String, spec: String },

    /// Number format spec is not of the form `0Nd`
    #[error("malformed number format ':{spec}', expected ':0Nd' such as ':03d'")]
    MalformedNumberFormat { spec: String },

    /// Zero-pad width exceeds the supported maximum
    #[error("pad width {width} exceeds the maximum of {max}")]
    PadWidthTooLarge { width: usize, max: usize },

    /// `{` without a closing `}`
    #[error("unterminated placeholder starting at position {position}")]
    UnterminatedPlaceholder { position: usize },

    /// `}` outside a placeholder and not escaped as `}}`
    #[error("unmatched '}}' at position {position}")]
    UnmatchedClosingBrace { position: usize },

    /// `{` inside a placeholder
    #[error("nested '{{' at position {position}")]
    NestedBrace { position: usize },

    /// `{}`
    #[error("empty placeholder at position {position}")]
    EmptyPlaceholder { position: usize },
}

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The naming template itself is malformed
    #[error("Invalid naming pattern: {0}")]
    InvalidPattern(#[from] PatternError),

    /// An expansion produced a name the filesystem cannot hold
    #[error("Invalid file name for segment {index}: '{name}' ({reason})")]
    InvalidName {
        index: u32,
        name: String,
        reason: String,
    },

    /// Two segments of one job would be written to the same file
    #[error("Duplicate file name '{name}' for segments {first_index} and {second_index}")]
    DuplicateName {
        name: String,
        first_index: u32,
        second_index: u32,
    },

    /// Segment bounds or ordering are not usable
    #[error("Invalid segment: {0}")]
    InvalidSegment(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),
}

impl DomainError {
    /// Segment index the error refers to, if any
    pub fn segment_index(&self) -> Option<u32> {
        match self {
            DomainError::InvalidName { index, .. } => Some(*index),
            DomainError::DuplicateName { second_index, .. } => Some(*second_index),
            _ => None,
        }
    }
}

// Naming interactor - Expands one template across every segment of a job

use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::domain::rules::DuplicateNameDetector;

/// Names all segments of a split job, or the single preview example
pub struct BatchNamer {
    template: PatternTemplate,
}

impl BatchNamer {
    pub fn new(template: PatternTemplate) -> Self {
        Self { template }
    }

    /// Compile `pattern` and bind it to a namer
    pub fn from_pattern(pattern: &str) -> Result<Self, DomainError> {
        Ok(Self::new(PatternTemplate::parse(pattern)?))
    }

    pub fn template(&self) -> &PatternTemplate {
        &self.template
    }

    /// Expand every context in index order, then reject the batch if two names collide
    pub fn name_all(&self, contexts: &[SegmentContext]) -> Result<Vec<ExpandedName>, DomainError> {
        for (position, context) in contexts.iter().enumerate() {
            let expected = position as u32 + 1;
            if context.index != expected {
                return Err(DomainError::InvalidSegment(format!(
                    "Segment indices must run 1..=N in order; expected {} but got {}",
                    expected, context.index
                )));
            }
        }

        let names = contexts
            .iter()
            .map(|context| {
                let name = self.template.expand(context)?;
                debug!(index = context.index, name = %name, "Expanded segment name");
                Ok(name)
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        DuplicateNameDetector::check(contexts.iter().map(|c| c.index).zip(names.iter()))?;
        Ok(names)
    }

    /// Example name for the first planned segment, or a synthetic one when nothing is planned yet
    pub fn preview(&self, first_segment: Option<&SegmentContext>) -> Result<ExpandedName, DomainError> {
        match first_segment {
            Some(context) => self.template.preview(context),
            None => self.template.preview(&SegmentContext::synthetic()),
        }
    }
}

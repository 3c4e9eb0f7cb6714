use thiserror::Error;

/// Failures reported at the scheduling call boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A precondition on the call's parameters was violated.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Randomised block construction ran out of redraws.
    #[error("generation failed: {reason}")]
    GenerationFailure { reason: String },
}

impl ScheduleError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ScheduleError::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn generation(reason: impl Into<String>) -> Self {
        ScheduleError::GenerationFailure {
            reason: reason.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ScheduleError::InvalidArgument { .. })
    }

    pub fn is_generation_failure(&self) -> bool {
        matches!(self, ScheduleError::GenerationFailure { .. })
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = ScheduleError::invalid("duration must be positive");
        assert_eq!(err.to_string(), "invalid argument: duration must be positive");
        assert!(err.is_invalid_argument());
        assert!(!err.is_generation_failure());
    }
}

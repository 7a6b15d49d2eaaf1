use thiserror::Error;

/// Rejection of an evaluation input at the validation boundary.
///
/// These are contract violations: the caller has to fix the input, retrying
/// the same call will fail the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("{field}: invalid measurement {value} - {reason}")]
    InvalidMeasurement {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("{field}: invalid category '{value}' (expected one of {expected})")]
    InvalidCategory {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{field}: unknown unit '{value}'")]
    InvalidUnit { field: &'static str, value: String },
}

impl ScoringError {
    pub fn field(&self) -> &'static str {
        match self {
            ScoringError::InvalidMeasurement { field, .. }
            | ScoringError::InvalidCategory { field, .. }
            | ScoringError::InvalidUnit { field, .. } => field,
        }
    }
}

pub mod engine;
pub mod error;
pub mod factors;
pub mod types;
pub mod validation;

pub use engine::{
    classify, classify_input, contributions, severity_class, EvaluationInput, EvaluationResult,
    FactorContribution, ScoreBreakdown, SeverityClass,
};
pub use error::ScoringError;
pub use factors::{
    score_abrasiveness, score_belt_speed, score_belt_width, score_moisture, score_splice_type,
    Band, RangeOp,
};
pub use types::{Abrasiveness, Dimension, Moisture, SpliceType};
pub use validation::{
    classify_checked, splice_speed_mismatch, validate_input, CheckedInput, EnteredMeasurements,
    RawEvaluationInput,
};

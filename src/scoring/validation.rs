use serde::{Deserialize, Serialize};

use super::engine::{classify_input, EvaluationInput, EvaluationResult};
use super::error::ScoringError;
use super::types::{Abrasiveness, Moisture, SpliceType, MECHANICAL_SPLICE_SPEED_THRESHOLD_FPM};
use crate::units::{Speed, SpeedUnit, UnitPreferences, Width, WidthUnit};

/// Evaluation input as it arrives from the command line or a batch file:
/// numbers with optional units, categories as free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEvaluationInput {
    pub width: f64,
    #[serde(default)]
    pub width_unit: Option<String>,
    pub speed: f64,
    #[serde(default)]
    pub speed_unit: Option<String>,
    pub splice: String,
    pub abrasiveness: String,
    pub moisture: String,
    #[serde(default)]
    pub conveyor: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// The measurements as entered, before conversion to canonical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnteredMeasurements {
    pub width: Width,
    pub speed: Speed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckedInput {
    pub entered: EnteredMeasurements,
    pub input: EvaluationInput,
}

fn check_measurement(field: &'static str, value: f64) -> Result<f64, ScoringError> {
    let reason = if value.is_nan() {
        "not a number"
    } else if value.is_infinite() {
        "must be finite"
    } else if value < 0.0 {
        "must not be negative"
    } else if value == 0.0 {
        "must be greater than zero"
    } else {
        return Ok(value);
    };
    Err(ScoringError::InvalidMeasurement {
        field,
        value,
        reason,
    })
}

/// Reject an entered value whose canonical conversion overflows to infinity
/// or underflows to zero.
fn check_converted(
    field: &'static str,
    entered: f64,
    canonical: f64,
) -> Result<f64, ScoringError> {
    if canonical.is_finite() && canonical > 0.0 {
        Ok(entered)
    } else {
        Err(ScoringError::InvalidMeasurement {
            field,
            value: entered,
            reason: "out of range after unit conversion",
        })
    }
}

fn unit_or_default<U: std::str::FromStr<Err = ScoringError>>(
    unit: Option<&str>,
    default: U,
) -> Result<U, ScoringError> {
    match unit {
        Some(s) => s.parse(),
        None => Ok(default),
    }
}

/// Validate raw input and convert it to canonical units.
/// Returns all validation errors at once (not just the first), in field order.
pub fn validate_input(
    raw: &RawEvaluationInput,
    units: UnitPreferences,
) -> Result<CheckedInput, Vec<ScoringError>> {
    let mut errors = Vec::new();

    let width_unit = unit_or_default::<WidthUnit>(raw.width_unit.as_deref(), units.width)
        .map_err(|e| errors.push(e))
        .ok();
    let width = check_measurement("width", raw.width)
        .and_then(|value| match width_unit {
            Some(unit) => check_converted("width", value, Width::new(value, unit).to_inches()),
            None => Ok(value),
        })
        .map_err(|e| errors.push(e))
        .ok();

    let speed_unit = unit_or_default::<SpeedUnit>(raw.speed_unit.as_deref(), units.speed)
        .map_err(|e| errors.push(e))
        .ok();
    let speed = check_measurement("speed", raw.speed)
        .and_then(|value| match speed_unit {
            Some(unit) => check_converted("speed", value, Speed::new(value, unit).to_fpm()),
            None => Ok(value),
        })
        .map_err(|e| errors.push(e))
        .ok();

    let splice = raw
        .splice
        .parse::<SpliceType>()
        .map_err(|e| errors.push(e))
        .ok();
    let abrasiveness = raw
        .abrasiveness
        .parse::<Abrasiveness>()
        .map_err(|e| errors.push(e))
        .ok();
    let moisture = raw
        .moisture
        .parse::<Moisture>()
        .map_err(|e| errors.push(e))
        .ok();

    match (width_unit, width, speed_unit, speed, splice, abrasiveness, moisture) {
        (
            Some(width_unit),
            Some(width),
            Some(speed_unit),
            Some(speed),
            Some(splice),
            Some(abrasiveness),
            Some(moisture),
        ) if errors.is_empty() => {
            let entered = EnteredMeasurements {
                width: Width::new(width, width_unit),
                speed: Speed::new(speed, speed_unit),
            };
            Ok(CheckedInput {
                entered,
                input: EvaluationInput {
                    width_in: entered.width.to_inches(),
                    speed_fpm: entered.speed.to_fpm(),
                    splice,
                    abrasiveness,
                    moisture,
                },
            })
        }
        _ => Err(errors),
    }
}

/// Validate, convert and classify in one step.
pub fn classify_checked(
    raw: &RawEvaluationInput,
    units: UnitPreferences,
) -> Result<EvaluationResult, Vec<ScoringError>> {
    validate_input(raw, units).map(|checked| classify_input(&checked.input))
}

/// Warn when a mechanical splice category disagrees with the measured belt
/// speed. The selected category is still what gets scored.
pub fn splice_speed_mismatch(splice: SpliceType, speed_fpm: f64) -> Option<String> {
    if !splice.is_mechanical() {
        return None;
    }
    let derived = SpliceType::from_mechanical(true, speed_fpm);
    if derived == splice {
        return None;
    }
    Some(format!(
        "splice {} selected but belt speed {:.0} fpm is {} the {} fpm mechanical splice threshold (suggests {})",
        splice,
        speed_fpm,
        if speed_fpm >= MECHANICAL_SPLICE_SPEED_THRESHOLD_FPM {
            "at or above"
        } else {
            "below"
        },
        MECHANICAL_SPLICE_SPEED_THRESHOLD_FPM,
        derived
    ))
}

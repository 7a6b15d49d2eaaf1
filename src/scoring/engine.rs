use serde::{Deserialize, Serialize};
use std::fmt;

use super::factors::{
    belt_speed_band, belt_width_band, score_abrasiveness, score_belt_speed, score_belt_width,
    score_moisture, score_splice_type,
};
use super::types::{Abrasiveness, Dimension, Moisture, SpliceType};

/// Validated input in canonical units (inches, feet per minute).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationInput {
    pub width_in: f64,
    pub speed_fpm: f64,
    pub splice: SpliceType,
    pub abrasiveness: Abrasiveness,
    pub moisture: Moisture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub belt_width: u32,
    pub belt_speed: u32,
    pub splice_type: u32,
    pub abrasiveness: u32,
    pub moisture: u32,
}

impl ScoreBreakdown {
    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::BeltWidth => self.belt_width,
            Dimension::BeltSpeed => self.belt_speed,
            Dimension::SpliceType => self.splice_type,
            Dimension::Abrasiveness => self.abrasiveness,
            Dimension::Moisture => self.moisture,
        }
    }

    /// Sub-scores in `Dimension::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u32)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    pub fn sum(&self) -> u32 {
        self.iter().map(|(_, score)| score).sum()
    }
}

/// CEMA 576 severity class, 1 (lightest) through 5 (most severe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SeverityClass(u8);

impl SeverityClass {
    pub const MIN: SeverityClass = SeverityClass(1);
    pub const MAX: SeverityClass = SeverityClass(5);

    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(SeverityClass(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for SeverityClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SeverityClass::new(value)
            .ok_or_else(|| format!("severity class must be 1-5, got {}", value))
    }
}

impl From<SeverityClass> for u8 {
    fn from(class: SeverityClass) -> u8 {
        class.0
    }
}

impl fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub total: u32,
    pub severity_class: SeverityClass,
    pub breakdown: ScoreBreakdown,
}

/// Map a severity total to its class: <=6, 7-10, 11-15, 16-23, >=24.
pub fn severity_class(total: u32) -> SeverityClass {
    let class = match total {
        0..=6 => 1,
        7..=10 => 2,
        11..=15 => 3,
        16..=23 => 4,
        _ => 5,
    };
    SeverityClass(class)
}

/// Score all five dimensions and classify the total.
///
/// Performs no validation: widths and speeds flow straight through the band
/// tables. Use [`super::classify_checked`] for input from outside the crate.
pub fn classify(
    width_in: f64,
    speed_fpm: f64,
    splice: SpliceType,
    abrasiveness: Abrasiveness,
    moisture: Moisture,
) -> EvaluationResult {
    let breakdown = ScoreBreakdown {
        belt_width: score_belt_width(width_in),
        belt_speed: score_belt_speed(speed_fpm),
        splice_type: score_splice_type(splice),
        abrasiveness: score_abrasiveness(abrasiveness),
        moisture: score_moisture(moisture),
    };
    let total = breakdown.sum();

    EvaluationResult {
        total,
        severity_class: severity_class(total),
        breakdown,
    }
}

pub fn classify_input(input: &EvaluationInput) -> EvaluationResult {
    classify(
        input.width_in,
        input.speed_fpm,
        input.splice,
        input.abrasiveness,
        input.moisture,
    )
}

#[derive(Debug, Clone)]
pub struct FactorContribution {
    pub dimension: Dimension,
    pub description: String, // e.g. "36 in, matched '24-42'", "VULCANIZED"
    pub score: u32,
}

/// Explain each sub-score of `input`: which band or category produced it.
pub fn contributions(input: &EvaluationInput) -> Vec<FactorContribution> {
    let width_band = belt_width_band(input.width_in);
    let speed_band = belt_speed_band(input.speed_fpm);

    vec![
        FactorContribution {
            dimension: Dimension::BeltWidth,
            description: format!(
                "{} in, matched '{}'",
                crate::units::trim_float(input.width_in),
                width_band.range
            ),
            score: width_band.score,
        },
        FactorContribution {
            dimension: Dimension::BeltSpeed,
            description: format!(
                "{} fpm, matched '{}'",
                crate::units::trim_float(input.speed_fpm),
                speed_band.range
            ),
            score: speed_band.score,
        },
        FactorContribution {
            dimension: Dimension::SpliceType,
            description: input.splice.to_string(),
            score: score_splice_type(input.splice),
        },
        FactorContribution {
            dimension: Dimension::Abrasiveness,
            description: format!("{} ({})", input.abrasiveness, input.abrasiveness.index_band()),
            score: score_abrasiveness(input.abrasiveness),
        },
        FactorContribution {
            dimension: Dimension::Moisture,
            description: format!("{} ({})", input.moisture, input.moisture.weight_band()),
            score: score_moisture(input.moisture),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        width_in: f64,
        speed_fpm: f64,
        splice: SpliceType,
        abrasiveness: Abrasiveness,
        moisture: Moisture,
    ) -> EvaluationInput {
        EvaluationInput {
            width_in,
            speed_fpm,
            splice,
            abrasiveness,
            moisture,
        }
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(severity_class(6).value(), 1);
        assert_eq!(severity_class(7).value(), 2);
        assert_eq!(severity_class(10).value(), 2);
        assert_eq!(severity_class(11).value(), 3);
        assert_eq!(severity_class(15).value(), 3);
        assert_eq!(severity_class(16).value(), 4);
        assert_eq!(severity_class(23).value(), 4);
        assert_eq!(severity_class(24).value(), 5);
        assert_eq!(severity_class(31).value(), 5);
    }

    #[test]
    fn test_class_is_monotonic_over_reachable_totals() {
        for total in 0..40 {
            assert!(severity_class(total) <= severity_class(total + 1));
        }
    }

    #[test]
    fn test_light_duty_belt() {
        let result = classify(
            36.0,
            400.0,
            SpliceType::Vulcanized,
            Abrasiveness::Mild,
            Moisture::Dry,
        );
        assert_eq!(
            result.breakdown,
            ScoreBreakdown {
                belt_width: 1,
                belt_speed: 2,
                splice_type: 0,
                abrasiveness: 1,
                moisture: 1,
            }
        );
        assert_eq!(result.total, 5);
        assert_eq!(result.severity_class.value(), 1);
    }

    #[test]
    fn test_worst_case() {
        let result = classify(
            120.0,
            1200.0,
            SpliceType::MechanicalHighSpeed,
            Abrasiveness::Extreme,
            Moisture::Slurry,
        );
        assert_eq!(result.total, 31);
        assert_eq!(result.severity_class, SeverityClass::MAX);
    }

    #[test]
    fn test_best_case() {
        let result = classify(
            10.0,
            100.0,
            SpliceType::Vulcanized,
            Abrasiveness::Mild,
            Moisture::Dry,
        );
        assert_eq!(result.total, 3);
        assert_eq!(result.severity_class, SeverityClass::MIN);
    }

    #[test]
    fn test_total_is_breakdown_sum() {
        let result = classify(
            48.0,
            650.0,
            SpliceType::MechanicalLowSpeed,
            Abrasiveness::Moderate,
            Moisture::Wet,
        );
        // 2 + 4 + 2 + 2 + 4
        assert_eq!(result.total, 14);
        assert_eq!(result.total, result.breakdown.sum());
        assert_eq!(result.severity_class.value(), 3);
    }

    #[test]
    fn test_classify_input_matches_classify() {
        let i = input(
            72.0,
            800.0,
            SpliceType::MechanicalHighSpeed,
            Abrasiveness::Moderate,
            Moisture::Moist,
        );
        assert_eq!(
            classify_input(&i),
            classify(
                72.0,
                800.0,
                SpliceType::MechanicalHighSpeed,
                Abrasiveness::Moderate,
                Moisture::Moist,
            )
        );
    }

    #[test]
    fn test_breakdown_iter_order() {
        let result = classify(
            36.0,
            400.0,
            SpliceType::Vulcanized,
            Abrasiveness::Mild,
            Moisture::Dry,
        );
        let dims: Vec<Dimension> = result.breakdown.iter().map(|(d, _)| d).collect();
        assert_eq!(dims, Dimension::ALL.to_vec());
    }

    #[test]
    fn test_contributions_match_breakdown() {
        let i = input(36.0, 400.0, SpliceType::Vulcanized, Abrasiveness::Mild, Moisture::Dry);
        let result = classify_input(&i);
        let contribs = contributions(&i);
        assert_eq!(contribs.len(), 5);
        for c in &contribs {
            assert_eq!(c.score, result.breakdown.get(c.dimension));
        }
        assert_eq!(contribs[0].description, "36 in, matched '24-42'");
        assert_eq!(contribs[1].description, "400 fpm, matched '300-600'");
    }

    #[test]
    fn test_result_json_shape() {
        let result = classify(
            36.0,
            400.0,
            SpliceType::Vulcanized,
            Abrasiveness::Mild,
            Moisture::Dry,
        );
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["total"], 5);
        assert_eq!(json["severityClass"], 1);
        assert_eq!(json["breakdown"]["beltWidth"], 1);
        assert_eq!(json["breakdown"]["spliceType"], 0);
    }

    #[test]
    fn test_severity_class_rejects_out_of_range() {
        assert!(SeverityClass::new(0).is_none());
        assert!(SeverityClass::new(6).is_none());
        assert!(serde_json::from_str::<SeverityClass>("9").is_err());
        assert_eq!(serde_json::from_str::<SeverityClass>("3").unwrap().value(), 3);
    }
}

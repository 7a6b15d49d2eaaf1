use std::fmt;

use super::types::{Abrasiveness, Moisture, SpliceType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    Between(f64, f64),      // Inclusive range: N-M
    AboveUpTo(f64, f64),    // Left-open range: >N up to and including M
    GreaterThan(f64),
}

impl RangeOp {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
            RangeOp::AboveUpTo(low, high) => value > *low && value <= *high,
            RangeOp::GreaterThan(n) => value > *n,
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::Between(low, high) => write!(f, "{}-{}", low, high),
            RangeOp::AboveUpTo(low, high) => write!(f, ">{} to {}", low, high),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
        }
    }
}

/// One row of a severity table: values in `range` score `score`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub range: RangeOp,
    pub score: u32,
}

const fn band(range: RangeOp, score: u32) -> Band {
    Band { range, score }
}

/// Belt width bands in inches. Upper bounds are inclusive.
pub const BELT_WIDTH_BANDS: [Band; 5] = [
    band(RangeOp::LessThan(24.0), 0),
    band(RangeOp::Between(24.0, 42.0), 1),
    band(RangeOp::AboveUpTo(42.0, 60.0), 2),
    band(RangeOp::AboveUpTo(60.0, 96.0), 4),
    band(RangeOp::GreaterThan(96.0), 8),
];

/// Belt speed bands in feet per minute. There is no zero band: the slowest
/// belt still scores 1.
pub const BELT_SPEED_BANDS: [Band; 4] = [
    band(RangeOp::LessThan(300.0), 1),
    band(RangeOp::Between(300.0, 600.0), 2),
    band(RangeOp::AboveUpTo(600.0, 1000.0), 4),
    band(RangeOp::GreaterThan(1000.0), 8),
];

/// First matching band wins. A value no band matches (NaN) falls into the
/// last band, the same place an unguarded `if/else` chain would put it.
pub fn match_band(bands: &'static [Band], value: f64) -> &'static Band {
    bands
        .iter()
        .find(|b| b.range.matches(value))
        .unwrap_or(&bands[bands.len() - 1])
}

pub fn belt_width_band(width_in: f64) -> &'static Band {
    match_band(&BELT_WIDTH_BANDS, width_in)
}

pub fn belt_speed_band(speed_fpm: f64) -> &'static Band {
    match_band(&BELT_SPEED_BANDS, speed_fpm)
}

pub fn score_belt_width(width_in: f64) -> u32 {
    belt_width_band(width_in).score
}

pub fn score_belt_speed(speed_fpm: f64) -> u32 {
    belt_speed_band(speed_fpm).score
}

pub fn score_splice_type(splice: SpliceType) -> u32 {
    match splice {
        SpliceType::Vulcanized => 0,
        SpliceType::MechanicalLowSpeed => 2,
        SpliceType::MechanicalHighSpeed => 4,
    }
}

pub fn score_abrasiveness(level: Abrasiveness) -> u32 {
    match level {
        Abrasiveness::Mild => 1,
        Abrasiveness::Moderate => 2,
        Abrasiveness::Extreme => 3,
    }
}

pub fn score_moisture(level: Moisture) -> u32 {
    match level {
        Moisture::Dry => 1,
        Moisture::Moist => 2,
        Moisture::Wet => 4,
        Moisture::Slurry => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_less_than() {
        let range = RangeOp::LessThan(24.0);
        assert!(range.matches(23.999));
        assert!(!range.matches(24.0));
    }

    #[test]
    fn test_range_between_is_inclusive() {
        let range = RangeOp::Between(24.0, 42.0);
        assert!(!range.matches(23.9));
        assert!(range.matches(24.0));
        assert!(range.matches(42.0));
        assert!(!range.matches(42.001));
    }

    #[test]
    fn test_range_above_up_to_is_left_open() {
        let range = RangeOp::AboveUpTo(42.0, 60.0);
        assert!(!range.matches(42.0));
        assert!(range.matches(42.001));
        assert!(range.matches(60.0));
        assert!(!range.matches(60.001));
    }

    #[test]
    fn test_range_display() {
        assert_eq!(RangeOp::LessThan(24.0).to_string(), "<24");
        assert_eq!(RangeOp::Between(24.0, 42.0).to_string(), "24-42");
        assert_eq!(RangeOp::AboveUpTo(42.0, 60.0).to_string(), ">42 to 60");
        assert_eq!(RangeOp::GreaterThan(96.0).to_string(), ">96");
    }

    #[test]
    fn test_belt_width_boundaries() {
        assert_eq!(score_belt_width(23.999), 0);
        assert_eq!(score_belt_width(24.0), 1);
        assert_eq!(score_belt_width(42.0), 1);
        assert_eq!(score_belt_width(42.001), 2);
        assert_eq!(score_belt_width(60.0), 2);
        assert_eq!(score_belt_width(60.001), 4);
        assert_eq!(score_belt_width(96.0), 4);
        assert_eq!(score_belt_width(96.001), 8);
    }

    #[test]
    fn test_belt_speed_boundaries() {
        assert_eq!(score_belt_speed(299.999), 1);
        assert_eq!(score_belt_speed(300.0), 2);
        assert_eq!(score_belt_speed(600.0), 2);
        assert_eq!(score_belt_speed(600.001), 4);
        assert_eq!(score_belt_speed(1000.0), 4);
        assert_eq!(score_belt_speed(1000.001), 8);
    }

    #[test]
    fn test_slowest_belt_still_scores_one() {
        assert_eq!(score_belt_speed(0.0), 1);
    }

    #[test]
    fn test_unvalidated_values_fall_through_chain() {
        assert_eq!(score_belt_width(-10.0), 0);
        assert_eq!(score_belt_width(f64::NAN), 8);
        assert_eq!(score_belt_width(f64::INFINITY), 8);
        assert_eq!(score_belt_speed(-1.0), 1);
        assert_eq!(score_belt_speed(f64::NAN), 8);
    }

    #[test]
    fn test_categorical_lookups() {
        assert_eq!(score_splice_type(SpliceType::Vulcanized), 0);
        assert_eq!(score_splice_type(SpliceType::MechanicalLowSpeed), 2);
        assert_eq!(score_splice_type(SpliceType::MechanicalHighSpeed), 4);
        assert_eq!(score_abrasiveness(Abrasiveness::Mild), 1);
        assert_eq!(score_abrasiveness(Abrasiveness::Moderate), 2);
        assert_eq!(score_abrasiveness(Abrasiveness::Extreme), 3);
        assert_eq!(score_moisture(Moisture::Dry), 1);
        assert_eq!(score_moisture(Moisture::Moist), 2);
        assert_eq!(score_moisture(Moisture::Wet), 4);
        assert_eq!(score_moisture(Moisture::Slurry), 8);
    }

    #[test]
    fn test_bands_are_ordered_and_non_decreasing() {
        for bands in [&BELT_WIDTH_BANDS[..], &BELT_SPEED_BANDS[..]] {
            for pair in bands.windows(2) {
                assert!(pair[0].score <= pair[1].score);
            }
        }
    }

    #[test]
    fn test_matched_band_reports_range() {
        assert_eq!(belt_width_band(36.0).range, RangeOp::Between(24.0, 42.0));
        assert_eq!(belt_speed_band(984.25).range, RangeOp::AboveUpTo(600.0, 1000.0));
    }
}

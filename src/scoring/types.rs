use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ScoringError;

/// Belt speed at which a mechanical splice moves from the low-speed to the
/// high-speed category (500 fpm, about 2.5 m/s).
pub const MECHANICAL_SPLICE_SPEED_THRESHOLD_FPM: f64 = 500.0;

/// Normalize a categorical name for matching: case-insensitive, with `-`,
/// `_` and spaces treated alike.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpliceType {
    Vulcanized,
    MechanicalLowSpeed,
    MechanicalHighSpeed,
}

impl SpliceType {
    pub const ALL: [SpliceType; 3] = [
        SpliceType::Vulcanized,
        SpliceType::MechanicalLowSpeed,
        SpliceType::MechanicalHighSpeed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpliceType::Vulcanized => "VULCANIZED",
            SpliceType::MechanicalLowSpeed => "MECHANICAL_LOW_SPEED",
            SpliceType::MechanicalHighSpeed => "MECHANICAL_HIGH_SPEED",
        }
    }

    pub fn is_mechanical(&self) -> bool {
        !matches!(self, SpliceType::Vulcanized)
    }

    /// Pick the splice category from a mechanical/vulcanized flag and the
    /// measured belt speed. Speeds at or above the threshold are high speed.
    pub fn from_mechanical(is_mechanical: bool, speed_fpm: f64) -> Self {
        if !is_mechanical {
            SpliceType::Vulcanized
        } else if speed_fpm >= MECHANICAL_SPLICE_SPEED_THRESHOLD_FPM {
            SpliceType::MechanicalHighSpeed
        } else {
            SpliceType::MechanicalLowSpeed
        }
    }
}

impl fmt::Display for SpliceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpliceType {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "VULCANIZED" => Ok(SpliceType::Vulcanized),
            "MECHANICAL_LOW_SPEED" => Ok(SpliceType::MechanicalLowSpeed),
            "MECHANICAL_HIGH_SPEED" => Ok(SpliceType::MechanicalHighSpeed),
            _ => Err(ScoringError::InvalidCategory {
                field: "splice",
                value: s.to_string(),
                expected: "VULCANIZED, MECHANICAL_LOW_SPEED, MECHANICAL_HIGH_SPEED",
            }),
        }
    }
}

/// Material abrasiveness. The bands correspond to abrasion index ranges of
/// roughly 1-17, 18-67 and 68-416.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Abrasiveness {
    Mild,
    Moderate,
    Extreme,
}

impl Abrasiveness {
    pub const ALL: [Abrasiveness; 3] = [
        Abrasiveness::Mild,
        Abrasiveness::Moderate,
        Abrasiveness::Extreme,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Abrasiveness::Mild => "MILD",
            Abrasiveness::Moderate => "MODERATE",
            Abrasiveness::Extreme => "EXTREME",
        }
    }

    pub fn index_band(&self) -> &'static str {
        match self {
            Abrasiveness::Mild => "abrasion index 1-17",
            Abrasiveness::Moderate => "abrasion index 18-67",
            Abrasiveness::Extreme => "abrasion index 68-416",
        }
    }
}

impl fmt::Display for Abrasiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Abrasiveness {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "MILD" => Ok(Abrasiveness::Mild),
            "MODERATE" => Ok(Abrasiveness::Moderate),
            "EXTREME" => Ok(Abrasiveness::Extreme),
            _ => Err(ScoringError::InvalidCategory {
                field: "abrasiveness",
                value: s.to_string(),
                expected: "MILD, MODERATE, EXTREME",
            }),
        }
    }
}

/// Material moisture by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Moisture {
    Dry,
    Moist,
    Wet,
    Slurry,
}

impl Moisture {
    pub const ALL: [Moisture; 4] = [
        Moisture::Dry,
        Moisture::Moist,
        Moisture::Wet,
        Moisture::Slurry,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Moisture::Dry => "DRY",
            Moisture::Moist => "MOIST",
            Moisture::Wet => "WET",
            Moisture::Slurry => "SLURRY",
        }
    }

    pub fn weight_band(&self) -> &'static str {
        match self {
            Moisture::Dry => "<2% by weight",
            Moisture::Moist => "2-8% by weight",
            Moisture::Wet => ">8% by weight",
            Moisture::Slurry => "sticky or slurry",
        }
    }
}

impl fmt::Display for Moisture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Moisture {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "DRY" => Ok(Moisture::Dry),
            "MOIST" => Ok(Moisture::Moist),
            "WET" => Ok(Moisture::Wet),
            "SLURRY" => Ok(Moisture::Slurry),
            _ => Err(ScoringError::InvalidCategory {
                field: "moisture",
                value: s.to_string(),
                expected: "DRY, MOIST, WET, SLURRY",
            }),
        }
    }
}

/// The five inputs that contribute to the severity total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    BeltWidth,
    BeltSpeed,
    SpliceType,
    Abrasiveness,
    Moisture,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::BeltWidth,
        Dimension::BeltSpeed,
        Dimension::SpliceType,
        Dimension::Abrasiveness,
        Dimension::Moisture,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::BeltWidth => "Belt width",
            Dimension::BeltSpeed => "Belt speed",
            Dimension::SpliceType => "Splice type",
            Dimension::Abrasiveness => "Abrasiveness",
            Dimension::Moisture => "Moisture",
        }
    }

    /// Highest sub-score the dimension can contribute.
    pub fn max_score(&self) -> u32 {
        match self {
            Dimension::BeltWidth => 8,
            Dimension::BeltSpeed => 8,
            Dimension::SpliceType => 4,
            Dimension::Abrasiveness => 3,
            Dimension::Moisture => 8,
        }
    }
}

//! Conversion between display units and the canonical units the scoring
//! engine works in (inches for belt width, feet per minute for belt speed).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::scoring::ScoringError;

pub const MM_PER_INCH: f64 = 25.4;
pub const FPM_PER_MPS: f64 = 196.85;

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn mps_to_fpm(mps: f64) -> f64 {
    mps * FPM_PER_MPS
}

pub fn fpm_to_mps(fpm: f64) -> f64 {
    fpm / FPM_PER_MPS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WidthUnit {
    #[default]
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "mm")]
    Millimeters,
}

impl WidthUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            WidthUnit::Inches => "in",
            WidthUnit::Millimeters => "mm",
        }
    }
}

impl fmt::Display for WidthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WidthUnit {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" | "\"" => Ok(WidthUnit::Inches),
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(WidthUnit::Millimeters)
            }
            _ => Err(ScoringError::InvalidUnit {
                field: "width_unit",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedUnit {
    #[default]
    #[serde(rename = "fpm")]
    FeetPerMinute,
    #[serde(rename = "m/s")]
    MetersPerSecond,
}

impl SpeedUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            SpeedUnit::FeetPerMinute => "fpm",
            SpeedUnit::MetersPerSecond => "m/s",
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for SpeedUnit {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fpm" | "ft/min" | "feet/min" => Ok(SpeedUnit::FeetPerMinute),
            "m/s" | "mps" | "ms" => Ok(SpeedUnit::MetersPerSecond),
            _ => Err(ScoringError::InvalidUnit {
                field: "speed_unit",
                value: s.to_string(),
            }),
        }
    }
}

/// Units assumed for a width or speed entered without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitPreferences {
    #[serde(default)]
    pub width: WidthUnit,
    #[serde(default)]
    pub speed: SpeedUnit,
}

/// A belt width as the user entered it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Width {
    pub value: f64,
    pub unit: WidthUnit,
}

impl Width {
    pub fn new(value: f64, unit: WidthUnit) -> Self {
        Self { value, unit }
    }

    pub fn to_inches(&self) -> f64 {
        match self.unit {
            WidthUnit::Inches => self.value,
            WidthUnit::Millimeters => mm_to_inches(self.value),
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", trim_float(self.value), self.unit)
    }
}

/// A belt speed as the user entered it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub value: f64,
    pub unit: SpeedUnit,
}

impl Speed {
    pub fn new(value: f64, unit: SpeedUnit) -> Self {
        Self { value, unit }
    }

    pub fn to_fpm(&self) -> f64 {
        match self.unit {
            SpeedUnit::FeetPerMinute => self.value,
            SpeedUnit::MetersPerSecond => mps_to_fpm(self.value),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", trim_float(self.value), self.unit)
    }
}

/// Format with at most two decimals, dropping trailing zeros ("36", "59.06").
pub fn trim_float(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches_to_mm() {
        assert_eq!(inches_to_mm(1.0), 25.4);
        assert_eq!(inches_to_mm(0.0), 0.0);
    }

    #[test]
    fn test_mm_to_inches() {
        assert!((mm_to_inches(1500.0) - 59.055).abs() < 0.001);
    }

    #[test]
    fn test_mps_to_fpm() {
        assert!((mps_to_fpm(5.0) - 984.25).abs() < 1e-9);
    }

    #[test]
    fn test_fpm_to_mps() {
        assert!((fpm_to_mps(196.85) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_width_to_inches() {
        assert_eq!(Width::new(36.0, WidthUnit::Inches).to_inches(), 36.0);
        assert!((Width::new(254.0, WidthUnit::Millimeters).to_inches() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_to_fpm() {
        assert_eq!(Speed::new(400.0, SpeedUnit::FeetPerMinute).to_fpm(), 400.0);
        assert!((Speed::new(2.5, SpeedUnit::MetersPerSecond).to_fpm() - 492.125).abs() < 1e-9);
    }

    #[test]
    fn test_parse_width_unit() {
        assert_eq!("in".parse::<WidthUnit>().unwrap(), WidthUnit::Inches);
        assert_eq!("Inches".parse::<WidthUnit>().unwrap(), WidthUnit::Inches);
        assert_eq!(" MM ".parse::<WidthUnit>().unwrap(), WidthUnit::Millimeters);
        assert!("cm".parse::<WidthUnit>().is_err());
    }

    #[test]
    fn test_parse_speed_unit() {
        assert_eq!("fpm".parse::<SpeedUnit>().unwrap(), SpeedUnit::FeetPerMinute);
        assert_eq!("ft/min".parse::<SpeedUnit>().unwrap(), SpeedUnit::FeetPerMinute);
        assert_eq!("m/s".parse::<SpeedUnit>().unwrap(), SpeedUnit::MetersPerSecond);
        assert_eq!("MPS".parse::<SpeedUnit>().unwrap(), SpeedUnit::MetersPerSecond);
        assert!("km/h".parse::<SpeedUnit>().is_err());
    }

    #[test]
    fn test_unit_serde_names() {
        assert_eq!(serde_json::to_string(&WidthUnit::Millimeters).unwrap(), "\"mm\"");
        assert_eq!(serde_json::to_string(&SpeedUnit::MetersPerSecond).unwrap(), "\"m/s\"");
        let unit: SpeedUnit = serde_json::from_str("\"fpm\"").unwrap();
        assert_eq!(unit, SpeedUnit::FeetPerMinute);
    }

    #[test]
    fn test_display() {
        assert_eq!(Width::new(36.0, WidthUnit::Inches).to_string(), "36 in");
        assert_eq!(Width::new(1500.0, WidthUnit::Millimeters).to_string(), "1500 mm");
        assert_eq!(Speed::new(2.5, SpeedUnit::MetersPerSecond).to_string(), "2.5 m/s");
    }

    #[test]
    fn test_trim_float() {
        assert_eq!(trim_float(59.0551), "59.06");
        assert_eq!(trim_float(60.0), "60");
        assert_eq!(trim_float(0.5), "0.5");
    }
}

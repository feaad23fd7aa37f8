//! # Distance Formatting
//!
//! The formatter adapter turns raw meters into the strings shown next to the
//! maneuver icon. The snapshot builder owns one behind an `Arc` so the host
//! can swap it at runtime; already-rendered text is never reformatted.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

const METERS_PER_MILE: f64 = 1609.344;
const FEET_PER_METER: f64 = 3.28084;

/// Below this many meters, metric distances are shown in meters.
const SMALL_METRIC_THRESHOLD: f64 = 400.0;
/// Below this many miles, imperial distances are shown in feet.
const SMALL_IMPERIAL_THRESHOLD: f64 = 0.1;
/// From this many large units upward, no decimal is shown.
const LARGE_UNIT_THRESHOLD: f64 = 10.0;

pub const DEFAULT_ROUNDING_INCREMENT: u32 = 50;

/// Converts a distance in meters to display text.
///
/// Implementations must be total: a value they cannot format becomes an
/// empty string, which the engine treats as "no new text".
pub trait DistanceFormatter: Send + Sync + fmt::Debug {
    fn format_distance(&self, meters: f64) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    #[default]
    Metric,
    Imperial,
}

impl UnitType {
    pub fn label(&self) -> &'static str {
        match self {
            UnitType::Metric => "metric",
            UnitType::Imperial => "imperial",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "metric" => Some(UnitType::Metric),
            "imperial" => Some(UnitType::Imperial),
            _ => None,
        }
    }
}

/// Default formatter: small distances rounded to an increment, larger ones
/// with one decimal, very large ones as whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitDistanceFormatter {
    unit_type: UnitType,
    rounding_increment: u32,
}

impl UnitDistanceFormatter {
    pub fn new(unit_type: UnitType, rounding_increment: u32) -> Self {
        Self {
            unit_type,
            rounding_increment: rounding_increment.max(1),
        }
    }

    fn round_small(&self, value: f64) -> u64 {
        let increment = f64::from(self.rounding_increment);
        ((value / increment).round() * increment).max(increment) as u64
    }
}

impl Default for UnitDistanceFormatter {
    fn default() -> Self {
        Self::new(UnitType::Metric, DEFAULT_ROUNDING_INCREMENT)
    }
}

impl DistanceFormatter for UnitDistanceFormatter {
    fn format_distance(&self, meters: f64) -> String {
        if !meters.is_finite() || meters < 0.0 {
            return String::new();
        }
        match self.unit_type {
            UnitType::Metric => {
                if meters < SMALL_METRIC_THRESHOLD {
                    format!("{} m", self.round_small(meters))
                } else {
                    large_unit(meters / 1000.0, "km")
                }
            }
            UnitType::Imperial => {
                let miles = meters / METERS_PER_MILE;
                if miles < SMALL_IMPERIAL_THRESHOLD {
                    format!("{} ft", self.round_small(meters * FEET_PER_METER))
                } else {
                    large_unit(miles, "mi")
                }
            }
        }
    }
}

fn large_unit(value: f64, unit: &str) -> String {
    if value < LARGE_UNIT_THRESHOLD {
        format!("{value:.1} {unit}")
    } else {
        format!("{value:.0} {unit}")
    }
}

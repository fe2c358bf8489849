//! Roll severity classification.

use std::fmt;
use std::str::FromStr;

use polar_common::PolarError;
use serde::{Deserialize, Serialize};

use crate::color::{continuous_color, roll_ratio, Rgb};

/// Margin below the limit where the traffic light turns yellow (deg).
pub const YELLOW_MARGIN: f64 = 5.0;

/// Three-step severity relative to the allowed roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Green,
    Yellow,
    Red,
}

impl TrafficLight {
    /// `roll <= max - 5` is green, `roll <= max` yellow, anything else red.
    pub fn classify(roll: f64, max_roll: f64) -> Self {
        if roll <= max_roll - YELLOW_MARGIN {
            Self::Green
        } else if roll <= max_roll {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Self::Green => Rgb::new(0x2e, 0xcc, 0x71),
            Self::Yellow => Rgb::new(0xf3, 0x9c, 0x12),
            Self::Red => Rgb::new(0xe7, 0x4c, 0x3c),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`TrafficLight::classify`].
pub fn traffic_light(roll: f64, max_roll: f64) -> TrafficLight {
    TrafficLight::classify(roll, max_roll)
}

/// Whether `roll` exceeds the allowed maximum.
pub fn is_in_danger_zone(roll: f64, max_roll: f64) -> bool {
    roll > max_roll
}

/// How the polar field is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Continuous,
    #[serde(alias = "trafficlight")]
    TrafficLight,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continuous => "continuous",
            Self::TrafficLight => "traffic_light",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = PolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "continuous" => Ok(Self::Continuous),
            "trafficlight" => Ok(Self::TrafficLight),
            other => Err(PolarError::InvalidConfig(format!(
                "unknown display mode '{}'",
                other
            ))),
        }
    }
}

/// Classification of one roll value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Classification {
    Continuous { ratio: f64, color: Rgb },
    TrafficLight { level: TrafficLight, color: Rgb },
}

impl Classification {
    pub fn color(&self) -> Rgb {
        match self {
            Self::Continuous { color, .. } | Self::TrafficLight { color, .. } => *color,
        }
    }
}

/// Classify `roll` against `max_roll` in the given mode.
pub fn classify(roll: f64, max_roll: f64, mode: DisplayMode) -> Classification {
    match mode {
        DisplayMode::Continuous => Classification::Continuous {
            ratio: roll_ratio(roll, max_roll),
            color: continuous_color(roll, max_roll),
        },
        DisplayMode::TrafficLight => {
            let level = TrafficLight::classify(roll, max_roll);
            Classification::TrafficLight {
                level,
                color: level.color(),
            }
        }
    }
}

/// `n + 1` evenly spaced contour levels from 0 to `max_value`.
pub fn contour_levels(max_value: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return vec![0.0];
    }
    let step = max_value / n as f64;
    (0..=n).map(|i| i as f64 * step).collect()
}

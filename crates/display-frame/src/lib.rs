//! Conversion between vessel-frame headings and display angles.
//!
//! Polar datasets are indexed by the heading of the waves relative to the bow
//! (`beta`, clockwise from the bow). The chart draws them either North-up,
//! where the screen's top is true North and the vessel is rotated by its
//! heading, or Heads-up, where the bow always points up.
//!
//! Each forward mapping has an exact inverse so a renderer can sample the
//! field on a display-space mesh and look values up in vessel frame.

use std::fmt;
use std::str::FromStr;

use polar_common::{normalize_angle, PolarError};
use serde::{Deserialize, Serialize};

pub use polar_common::angle_difference;

/// Orientation of the polar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionMode {
    /// 0° at the top is true North.
    #[default]
    #[serde(alias = "northup")]
    NorthUp,
    /// 0° at the top is the bow.
    #[serde(alias = "headsup")]
    HeadsUp,
}

impl DirectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NorthUp => "northup",
            Self::HeadsUp => "headsup",
        }
    }
}

impl fmt::Display for DirectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectionMode {
    type Err = PolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "northup" => Ok(Self::NorthUp),
            "headsup" => Ok(Self::HeadsUp),
            other => Err(PolarError::InvalidConfig(format!(
                "unknown direction mode '{}'",
                other
            ))),
        }
    }
}

/// Display angle of vessel-frame heading `beta` in a North-up chart.
pub fn to_north_up(beta: f64, vessel_heading: f64) -> f64 {
    normalize_angle(180.0 + (vessel_heading - beta))
}

/// Display angle of vessel-frame heading `beta` in a Heads-up chart.
pub fn to_heads_up(beta: f64) -> f64 {
    normalize_angle(180.0 - beta)
}

/// Vessel-frame heading shown at North-up display angle `display`.
pub fn from_north_up(display: f64, vessel_heading: f64) -> f64 {
    normalize_angle(180.0 + vessel_heading - display)
}

/// Vessel-frame heading shown at Heads-up display angle `display`.
pub fn from_heads_up(display: f64) -> f64 {
    normalize_angle(180.0 - display)
}

/// Display angle of `beta` in the given mode.
pub fn to_display(beta: f64, vessel_heading: f64, mode: DirectionMode) -> f64 {
    match mode {
        DirectionMode::NorthUp => to_north_up(beta, vessel_heading),
        DirectionMode::HeadsUp => to_heads_up(beta),
    }
}

/// Vessel-frame heading at display angle `display` in the given mode.
pub fn to_vessel_frame(display: f64, vessel_heading: f64, mode: DirectionMode) -> f64 {
    match mode {
        DirectionMode::NorthUp => from_north_up(display, vessel_heading),
        DirectionMode::HeadsUp => from_heads_up(display),
    }
}

/// Angle at which the wave direction arrow is drawn.
pub fn wave_direction_display(wave_direction: f64, vessel_heading: f64, mode: DirectionMode) -> f64 {
    match mode {
        DirectionMode::NorthUp => normalize_angle(wave_direction),
        DirectionMode::HeadsUp => normalize_angle(wave_direction - vessel_heading),
    }
}

/// Angle at which the vessel outline is drawn.
pub fn vessel_display_angle(vessel_heading: f64, mode: DirectionMode) -> f64 {
    match mode {
        DirectionMode::NorthUp => normalize_angle(vessel_heading),
        DirectionMode::HeadsUp => 0.0,
    }
}

/// Angle label, whole degrees in `[0, 360)`.
pub fn format_angle(angle: f64) -> String {
    format!("{:.0}°", normalize_angle(angle))
}

/// Speed label with one decimal.
pub fn format_speed(speed: f64) -> String {
    format!("{:.1} kn", speed)
}

//! Continuous roll color scale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Stops of the continuous scale, dark blue (calm) to red (at the limit).
pub const CONTINUOUS_STOPS: [Rgb; 6] = [
    Rgb::new(13, 71, 161),
    Rgb::new(25, 118, 210),
    Rgb::new(0, 188, 212),
    Rgb::new(255, 235, 59),
    Rgb::new(255, 152, 0),
    Rgb::new(244, 67, 54),
];

/// Fraction of the allowed roll, in `[0, 1]`.
///
/// A non-positive limit saturates any positive roll; NaN maps to 0.
pub fn roll_ratio(roll: f64, max_roll: f64) -> f64 {
    let ratio = if max_roll > 0.0 {
        roll / max_roll
    } else if roll > 0.0 {
        1.0
    } else {
        0.0
    };
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

/// Linear color interpolation, channels rounded.
pub fn interpolate_color(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| -> u8 {
        let v = a as f64 + (b as f64 - a as f64) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

/// Color of `roll` on the continuous scale.
///
/// The ratio to `max_roll` is split into five equal bands, each
/// interpolating between two neighbouring stops.
pub fn continuous_color(roll: f64, max_roll: f64) -> Rgb {
    let ratio = roll_ratio(roll, max_roll);
    let band = ((ratio / 0.2) as usize).min(4);
    let t = (ratio - band as f64 * 0.2) / 0.2;
    interpolate_color(CONTINUOUS_STOPS[band], CONTINUOUS_STOPS[band + 1], t)
}

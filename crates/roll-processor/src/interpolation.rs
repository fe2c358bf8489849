//! Roll interpolation over the speed × heading grid.
//!
//! The heading axis is circular and is searched by angular distance; the
//! speed axis is linear.

use std::fmt;
use std::str::FromStr;

use polar_common::{angle_difference, normalize_angle, PolarDataset, PolarError};
use serde::{Deserialize, Serialize};

/// Interpolation scheme for roll lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Linear in speed between the two nearest headings, averaged.
    ///
    /// Outside the speed grid the first-to-last pair is extrapolated.
    #[default]
    Legacy,
    /// Bilinear in speed and heading with the speed clamped to the grid.
    ///
    /// Grid points return the stored value exactly.
    Bracketed,
}

impl InterpolationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Bracketed => "bracketed",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMethod {
    type Err = PolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "bracketed" | "bilinear" => Ok(Self::Bracketed),
            other => Err(PolarError::InvalidConfig(format!(
                "unknown interpolation method '{}'",
                other
            ))),
        }
    }
}

/// Roll angle at (`speed`, `heading`), heading in vessel frame.
pub fn interpolate_roll(
    dataset: &PolarDataset,
    speed: f64,
    heading: f64,
    method: InterpolationMethod,
) -> f64 {
    match method {
        InterpolationMethod::Legacy => interpolate_legacy(dataset, speed, heading),
        InterpolationMethod::Bracketed => interpolate_bracketed(dataset, speed, heading),
    }
}

/// Blend of two grid values; exact when `t` is 0.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 0.0 {
        a
    } else {
        a * (1.0 - t) + b * t
    }
}

/// Speed pair and factor for the legacy scheme.
///
/// Takes the first `i` with `speeds[i] <= speed <= speeds[i + 1]`, otherwise
/// the pair `(0, last)`.
fn legacy_speed_pair(speeds: &[f64], speed: f64) -> (usize, usize, f64) {
    let last = speeds.len() - 1;
    let (i0, i1) = speeds
        .windows(2)
        .position(|w| speed >= w[0] && speed <= w[1])
        .map(|i| (i, i + 1))
        .unwrap_or((0, last));

    let factor = if speeds[i1] > speeds[i0] {
        (speed - speeds[i0]) / (speeds[i1] - speeds[i0])
    } else {
        0.0
    };
    (i0, i1, factor)
}

/// Index of the heading nearest to `heading`, skipping `exclude`.
///
/// Defaults to 0 when nothing is closer than half a turn.
fn nearest_heading(headings: &[f64], heading: f64, exclude: Option<usize>) -> usize {
    let mut best = 0;
    let mut min_diff = 360.0;
    for (i, &h) in headings.iter().enumerate() {
        if Some(i) == exclude {
            continue;
        }
        let diff = angle_difference(h, heading).abs();
        if diff < min_diff {
            min_diff = diff;
            best = i;
        }
    }
    best
}

/// Legacy interpolation.
///
/// The nearest and second-nearest headings are each interpolated linearly in
/// speed and the two results averaged, so even an exact grid heading is
/// blended with its neighbour.
pub fn interpolate_legacy(dataset: &PolarDataset, speed: f64, heading: f64) -> f64 {
    let speeds = dataset.speeds();
    let headings = dataset.headings();

    let (s0, s1, factor) = legacy_speed_pair(speeds, speed);
    let h0 = nearest_heading(headings, heading, None);
    let h1 = nearest_heading(headings, heading, Some(h0));

    let v0 = dataset.roll(s0, h0) * (1.0 - factor) + dataset.roll(s1, h0) * factor;
    let v1 = dataset.roll(s0, h1) * (1.0 - factor) + dataset.roll(s1, h1) * factor;
    (v0 + v1) / 2.0
}

/// Speed bracket for the bracketed scheme, with the speed clamped to the grid.
fn bracket_speed(speeds: &[f64], speed: f64) -> (usize, usize, f64) {
    let (min, max) = speeds
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        });
    // An axis with no finite values has no range to clamp to.
    let speed = if !(min <= max) {
        speed
    } else if speed.is_nan() {
        min
    } else {
        speed.clamp(min, max)
    };

    if let Some(i) = speeds.iter().position(|&s| s == speed) {
        return (i, i, 0.0);
    }
    match speeds
        .windows(2)
        .position(|w| w[0] < speed && speed < w[1])
    {
        Some(i) => {
            let t = (speed - speeds[i]) / (speeds[i + 1] - speeds[i]);
            (i, i + 1, t)
        }
        // Unsorted axis: nearest speed.
        None => {
            let i = speeds
                .iter()
                .enumerate()
                .min_by(|a, b| (a.1 - speed).abs().total_cmp(&(b.1 - speed).abs()))
                .map(|(i, _)| i)
                .unwrap_or(0);
            (i, i, 0.0)
        }
    }
}

/// Heading bracket: nearest grid heading at or below the query and nearest
/// strictly above, going round the circle, plus the weight of the upper one.
fn bracket_heading(headings: &[f64], heading: f64) -> (usize, usize, f64) {
    let q = normalize_angle(heading);

    let mut below = (0, f64::INFINITY);
    let mut above = (0, f64::INFINITY);
    for (i, &h) in headings.iter().enumerate() {
        let down = normalize_angle(q - h);
        if down < below.1 {
            below = (i, down);
        }
        let up = normalize_angle(h - q);
        if up > 0.0 && up < above.1 {
            above = (i, up);
        }
    }

    if below.1 == 0.0 || !above.1.is_finite() || !below.1.is_finite() {
        return (below.0, below.0, 0.0);
    }
    (below.0, above.0, below.1 / (below.1 + above.1))
}

/// Bracketed bilinear interpolation.
pub fn interpolate_bracketed(dataset: &PolarDataset, speed: f64, heading: f64) -> f64 {
    let (s0, s1, ts) = bracket_speed(dataset.speeds(), speed);
    let (h0, h1, th) = bracket_heading(dataset.headings(), heading);

    let lower = lerp(dataset.roll(s0, h0), dataset.roll(s1, h0), ts);
    if th == 0.0 {
        return lower;
    }
    let upper = lerp(dataset.roll(s0, h1), dataset.roll(s1, h1), ts);
    lerp(lower, upper, th)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polar_common::FittedParameters;
    use test_utils::{assert_approx_eq, grid};

    fn dataset() -> PolarDataset {
        PolarDataset::new(
            grid::SPEEDS.to_vec(),
            grid::HEADINGS.to_vec(),
            grid::ROLL.to_vec(),
            1,
            FittedParameters {
                gm: 2.0,
                hs: 5.0,
                tz: 10.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_method_names() {
        assert_eq!("Legacy".parse::<InterpolationMethod>().unwrap(), InterpolationMethod::Legacy);
        assert_eq!(
            "bracketed".parse::<InterpolationMethod>().unwrap(),
            InterpolationMethod::Bracketed
        );
        assert!("cubic".parse::<InterpolationMethod>().is_err());
        assert_eq!(InterpolationMethod::default(), InterpolationMethod::Legacy);
    }

    #[test]
    fn test_legacy_speed_pair() {
        let speeds = [0.0, 10.0, 20.0];
        assert_eq!(legacy_speed_pair(&speeds, 5.0), (0, 1, 0.5));
        // boundary value belongs to the first matching pair
        assert_eq!(legacy_speed_pair(&speeds, 10.0), (0, 1, 1.0));
        // outside the grid: first-to-last pair, extrapolated
        assert_eq!(legacy_speed_pair(&speeds, 30.0), (0, 2, 1.5));
        assert_eq!(legacy_speed_pair(&speeds, -10.0), (0, 2, -0.5));
        assert_eq!(legacy_speed_pair(&[7.0], 3.0), (0, 0, 0.0));
    }

    #[test]
    fn test_nearest_heading_wraps() {
        let headings = [0.0, 90.0, 180.0, 270.0];
        assert_eq!(nearest_heading(&headings, 350.0, None), 0);
        assert_eq!(nearest_heading(&headings, 350.0, Some(0)), 3);
        // equidistant: first index wins
        assert_eq!(nearest_heading(&headings, 45.0, None), 0);
        assert_eq!(nearest_heading(&headings, 45.0, Some(0)), 1);
    }

    #[test]
    fn test_legacy_at_grid_heading_blends_neighbour() {
        let ds = dataset();
        // speed 10, heading 90: rows 14 (90°) and 3 (0°, first of the ties)
        assert_approx_eq!(interpolate_legacy(&ds, 10.0, 90.0), (14.0 + 3.0) / 2.0, 1e-12);
    }

    #[test]
    fn test_legacy_extrapolates_beyond_grid() {
        let ds = dataset();
        // heading 0 -> rows 0° and 90°; speeds pair (0, 20) with factor 1.5
        let v0 = 2.0 * -0.5 + 4.0 * 1.5;
        let v1 = 10.0 * -0.5 + 18.0 * 1.5;
        assert_approx_eq!(interpolate_legacy(&ds, 30.0, 0.0), (v0 + v1) / 2.0, 1e-12);
    }

    #[test]
    fn test_bracketed_exact_grid_points() {
        let ds = dataset();
        for (i, &s) in grid::SPEEDS.iter().enumerate() {
            for (j, &h) in grid::HEADINGS.iter().enumerate() {
                assert_eq!(interpolate_bracketed(&ds, s, h), ds.roll(i, j));
            }
        }
    }

    #[test]
    fn test_bracketed_midpoints() {
        let ds = dataset();
        // halfway between 0° and 90° at speed 0
        assert_approx_eq!(interpolate_bracketed(&ds, 0.0, 45.0), 6.0, 1e-12);
        // halfway between 270° and 0° (wrap) at speed 0
        assert_approx_eq!(interpolate_bracketed(&ds, 0.0, 315.0), 6.0, 1e-12);
        // halfway in speed at 90°
        assert_approx_eq!(interpolate_bracketed(&ds, 5.0, 90.0), 12.0, 1e-12);
        // negative heading wraps
        assert_approx_eq!(interpolate_bracketed(&ds, 0.0, -45.0), 6.0, 1e-12);
    }

    #[test]
    fn test_bracketed_clamps_speed() {
        let ds = dataset();
        assert_eq!(interpolate_bracketed(&ds, 50.0, 90.0), 18.0);
        assert_eq!(interpolate_bracketed(&ds, -5.0, 90.0), 10.0);
    }

    #[test]
    fn test_bracketed_nan_speed_axis_does_not_panic() {
        let ds = PolarDataset::new(
            vec![f64::NAN],
            vec![0.0, 180.0],
            vec![1.0, 2.0],
            1,
            FittedParameters {
                gm: 1.0,
                hs: 1.0,
                tz: 1.0,
            },
        )
        .unwrap();
        assert_approx_eq!(interpolate_bracketed(&ds, 5.0, 90.0), 1.5, 1e-12);
        assert_approx_eq!(interpolate_bracketed(&ds, f64::NAN, 0.0), 1.0, 1e-12);
        assert_eq!(bracket_speed(&[f64::NAN, f64::NAN], 3.0).2, 0.0);
    }

    #[test]
    fn test_single_heading_dataset() {
        let ds = PolarDataset::from_rows(
            vec![0.0, 10.0],
            vec![45.0],
            vec![vec![4.0], vec![8.0]],
            FittedParameters {
                gm: 1.0,
                hs: 1.0,
                tz: 1.0,
            },
        )
        .unwrap();
        assert_approx_eq!(interpolate_bracketed(&ds, 5.0, 200.0), 6.0, 1e-12);
        assert_approx_eq!(interpolate_legacy(&ds, 5.0, 200.0), 6.0, 1e-12);
    }
}

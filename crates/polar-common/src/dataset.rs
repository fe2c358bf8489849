//! Decoded polar dataset.

use serde::{Deserialize, Serialize};

use crate::error::{PolarError, PolarResult};

/// Parameter values a dataset was actually computed for.
///
/// These come from the chosen folder and file names and may differ from the
/// requested values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedParameters {
    pub gm: f64,
    pub hs: f64,
    pub tz: f64,
}

/// Speed × heading grid of roll angles for one (draft, GM, Hs, Tz) case.
///
/// The grid dimensions always match `speeds.len() × headings.len()`; the
/// constructor is the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolarDataset {
    speeds: Vec<f64>,
    headings: Vec<f64>,
    /// Row-major, outer index = speed, inner index = heading.
    roll: Vec<f64>,
    num_parameters: i32,
    fitted: FittedParameters,
}

impl PolarDataset {
    /// Create a dataset from its axes and a row-major roll matrix.
    pub fn new(
        speeds: Vec<f64>,
        headings: Vec<f64>,
        roll: Vec<f64>,
        num_parameters: i32,
        fitted: FittedParameters,
    ) -> PolarResult<Self> {
        if speeds.is_empty() || headings.is_empty() {
            return Err(PolarError::malformed(format!(
                "dataset needs at least one speed and one heading, got {}x{}",
                speeds.len(),
                headings.len()
            )));
        }
        let expected = speeds.len() * headings.len();
        if roll.len() != expected {
            return Err(PolarError::malformed(format!(
                "roll matrix has {} values, expected {}x{}={}",
                roll.len(),
                speeds.len(),
                headings.len(),
                expected
            )));
        }

        Ok(Self {
            speeds,
            headings,
            roll,
            num_parameters,
            fitted,
        })
    }

    /// Build from nested rows (`rows[speed][heading]`).
    pub fn from_rows(
        speeds: Vec<f64>,
        headings: Vec<f64>,
        rows: Vec<Vec<f64>>,
        fitted: FittedParameters,
    ) -> PolarResult<Self> {
        if rows.len() != speeds.len() || rows.iter().any(|r| r.len() != headings.len()) {
            return Err(PolarError::malformed(format!(
                "roll rows do not match {} speeds x {} headings",
                speeds.len(),
                headings.len()
            )));
        }
        let roll = rows.into_iter().flatten().collect();
        Self::new(speeds, headings, roll, 1, fitted)
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    pub fn headings(&self) -> &[f64] {
        &self.headings
    }

    /// Flat row-major roll matrix.
    pub fn roll_matrix(&self) -> &[f64] {
        &self.roll
    }

    /// Roll angle at grid point (`speed_idx`, `heading_idx`).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn roll(&self, speed_idx: usize, heading_idx: usize) -> f64 {
        assert!(heading_idx < self.headings.len(), "heading index out of range");
        self.roll[speed_idx * self.headings.len() + heading_idx]
    }

    /// Row of roll angles for one speed.
    pub fn row(&self, speed_idx: usize) -> Option<&[f64]> {
        let n = self.headings.len();
        self.roll.get(speed_idx * n..(speed_idx + 1) * n)
    }

    pub fn num_parameters(&self) -> i32 {
        self.num_parameters
    }

    pub fn fitted(&self) -> FittedParameters {
        self.fitted
    }

    /// `(min, max)` of the speed axis.
    pub fn speed_range(&self) -> (f64, f64) {
        let min = self.speeds.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.speeds.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }

    /// Largest speed in the dataset, the outer radius of the polar field.
    pub fn max_speed(&self) -> f64 {
        self.speed_range().1
    }

    /// Largest roll angle anywhere in the matrix.
    pub fn max_roll(&self) -> f64 {
        self.roll.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

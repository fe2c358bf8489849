//! Resampling the roll grid onto a polar display mesh.
//!
//! The mesh divides the chart into `angular_segments` wedges and
//! `radial_segments` rings, the outer ring ending at the dataset's maximum
//! speed. Each cell is evaluated at its midpoint: the display angle is mapped
//! back to vessel frame, interpolated, and classified for coloring.

use display_frame::{to_vessel_frame, DirectionMode};
use polar_common::{PolarDataset, PolarError, PolarResult};
use rayon::prelude::*;
use roll_style::{classify, Classification, DisplayMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interpolation::{interpolate_roll, InterpolationMethod};

/// Largest accepted number of wedges (0.1° each).
pub const MAX_ANGULAR_SEGMENTS: usize = 3600;

/// Largest accepted number of rings.
pub const MAX_RADIAL_SEGMENTS: usize = 1000;

/// Resolution of the display mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMesh {
    pub angular_segments: usize,
    pub radial_segments: usize,
}

impl Default for FieldMesh {
    fn default() -> Self {
        Self {
            angular_segments: 360,
            radial_segments: 50,
        }
    }
}

impl FieldMesh {
    pub fn cell_count(&self) -> usize {
        self.angular_segments * self.radial_segments
    }

    /// Check both axes against `1..=MAX_*_SEGMENTS`.
    pub fn validate(&self) -> PolarResult<()> {
        if self.angular_segments == 0 || self.radial_segments == 0 {
            return Err(PolarError::InvalidConfig(format!(
                "field mesh needs at least one segment per axis, got {}x{}",
                self.angular_segments, self.radial_segments
            )));
        }
        if self.angular_segments > MAX_ANGULAR_SEGMENTS || self.radial_segments > MAX_RADIAL_SEGMENTS {
            return Err(PolarError::InvalidConfig(format!(
                "field mesh {}x{} exceeds the {}x{} limit",
                self.angular_segments, self.radial_segments, MAX_ANGULAR_SEGMENTS, MAX_RADIAL_SEGMENTS
            )));
        }
        Ok(())
    }
}

/// Inputs that shape a field besides the dataset itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRequest {
    pub mesh: FieldMesh,
    pub vessel_heading: f64,
    pub max_roll: f64,
    pub direction_mode: DirectionMode,
    pub display_mode: DisplayMode,
    pub method: InterpolationMethod,
}

/// One mesh cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSample {
    /// Midpoint angle on the chart (deg).
    pub display_angle: f64,
    /// Midpoint angle in vessel frame (deg).
    pub vessel_angle: f64,
    /// Midpoint speed (kn).
    pub speed: f64,
    pub roll: f64,
    pub classification: Classification,
}

/// Evaluate the whole mesh, ring by ring from the center outwards.
///
/// Within a ring samples run clockwise from display angle 0.
pub fn resample_field(dataset: &PolarDataset, request: &FieldRequest) -> PolarResult<Vec<FieldSample>> {
    let mesh = request.mesh;
    mesh.validate()?;

    let max_speed = dataset.max_speed();
    let angular = mesh.angular_segments as f64;
    let radial = mesh.radial_segments as f64;

    let samples: Vec<FieldSample> = (0..mesh.radial_segments)
        .into_par_iter()
        .flat_map_iter(|r| {
            let mid_ratio = (r as f64 + 0.5) / radial;
            let speed = max_speed * mid_ratio;
            (0..mesh.angular_segments).map(move |a| {
                let display_angle = (a as f64 + 0.5) / angular * 360.0;
                let vessel_angle =
                    to_vessel_frame(display_angle, request.vessel_heading, request.direction_mode);
                let roll = interpolate_roll(dataset, speed, vessel_angle, request.method);
                FieldSample {
                    display_angle,
                    vessel_angle,
                    speed,
                    roll,
                    classification: classify(roll, request.max_roll, request.display_mode),
                }
            })
        })
        .collect();

    debug!(
        cells = samples.len(),
        max_speed = max_speed,
        method = %request.method,
        direction = %request.direction_mode,
        "Resampled polar field"
    );

    Ok(samples)
}

//! Common types and utilities shared across the roll polar crates.

pub mod angle;
pub mod dataset;
pub mod error;
pub mod names;
pub mod types;

pub use angle::{angle_difference, normalize_angle};
pub use dataset::{FittedParameters, PolarDataset};
pub use error::{PolarError, PolarResult};
pub use names::{parse_embedded_number, parse_file_hs_tz, parse_fitted_hs_tz, parse_leading_float};
pub use types::{
    ControlFile, DraftCategory, OperatingParameters, ParameterBounds, RangeViolation,
    RepresentativeDrafts, VesselInfo, WavePeriodType,
};

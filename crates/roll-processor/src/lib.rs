//! Roll interpolation and polar field resampling.
//!
//! - [`interpolation`]: roll lookups on a [`PolarDataset`](polar_common::PolarDataset)
//!   in two named schemes
//! - [`field`]: evaluation of a whole display mesh, in parallel
//! - [`config`]: engine configuration from defaults, environment or YAML

pub mod config;
pub mod field;
pub mod interpolation;

pub use config::PolarConfig;
pub use field::{
    resample_field, FieldMesh, FieldRequest, FieldSample, MAX_ANGULAR_SEGMENTS, MAX_RADIAL_SEGMENTS,
};
pub use interpolation::{
    interpolate_bracketed, interpolate_legacy, interpolate_roll, InterpolationMethod,
};

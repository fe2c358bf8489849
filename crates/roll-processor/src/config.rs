//! Configuration for roll processing and dataset loading.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use display_frame::DirectionMode;
use polar_common::{PolarError, PolarResult};
use roll_style::DisplayMode;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::field::FieldMesh;
use crate::interpolation::InterpolationMethod;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarConfig {
    /// Root of the dataset tree (holds the draft folders and control file).
    pub data_root: PathBuf,

    /// Control file name, relative to `data_root`.
    pub control_file_name: String,

    /// Interpolation method for roll lookups.
    pub interpolation: InterpolationMethod,

    /// Number of wedges in the field mesh.
    pub angular_segments: usize,

    /// Number of rings in the field mesh.
    pub radial_segments: usize,

    /// Field coloring.
    pub display_mode: DisplayMode,

    /// Chart orientation.
    pub direction_mode: DirectionMode,
}

impl Default for PolarConfig {
    fn default() -> Self {
        let mesh = FieldMesh::default();
        Self {
            data_root: PathBuf::from("PolarData"),
            control_file_name: "proll.ctl".to_string(),
            interpolation: InterpolationMethod::Legacy,
            angular_segments: mesh.angular_segments,
            radial_segments: mesh.radial_segments,
            display_mode: DisplayMode::Continuous,
            direction_mode: DirectionMode::NorthUp,
        }
    }
}

fn env_parse<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(val) = std::env::var(key) {
        match val.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(key = %key, value = %val, "Ignoring invalid environment value"),
        }
    }
}

impl PolarConfig {
    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("POLAR_DATA_ROOT") {
            config.data_root = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("POLAR_CONTROL_FILE") {
            config.control_file_name = val;
        }

        env_parse("POLAR_INTERPOLATION", &mut config.interpolation);
        env_parse("POLAR_ANGULAR_SEGMENTS", &mut config.angular_segments);
        env_parse("POLAR_RADIAL_SEGMENTS", &mut config.radial_segments);
        env_parse("POLAR_DISPLAY_MODE", &mut config.display_mode);
        env_parse("POLAR_DIRECTION_MODE", &mut config.direction_mode);

        config
    }

    /// Load configuration from a YAML file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> PolarResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PolarError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> PolarResult<Self> {
        serde_yaml::from_str(text)
            .map_err(|e| PolarError::InvalidConfig(format!("invalid YAML config: {}", e)))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> PolarResult<()> {
        self.mesh().validate()?;

        if self.control_file_name.trim().is_empty() {
            return Err(PolarError::InvalidConfig(
                "control_file_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Field mesh described by this configuration.
    pub fn mesh(&self) -> FieldMesh {
        FieldMesh {
            angular_segments: self.angular_segments,
            radial_segments: self.radial_segments,
        }
    }

    /// Full path of the control file.
    pub fn control_file_path(&self) -> PathBuf {
        self.data_root.join(&self.control_file_name)
    }
}

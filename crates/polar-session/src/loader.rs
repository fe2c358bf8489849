//! Synchronous control file and dataset loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bpolar_parser::decode_polar;
use control_parser::parse_control_bytes;
use polar_common::{
    ControlFile, FittedParameters, OperatingParameters, PolarDataset, PolarError, PolarResult,
};
use polar_locator::{DatasetLocation, DatasetLocator, FileSystem};
use roll_processor::PolarConfig;
use tracing::{debug, info};

/// A decoded dataset and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Arc<PolarDataset>,
    pub location: DatasetLocation,
}

/// Locate → read → decode pipeline over a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    locator: DatasetLocator,
    control_path: PathBuf,
}

impl DatasetLoader {
    pub fn new(fs: Arc<dyn FileSystem>, data_root: impl Into<PathBuf>, control_file_name: &str) -> Self {
        let data_root = data_root.into();
        let control_path = data_root.join(control_file_name);
        Self {
            locator: DatasetLocator::new(fs, data_root),
            control_path,
        }
    }

    /// Loader for the data root and control file named in `config`.
    pub fn from_config(fs: Arc<dyn FileSystem>, config: &PolarConfig) -> Self {
        Self::new(fs, config.data_root.clone(), &config.control_file_name)
    }

    pub fn control_path(&self) -> &Path {
        &self.control_path
    }

    pub fn locator(&self) -> &DatasetLocator {
        &self.locator
    }

    /// Read and parse the control file.
    pub fn load_control_file(&self) -> PolarResult<ControlFile> {
        let bytes = self
            .locator
            .file_system()
            .read_binary(&self.control_path)
            .map_err(|e| {
                PolarError::ConfigRead(format!("{}: {}", self.control_path.display(), e))
            })?;
        let control = parse_control_bytes(&bytes)?;
        info!(
            path = %self.control_path.display(),
            vessel = %control.vessel_info.name,
            defaulted = control.defaulted_keys.len(),
            "Loaded control file"
        );
        Ok(control)
    }

    /// Locate, read and decode the dataset for `params`.
    pub fn load_dataset(&self, params: &OperatingParameters) -> PolarResult<LoadedDataset> {
        let location = self.locator.locate(params)?;
        let bytes = self
            .locator
            .file_system()
            .read_binary(&location.path)
            .map_err(|e| PolarError::DataRead(format!("{}: {}", location.path.display(), e)))?;
        debug!(path = %location.path.display(), bytes = bytes.len(), "Read dataset file");

        let requested = FittedParameters {
            gm: location.folder_gm,
            hs: params.hs,
            tz: params.tz,
        };
        let dataset = decode_polar(&bytes, &location.file_name, requested)?;

        Ok(LoadedDataset {
            dataset: Arc::new(dataset),
            location,
        })
    }
}

//! Session state machine.
//!
//! ```text
//! Uninitialized ──control file──► ControlFileLoaded ──dataset──► DatasetReady ─┐
//!                                                                      ▲       │
//!                                                                      └───────┘
//!                                                                  later loads
//! ```
//!
//! A failed load never changes the state or the current dataset.

use std::sync::Arc;

use chrono::Utc;
use display_frame::DirectionMode;
use polar_common::{
    ControlFile, OperatingParameters, PolarDataset, PolarError, PolarResult, RangeViolation,
};
use polar_locator::DatasetLocation;
use roll_processor::{interpolate_roll, resample_field, FieldMesh, FieldRequest, FieldSample, InterpolationMethod};
use roll_style::{is_in_danger_zone, DisplayMode};
use serde::Serialize;
use tracing::info;

use crate::cases::{validate_case_id, SavedCase};
use crate::loader::{DatasetLoader, LoadedDataset};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Uninitialized,
    ControlFileLoaded,
    DatasetReady,
}

/// Control file, operating parameters, current dataset and saved cases.
#[derive(Debug, Clone)]
pub struct PolarSession {
    control: Option<ControlFile>,
    parameters: OperatingParameters,
    current: Option<LoadedDataset>,
    saved_cases: Vec<SavedCase>,
    interpolation: InterpolationMethod,
}

impl Default for PolarSession {
    fn default() -> Self {
        Self::new(InterpolationMethod::default())
    }
}

impl PolarSession {
    pub fn new(interpolation: InterpolationMethod) -> Self {
        Self {
            control: None,
            parameters: OperatingParameters::default(),
            current: None,
            saved_cases: Vec::new(),
            interpolation,
        }
    }

    pub fn state(&self) -> SessionState {
        match (&self.control, &self.current) {
            (None, _) => SessionState::Uninitialized,
            (Some(_), None) => SessionState::ControlFileLoaded,
            (Some(_), Some(_)) => SessionState::DatasetReady,
        }
    }

    pub fn control_file(&self) -> Option<&ControlFile> {
        self.control.as_ref()
    }

    pub fn parameters(&self) -> &OperatingParameters {
        &self.parameters
    }

    /// Replace the operating parameters. The current dataset is kept until
    /// the next load.
    pub fn set_parameters(&mut self, parameters: OperatingParameters) {
        self.parameters = parameters;
    }

    pub fn interpolation(&self) -> InterpolationMethod {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, method: InterpolationMethod) {
        self.interpolation = method;
    }

    pub fn dataset(&self) -> Option<&Arc<PolarDataset>> {
        self.current.as_ref().map(|c| &c.dataset)
    }

    pub fn location(&self) -> Option<&DatasetLocation> {
        self.current.as_ref().map(|c| &c.location)
    }

    /// Install a parsed control file, replacing any previous one.
    pub fn apply_control_file(&mut self, control: ControlFile) {
        let from = self.state();
        self.control = Some(control);
        info!(from = ?from, to = ?self.state(), "Control file applied");
    }

    /// Install a loaded dataset, replacing the current one.
    pub fn apply_dataset(&mut self, loaded: LoadedDataset) -> PolarResult<()> {
        self.ensure_control_loaded()?;
        let from = self.state();
        info!(
            from = ?from,
            file = %loaded.location.file_name,
            gm_folder = %loaded.location.gm_folder,
            "Dataset applied"
        );
        self.current = Some(loaded);
        Ok(())
    }

    pub(crate) fn ensure_control_loaded(&self) -> PolarResult<()> {
        if self.control.is_none() {
            return Err(PolarError::NotReady(
                "control file must be loaded before datasets".to_string(),
            ));
        }
        Ok(())
    }

    /// Read the control file through `loader` and apply it.
    pub fn load_control_file(&mut self, loader: &DatasetLoader) -> PolarResult<()> {
        let control = loader.load_control_file()?;
        self.apply_control_file(control);
        Ok(())
    }

    /// Load the dataset for the current parameters through `loader`.
    pub fn load_dataset(&mut self, loader: &DatasetLoader) -> PolarResult<&DatasetLocation> {
        self.ensure_control_loaded()?;
        let loaded = loader.load_dataset(&self.parameters)?;
        self.apply_dataset(loaded)?;
        self.location()
            .ok_or_else(|| PolarError::NotReady("no dataset loaded".to_string()))
    }

    /// Fields outside their allowed range, using the control-file bounds
    /// when a control file is loaded.
    pub fn range_violations(&self) -> Vec<RangeViolation> {
        self.parameters
            .range_violations(self.control.as_ref().map(|c| &c.parameter_bounds))
    }

    /// Interpolated roll at the current speed and heading.
    pub fn current_roll(&self) -> Option<f64> {
        self.roll_for(&self.parameters)
    }

    fn roll_for(&self, params: &OperatingParameters) -> Option<f64> {
        self.dataset()
            .map(|ds| interpolate_roll(ds, params.speed, params.heading, self.interpolation))
    }

    /// Whether the current roll exceeds the allowed maximum. `false` without
    /// a dataset.
    pub fn is_in_danger_zone(&self) -> bool {
        self.current_roll()
            .map(|roll| is_in_danger_zone(roll, self.parameters.max_roll_angle))
            .unwrap_or(false)
    }

    /// Resample the current dataset onto a display mesh.
    pub fn field(
        &self,
        mesh: FieldMesh,
        display_mode: DisplayMode,
        direction_mode: DirectionMode,
    ) -> PolarResult<Vec<FieldSample>> {
        let dataset = self
            .dataset()
            .ok_or_else(|| PolarError::NotReady("no dataset loaded".to_string()))?;
        let request = FieldRequest {
            mesh,
            vessel_heading: self.parameters.heading,
            max_roll: self.parameters.max_roll_angle,
            direction_mode,
            display_mode,
            method: self.interpolation,
        };
        resample_field(dataset, &request)
    }

    /// Snapshot the current parameters under `id`.
    pub fn save_case(&mut self, id: &str) -> PolarResult<&SavedCase> {
        validate_case_id(id)?;
        let case = SavedCase {
            id: id.to_string(),
            parameters: self.parameters.clone(),
            timestamp: Utc::now(),
            is_in_danger_zone: self.is_in_danger_zone(),
            dataset: self.dataset().cloned(),
        };
        info!(id = %case.id, danger = case.is_in_danger_zone, "Saved case");
        self.saved_cases.push(case);
        self.saved_cases
            .last()
            .ok_or_else(|| PolarError::InvalidCase("case was not stored".to_string()))
    }

    /// Delete every case with `id`. Returns how many were removed.
    pub fn delete_case(&mut self, id: &str) -> usize {
        let before = self.saved_cases.len();
        self.saved_cases.retain(|c| c.id != id);
        let removed = before - self.saved_cases.len();
        info!(id = %id, removed = removed, "Deleted case");
        removed
    }

    pub fn saved_cases(&self) -> &[SavedCase] {
        &self.saved_cases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use control_parser::parse_control_text;
    use polar_common::FittedParameters;
    use std::path::PathBuf;
    use test_utils::{grid, SAMPLE_CONTROL_FILE};

    fn loaded() -> LoadedDataset {
        let dataset = PolarDataset::new(
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
        .unwrap();
        LoadedDataset {
            dataset: Arc::new(dataset),
            location: DatasetLocation {
                path: PathBuf::from("/d/design/GM=2.0/bin/R_H5.0_T10.0.bin"),
                draft_category: polar_common::DraftCategory::Design,
                gm_folder: "GM=2.0".to_string(),
                folder_gm: 2.0,
                file_name: "R_H5.0_T10.0.bin".to_string(),
                file_hs: 5.0,
                file_tz: 10.0,
                gm_distance: 0.0,
                sea_state_distance: 0.0,
            },
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut session = PolarSession::default();
        assert_eq!(session.state(), SessionState::Uninitialized);

        let err = session.apply_dataset(loaded()).unwrap_err();
        assert_eq!(err.kind(), "NotReady");
        assert_eq!(session.state(), SessionState::Uninitialized);

        session.apply_control_file(parse_control_text(SAMPLE_CONTROL_FILE));
        assert_eq!(session.state(), SessionState::ControlFileLoaded);

        session.apply_dataset(loaded()).unwrap();
        assert_eq!(session.state(), SessionState::DatasetReady);

        session.apply_dataset(loaded()).unwrap();
        assert_eq!(session.state(), SessionState::DatasetReady);
    }

    #[test]
    fn test_danger_zone_without_dataset_is_false() {
        let mut session = PolarSession::default();
        session.set_parameters(OperatingParameters {
            max_roll_angle: 0.0,
            ..Default::default()
        });
        assert!(!session.is_in_danger_zone());
        let case = session.save_case("nodata").unwrap();
        assert!(!case.is_in_danger_zone);
        assert!(case.dataset.is_none());
    }

    #[test]
    fn test_save_case_evaluates_danger_zone() {
        let mut session = PolarSession::new(InterpolationMethod::Bracketed);
        session.apply_control_file(parse_control_text(SAMPLE_CONTROL_FILE));
        session.apply_dataset(loaded()).unwrap();

        // speed 10, heading 90 -> 14 deg
        session.set_parameters(OperatingParameters {
            speed: 10.0,
            heading: 90.0,
            max_roll_angle: 12.0,
            ..Default::default()
        });
        assert_eq!(session.current_roll(), Some(14.0));
        let case = session.save_case("beam").unwrap();
        assert!(case.is_in_danger_zone);
        assert!(case.dataset.is_some());

        session.set_parameters(OperatingParameters {
            speed: 10.0,
            heading: 0.0,
            max_roll_angle: 12.0,
            ..Default::default()
        });
        assert!(!session.save_case("head").unwrap().is_in_danger_zone);
    }

    #[test]
    fn test_delete_removes_all_matching() {
        let mut session = PolarSession::default();
        session.save_case("a").unwrap();
        session.save_case("b").unwrap();
        session.save_case("a").unwrap();

        assert_eq!(session.delete_case("a"), 2);
        assert_eq!(session.saved_cases().len(), 1);
        assert_eq!(session.saved_cases()[0].id, "b");
        assert_eq!(session.delete_case("zzz"), 0);
    }

    #[test]
    fn test_invalid_case_id() {
        let mut session = PolarSession::default();
        let err = session.save_case("much-too-long-id").unwrap_err();
        assert_eq!(err.kind(), "InvalidCase");
        assert!(session.saved_cases().is_empty());
    }

    #[test]
    fn test_field_requires_dataset() {
        let session = PolarSession::default();
        let err = session
            .field(FieldMesh::default(), DisplayMode::Continuous, DirectionMode::NorthUp)
            .unwrap_err();
        assert_eq!(err.kind(), "NotReady");
    }

    #[test]
    fn test_range_violations_use_control_bounds() {
        let mut session = PolarSession::default();
        session.set_parameters(OperatingParameters {
            gm: 4.8,
            ..Default::default()
        });
        assert!(session.range_violations().is_empty());

        // sample bounds cap GM at 4.5
        session.apply_control_file(parse_control_text(SAMPLE_CONTROL_FILE));
        let fields: Vec<_> = session.range_violations().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["gm"]);
    }
}

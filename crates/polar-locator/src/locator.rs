//! Nearest-match search over the dataset directory tree.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use polar_common::{
    parse_embedded_number, parse_file_hs_tz, OperatingParameters, PolarError, PolarResult,
};
use serde::Serialize;
use tracing::debug;

use crate::fs::FileSystem;

/// Name of the data subdirectory inside each GM folder.
pub const BIN_DIR: &str = "bin";

/// GM folder chosen for a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GmMatch {
    pub name: String,
    pub gm: f64,
    pub distance: f64,
}

/// Sea-state file chosen for a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeaStateMatch {
    pub name: String,
    pub hs: f64,
    pub tz: f64,
    pub distance: f64,
}

/// Resolved dataset file and how it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetLocation {
    pub path: PathBuf,
    pub draft_category: polar_common::DraftCategory,
    pub gm_folder: String,
    /// GM value embedded in the folder name.
    pub folder_gm: f64,
    pub file_name: String,
    pub file_hs: f64,
    pub file_tz: f64,
    pub gm_distance: f64,
    pub sea_state_distance: f64,
}

/// Order candidates by distance, then by name so that ties do not depend on
/// listing order.
fn by_distance_then_name(a: (f64, &str), b: (f64, &str)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1))
}

/// Pick the folder whose embedded number is closest to `gm`.
///
/// Names without a number are skipped.
pub fn closest_gm_folder<S: AsRef<str>>(names: &[S], gm: f64) -> Option<GmMatch> {
    names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let folder_gm = parse_embedded_number(name)?;
            let distance = (folder_gm - gm).abs();
            (!distance.is_nan()).then(|| GmMatch {
                name: name.to_string(),
                gm: folder_gm,
                distance,
            })
        })
        .min_by(|a, b| by_distance_then_name((a.distance, &a.name), (b.distance, &b.name)))
}

/// Pick the file whose `(Hs, Tz)` is closest to the request by plain
/// Euclidean distance.
///
/// Names without both `_H<float>_` and `_T<float>.` groups are skipped.
pub fn closest_sea_state_file<S: AsRef<str>>(
    names: &[S],
    hs: f64,
    tz: f64,
) -> Option<SeaStateMatch> {
    names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let (file_hs, file_tz) = parse_file_hs_tz(name)?;
            let distance = ((file_hs - hs).powi(2) + (file_tz - tz).powi(2)).sqrt();
            (!distance.is_nan()).then(|| SeaStateMatch {
                name: name.to_string(),
                hs: file_hs,
                tz: file_tz,
                distance,
            })
        })
        .min_by(|a, b| by_distance_then_name((a.distance, &a.name), (b.distance, &b.name)))
}

/// Resolves operating parameters to a dataset file under `root`.
#[derive(Clone)]
pub struct DatasetLocator {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl std::fmt::Debug for DatasetLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetLocator")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl DatasetLocator {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Find the dataset file for `params`.
    pub fn locate(&self, params: &OperatingParameters) -> PolarResult<DatasetLocation> {
        let category = params.draft_category;

        // Stage 1: draft category folder, exact name.
        let root_entries = self.list(&self.root)?;
        if !root_entries.iter().any(|n| n == category.as_str()) {
            return Err(PolarError::directory_not_found(
                self.root.join(category.as_str()).display().to_string(),
            ));
        }
        let draft_dir = self.root.join(category.as_str());

        // Stage 2: GM folder.
        let folders: Vec<String> = self
            .list(&draft_dir)?
            .into_iter()
            .filter(|name| self.fs.is_dir(&draft_dir.join(name)))
            .collect();
        let gm_match = closest_gm_folder(&folders, params.gm)
            .ok_or_else(|| PolarError::no_match("GM folder", draft_dir.display().to_string()))?;
        debug!(
            draft = %category,
            requested_gm = params.gm,
            folder = %gm_match.name,
            distance = gm_match.distance,
            "Selected GM folder"
        );

        // Stage 3: sea-state file inside bin/.
        let bin_dir = draft_dir.join(&gm_match.name).join(BIN_DIR);
        if !self.fs.is_dir(&bin_dir) {
            return Err(PolarError::directory_not_found(
                bin_dir.display().to_string(),
            ));
        }
        let files = self.list(&bin_dir)?;
        let file_match = closest_sea_state_file(&files, params.hs, params.tz).ok_or_else(|| {
            PolarError::no_match("sea state file", bin_dir.display().to_string())
        })?;
        debug!(
            requested_hs = params.hs,
            requested_tz = params.tz,
            file = %file_match.name,
            distance = file_match.distance,
            candidates = files.len(),
            "Selected sea state file"
        );

        Ok(DatasetLocation {
            path: bin_dir.join(&file_match.name),
            draft_category: category,
            gm_folder: gm_match.name,
            folder_gm: gm_match.gm,
            file_name: file_match.name,
            file_hs: file_match.hs,
            file_tz: file_match.tz,
            gm_distance: gm_match.distance,
            sea_state_distance: file_match.distance,
        })
    }

    fn list(&self, dir: &Path) -> PolarResult<Vec<String>> {
        self.fs.list_directory(dir).map_err(|e| {
            debug!(path = %dir.display(), error = %e, "Directory listing failed");
            PolarError::directory_not_found(dir.display().to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_gm_folder() {
        let m = closest_gm_folder(&["GM=1.0m", "GM=2.5m"], 2.0).unwrap();
        assert_eq!(m.name, "GM=2.5m");
        assert_eq!(m.gm, 2.5);
        assert_eq!(m.distance, 0.5);
    }

    #[test]
    fn test_gm_folders_without_number_skipped() {
        assert!(closest_gm_folder(&["bin", "notes"], 2.0).is_none());
        let m = closest_gm_folder(&["readme", "gm_3"], 0.0).unwrap();
        assert_eq!(m.name, "gm_3");
    }

    #[test]
    fn test_gm_tie_breaks_by_name() {
        let a = closest_gm_folder(&["GM_2.5", "GM_1.5"], 2.0).unwrap();
        let b = closest_gm_folder(&["GM_1.5", "GM_2.5"], 2.0).unwrap();
        assert_eq!(a.name, "GM_1.5");
        assert_eq!(b.name, "GM_1.5");
    }

    #[test]
    fn test_closest_sea_state_file() {
        let files = [
            "MAXROLL_H12.0_T9.0.bpolar",
            "MAXROLL_H10.0_T10.5.bpolar",
            "README.txt",
        ];
        let m = closest_sea_state_file(&files, 10.0, 10.0).unwrap();
        assert_eq!(m.name, "MAXROLL_H10.0_T10.5.bpolar");
        assert_eq!(m.hs, 10.0);
        assert_eq!(m.tz, 10.5);
        assert_eq!(m.distance, 0.5);
    }

    #[test]
    fn test_sea_state_tie_breaks_by_name() {
        let forward = ["R_H4.0_T10.0.bin", "R_H6.0_T10.0.bin"];
        let reverse = ["R_H6.0_T10.0.bin", "R_H4.0_T10.0.bin"];
        assert_eq!(
            closest_sea_state_file(&forward, 5.0, 10.0).unwrap().name,
            "R_H4.0_T10.0.bin"
        );
        assert_eq!(
            closest_sea_state_file(&reverse, 5.0, 10.0).unwrap().name,
            "R_H4.0_T10.0.bin"
        );
    }

    #[test]
    fn test_nan_request_matches_nothing() {
        assert!(closest_gm_folder(&["GM=1.0"], f64::NAN).is_none());
        assert!(closest_sea_state_file(&["A_H1_T2.x"], f64::NAN, 2.0).is_none());
    }
}

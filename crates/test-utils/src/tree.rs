//! On-disk dataset trees for integration tests.
//!
//! Builds `<root>/<draft>/<gm folder>/bin/<file>` layouts inside a
//! [`tempfile::TempDir`] that is removed when the tree is dropped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A dataset tree living in a temporary directory.
pub struct DatasetTree {
    dir: TempDir,
}

impl DatasetTree {
    /// Root of the tree, the directory that holds the draft folders.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a dataset file inside the tree.
    pub fn dataset_path(&self, draft: &str, gm_folder: &str, file: &str) -> PathBuf {
        self.root().join(draft).join(gm_folder).join("bin").join(file)
    }
}

/// Builder for [`DatasetTree`].
///
/// # Example
///
/// ```
/// use test_utils::{encode_polar_dataset, DatasetTreeBuilder, SAMPLE_CONTROL_FILE};
///
/// let tree = DatasetTreeBuilder::new()
///     .control_file("proll.ctl", SAMPLE_CONTROL_FILE)
///     .dataset("design", "GM=2.0m", "R_H5.0_T10.0.bpolar",
///         encode_polar_dataset(&[0.0], &[0.0], &[1.0]))
///     .build()
///     .unwrap();
/// assert!(tree.dataset_path("design", "GM=2.0m", "R_H5.0_T10.0.bpolar").exists());
/// ```
#[derive(Debug, Default)]
pub struct DatasetTreeBuilder {
    files: Vec<(PathBuf, Vec<u8>)>,
    dirs: Vec<PathBuf>,
}

impl DatasetTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control file at the root.
    pub fn control_file(mut self, name: &str, text: &str) -> Self {
        self.files.push((PathBuf::from(name), text.as_bytes().to_vec()));
        self
    }

    /// Add a dataset file under `<draft>/<gm_folder>/bin/`.
    pub fn dataset(mut self, draft: &str, gm_folder: &str, file: &str, bytes: Vec<u8>) -> Self {
        let rel = Path::new(draft).join(gm_folder).join("bin").join(file);
        self.files.push((rel, bytes));
        self
    }

    /// Add an empty directory, relative to the root.
    pub fn dir(mut self, rel: impl AsRef<Path>) -> Self {
        self.dirs.push(rel.as_ref().to_path_buf());
        self
    }

    /// Add an arbitrary file, relative to the root.
    pub fn file(mut self, rel: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.push((rel.as_ref().to_path_buf(), bytes.into()));
        self
    }

    /// Write everything to a new temporary directory.
    pub fn build(self) -> io::Result<DatasetTree> {
        let dir = tempfile::tempdir()?;
        for rel in &self.dirs {
            fs::create_dir_all(dir.path().join(rel))?;
        }
        for (rel, bytes) in &self.files {
            let path = dir.path().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, bytes)?;
        }
        Ok(DatasetTree { dir })
    }
}

//! File-system collaborator.
//!
//! The engine never touches platform I/O directly; it only calls these
//! primitives. [`LocalFileSystem`] maps them onto `std::fs`, and
//! [`MemoryFileSystem`] keeps a tree in memory for embedding hosts and tests.

use std::io;
use std::path::{Path, PathBuf};

/// Raw file access used by the locator and the session.
pub trait FileSystem: Send + Sync {
    /// Read a whole file as bytes.
    fn read_binary(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Read a whole file as UTF-8 text.
    fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read_binary(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Names of the entries directly inside `path`, in listing order.
    fn list_directory(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// `std::fs` backed file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn read_binary(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_directory(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// In-memory file tree.
///
/// Directories are implied by the files inserted below them, or added
/// explicitly with [`MemoryFileSystem::insert_dir`]. Listings come back in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: Vec<(PathBuf, Vec<u8>)>,
    dirs: Vec<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert_file(&mut self, path: impl AsRef<Path>, data: impl Into<Vec<u8>>) -> &mut Self {
        let path = path.as_ref().to_path_buf();
        let data = data.into();
        match self.files.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = data,
            None => self.files.push((path, data)),
        }
        self
    }

    /// Add an (empty) directory.
    pub fn insert_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref().to_path_buf();
        if !self.dirs.contains(&path) {
            self.dirs.push(path);
        }
        self
    }

    fn all_paths(&self) -> impl Iterator<Item = &Path> {
        self.dirs
            .iter()
            .map(PathBuf::as_path)
            .chain(self.files.iter().map(|(p, _)| p.as_path()))
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_binary(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, data)| data.clone())
            .ok_or_else(|| Self::not_found(path))
    }

    fn list_directory(&self, path: &Path) -> io::Result<Vec<String>> {
        if !self.is_dir(path) {
            return Err(Self::not_found(path));
        }
        let mut names: Vec<String> = Vec::new();
        for p in self.all_paths() {
            let Ok(rest) = p.strip_prefix(path) else {
                continue;
            };
            if let Some(first) = rest.components().next() {
                let name = first.as_os_str().to_string_lossy().into_owned();
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.iter().any(|(p, _)| p == path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.iter().any(|d| d == path)
            || self
                .all_paths()
                .any(|p| p != path && p.starts_with(path))
    }
}

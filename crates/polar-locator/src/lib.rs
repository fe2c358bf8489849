//! Dataset resolution for roll polar data.
//!
//! Datasets live in a tree that encodes continuous parameters in names:
//!
//! ```text
//! <root>/<draft category>/<folder with GM value>/bin/<*_H<hs>_T<tz>.<ext>>
//! ```
//!
//! [`DatasetLocator`] walks it in three stages:
//!
//! ```text
//! OperatingParameters
//!      │
//!      ├─► draft category folder (exact name)
//!      │
//!      ├─► GM folder  (min |folder GM − gm|)
//!      │
//!      └─► bin file   (min Euclidean distance in Hs–Tz)
//!               │
//!               ▼
//!          DatasetLocation
//! ```
//!
//! All file access goes through the [`FileSystem`] collaborator.

pub mod fs;
pub mod locator;

pub use fs::{FileSystem, LocalFileSystem, MemoryFileSystem};
pub use locator::{
    closest_gm_folder, closest_sea_state_file, DatasetLocation, DatasetLocator, GmMatch,
    SeaStateMatch, BIN_DIR,
};

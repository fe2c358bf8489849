//! Shared test utilities for the roll polar workspace.
//!
//! This crate provides common testing infrastructure including:
//! - A binary polar dataset encoder
//! - Synthetic roll grid generators
//! - On-disk dataset trees in a temporary directory
//! - Sample control file text
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{encode_polar_dataset, DatasetTreeBuilder};
//! ```

pub mod fixtures;
pub mod generators;
pub mod tree;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use tree::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(12.50001, 12.5, 1e-3); // passes
/// assert_approx_eq!(13.0, 12.5, 1e-3);     // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

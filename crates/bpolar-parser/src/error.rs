//! Error types for binary polar decoding.

use polar_common::PolarError;
use thiserror::Error;

/// Result type for decoder operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Ways a polar data file can be malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Fewer bytes than a section needs.
    #[error("{section} truncated: need {needed} bytes, {available} available")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    /// Header count that cannot describe a grid.
    #[error("invalid {field} in header: {value}")]
    InvalidCount { field: &'static str, value: i32 },

    /// Header counts whose product overflows the address space.
    #[error("grid of {num_speeds}x{num_headings} values is too large")]
    TooLarge { num_speeds: i32, num_headings: i32 },

    /// NaN or infinite value on a grid axis.
    #[error("non-finite {axis} value {value} at index {index}")]
    NonFiniteAxis {
        axis: &'static str,
        index: usize,
        value: f64,
    },
}

impl From<DecodeError> for PolarError {
    fn from(err: DecodeError) -> Self {
        PolarError::MalformedDataFile(err.to_string())
    }
}

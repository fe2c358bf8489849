//! Error types for roll polar operations.

use thiserror::Error;

/// Result type alias using PolarError.
pub type PolarResult<T> = Result<T, PolarError>;

/// Primary error type for dataset resolution, decoding and session handling.
#[derive(Debug, Error)]
pub enum PolarError {
    // === Control file ===
    #[error("Failed to read control file: {0}")]
    ConfigRead(String),

    // === Dataset resolution ===
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("No matching {stage} found in {searched}")]
    NoMatchFound { stage: String, searched: String },

    // === Dataset decoding ===
    #[error("Malformed data file: {0}")]
    MalformedDataFile(String),

    #[error("Failed to read data file: {0}")]
    DataRead(String),

    // === Session / configuration ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid saved case: {0}")]
    InvalidCase(String),

    #[error("Session not ready: {0}")]
    NotReady(String),
}

impl PolarError {
    /// Create a DirectoryNotFound error.
    pub fn directory_not_found(path: impl Into<String>) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    /// Create a NoMatchFound error for a locator stage.
    pub fn no_match(stage: impl Into<String>, searched: impl Into<String>) -> Self {
        Self::NoMatchFound {
            stage: stage.into(),
            searched: searched.into(),
        }
    }

    /// Create a MalformedDataFile error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDataFile(msg.into())
    }

    /// Short machine-readable tag for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PolarError::ConfigRead(_) => "ConfigReadError",
            PolarError::DirectoryNotFound(_) => "DirectoryNotFound",
            PolarError::NoMatchFound { .. } => "NoMatchFound",
            PolarError::MalformedDataFile(_) => "MalformedDataFile",
            PolarError::DataRead(_) => "DataReadError",
            PolarError::InvalidConfig(_) => "InvalidConfig",
            PolarError::InvalidCase(_) => "InvalidCase",
            PolarError::NotReady(_) => "NotReady",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_message() {
        let err = PolarError::no_match("GM folder", "/data/design");
        assert_eq!(err.to_string(), "No matching GM folder found in /data/design");
        assert_eq!(err.kind(), "NoMatchFound");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(PolarError::ConfigRead("x".into()).kind(), "ConfigReadError");
        assert_eq!(PolarError::malformed("short").kind(), "MalformedDataFile");
        assert_eq!(PolarError::directory_not_found("a").kind(), "DirectoryNotFound");
    }
}

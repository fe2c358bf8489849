//! Saved operating cases.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use polar_common::{OperatingParameters, PolarDataset, PolarError, PolarResult};
use serde::Serialize;

/// Maximum length of a case id, in characters.
pub const MAX_CASE_ID_LEN: usize = 12;

/// Snapshot of the operating conditions at one moment.
#[derive(Debug, Clone, Serialize)]
pub struct SavedCase {
    pub id: String,
    pub parameters: OperatingParameters,
    pub timestamp: DateTime<Utc>,
    pub is_in_danger_zone: bool,
    /// Dataset that was loaded when the case was saved.
    #[serde(skip)]
    pub dataset: Option<Arc<PolarDataset>>,
}

/// Check a case id: 1 to 12 characters, not only whitespace.
pub fn validate_case_id(id: &str) -> PolarResult<()> {
    if id.trim().is_empty() {
        return Err(PolarError::InvalidCase("case id must not be empty".to_string()));
    }
    let len = id.chars().count();
    if len > MAX_CASE_ID_LEN {
        return Err(PolarError::InvalidCase(format!(
            "case id '{}' is {} characters, at most {} allowed",
            id, len, MAX_CASE_ID_LEN
        )));
    }
    Ok(())
}

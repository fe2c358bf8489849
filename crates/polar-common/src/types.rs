//! Vessel, control-file and operating-condition types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PolarError;

/// Loading condition a dataset subtree was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftCategory {
    Scantling,
    Design,
    Intermediate,
}

impl DraftCategory {
    pub const ALL: [DraftCategory; 3] = [
        DraftCategory::Scantling,
        DraftCategory::Design,
        DraftCategory::Intermediate,
    ];

    /// Folder name of this category in the dataset tree.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scantling => "scantling",
            Self::Design => "design",
            Self::Intermediate => "intermediate",
        }
    }
}

impl fmt::Display for DraftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftCategory {
    type Err = PolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| {
                PolarError::InvalidConfig(format!("unknown draft category '{}'", name))
            })
    }
}

/// Wave period definition the user entered `tz` under.
///
/// Recorded with the case; the engine always searches on the entered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WavePeriodType {
    /// Zero up-crossing period.
    #[default]
    Tz,
    /// Peak period, Pierson-Moskowitz spectrum.
    TpPierson,
    /// Mean period, Pierson-Moskowitz spectrum.
    TmPierson,
    /// Peak period, JONSWAP spectrum.
    TpJonswap,
    /// Mean period, JONSWAP spectrum.
    TmJonswap,
}

/// Vessel identification from the control file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselInfo {
    pub imo: String,
    pub name: String,
}

/// Allowed ranges for the sea-state and stability inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    pub gm_lower: f64,
    pub gm_upper: f64,
    pub hs_lower: f64,
    pub hs_upper: f64,
    pub tz_lower: f64,
    pub tz_upper: f64,
}

/// Representative mean draft (m) for each draft category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeDrafts {
    pub scantling: f64,
    pub design: f64,
    pub intermediate: f64,
}

impl RepresentativeDrafts {
    pub fn get(&self, category: DraftCategory) -> f64 {
        match category {
            DraftCategory::Scantling => self.scantling,
            DraftCategory::Design => self.design,
            DraftCategory::Intermediate => self.intermediate,
        }
    }
}

/// Parsed control file. Replaced wholesale on reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlFile {
    pub vessel_info: VesselInfo,
    pub parameter_bounds: ParameterBounds,
    pub representative_drafts: RepresentativeDrafts,
    /// Recognized keys that were missing or unparseable and took their default.
    #[serde(default)]
    pub defaulted_keys: Vec<String>,
}

/// User-entered operating conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingParameters {
    pub draft_category: DraftCategory,
    /// Draft at the aft peak (m).
    pub draft_aft_peak: f64,
    /// Draft at the fore peak (m).
    pub draft_fore_peak: f64,
    /// Metacentric height (m).
    pub gm: f64,
    /// Vessel heading, clockwise from North to bow (deg).
    pub heading: f64,
    /// Speed through water (kn).
    pub speed: f64,
    /// Maximum allowed roll angle (deg).
    pub max_roll_angle: f64,
    /// Significant wave height (m).
    pub hs: f64,
    /// Wave period (s).
    pub tz: f64,
    /// Wave direction (deg).
    pub wave_direction: f64,
    #[serde(default)]
    pub wave_period_type: WavePeriodType,
}

impl Default for OperatingParameters {
    fn default() -> Self {
        Self {
            draft_category: DraftCategory::Design,
            draft_aft_peak: 10.0,
            draft_fore_peak: 10.0,
            gm: 2.0,
            heading: 18.0,
            speed: 12.0,
            max_roll_angle: 20.0,
            hs: 5.0,
            tz: 10.0,
            wave_direction: 130.0,
            wave_period_type: WavePeriodType::Tz,
        }
    }
}

/// A parameter outside its allowed range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeViolation {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} outside [{}, {}]",
            self.field, self.value, self.min, self.max
        )
    }
}

impl OperatingParameters {
    /// Mean of the aft and fore peak drafts.
    pub fn average_draft(&self) -> f64 {
        (self.draft_aft_peak + self.draft_fore_peak) / 2.0
    }

    /// List every field outside its allowed range.
    ///
    /// GM, Hs and Tz are only checked when control-file bounds are known.
    pub fn range_violations(&self, bounds: Option<&ParameterBounds>) -> Vec<RangeViolation> {
        let mut checks: Vec<(&'static str, f64, f64, f64)> = vec![
            ("draft_aft_peak", self.draft_aft_peak, 0.0, 30.0),
            ("draft_fore_peak", self.draft_fore_peak, 0.0, 30.0),
            ("heading", self.heading, 0.0, 360.0),
            ("speed", self.speed, 0.0, 30.0),
            ("max_roll_angle", self.max_roll_angle, 0.0, 30.0),
            ("wave_direction", self.wave_direction, 0.0, 360.0),
        ];
        if let Some(b) = bounds {
            checks.push(("gm", self.gm, b.gm_lower, b.gm_upper));
            checks.push(("hs", self.hs, b.hs_lower, b.hs_upper));
            checks.push(("tz", self.tz, b.tz_lower, b.tz_upper));
        }

        checks
            .into_iter()
            .filter(|(_, value, min, max)| !(*value >= *min && *value <= *max))
            .map(|(field, value, min, max)| RangeViolation {
                field,
                value,
                min,
                max,
            })
            .collect()
    }
}

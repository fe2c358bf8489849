//! JSON report of a session snapshot.

use display_frame::{
    format_angle, format_speed, vessel_display_angle, wave_direction_display, DirectionMode,
};
use polar_common::{FittedParameters, OperatingParameters, PolarResult, RangeViolation, VesselInfo};
use polar_locator::DatasetLocation;
use polar_session::{PolarSession, SavedCase, SessionState};
use roll_processor::{FieldMesh, FieldSample, InterpolationMethod};
use roll_style::{classify, contour_levels, Classification, DisplayMode, TrafficLight};
use serde::Serialize;

/// What to include beyond the always-present fields.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub display_mode: DisplayMode,
    pub direction_mode: DirectionMode,
    pub contour_count: usize,
    /// Resample the whole field onto this mesh.
    pub field_mesh: Option<FieldMesh>,
}

/// Roll at the current speed and heading.
#[derive(Debug, Clone, Serialize)]
pub struct RollReport {
    pub roll: f64,
    pub traffic_light: TrafficLight,
    pub classification: Classification,
    pub color: String,
}

/// Angles and labels for the chart overlay.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayReport {
    pub direction_mode: DirectionMode,
    pub vessel_angle: f64,
    pub wave_angle: f64,
    pub heading_label: String,
    pub wave_label: String,
    pub speed_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolarReport {
    pub state: SessionState,
    pub vessel: Option<VesselInfo>,
    pub defaulted_keys: Vec<String>,
    pub parameters: OperatingParameters,
    pub average_draft: f64,
    /// Control-file draft for the selected draft category.
    pub representative_draft: Option<f64>,
    pub range_violations: Vec<RangeViolation>,
    pub interpolation: InterpolationMethod,
    pub location: Option<DatasetLocation>,
    pub fitted: Option<FittedParameters>,
    pub current: Option<RollReport>,
    pub is_in_danger_zone: bool,
    pub display: DisplayReport,
    pub contour_levels: Vec<f64>,
    pub saved_cases: Vec<SavedCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Vec<FieldSample>>,
}

impl PolarReport {
    pub fn build(session: &PolarSession, options: &ReportOptions) -> PolarResult<Self> {
        let params = session.parameters();
        let max_roll = params.max_roll_angle;

        let current = session.current_roll().map(|roll| {
            let classification = classify(roll, max_roll, options.display_mode);
            RollReport {
                roll,
                traffic_light: TrafficLight::classify(roll, max_roll),
                color: classification.color().to_hex(),
                classification,
            }
        });

        let display = DisplayReport {
            direction_mode: options.direction_mode,
            vessel_angle: vessel_display_angle(params.heading, options.direction_mode),
            wave_angle: wave_direction_display(
                params.wave_direction,
                params.heading,
                options.direction_mode,
            ),
            heading_label: format_angle(params.heading),
            wave_label: format_angle(params.wave_direction),
            speed_label: format_speed(params.speed),
        };

        let field = match options.field_mesh {
            Some(mesh) => Some(session.field(mesh, options.display_mode, options.direction_mode)?),
            None => None,
        };

        Ok(Self {
            state: session.state(),
            vessel: session.control_file().map(|c| c.vessel_info.clone()),
            defaulted_keys: session
                .control_file()
                .map(|c| c.defaulted_keys.clone())
                .unwrap_or_default(),
            parameters: params.clone(),
            average_draft: params.average_draft(),
            representative_draft: session
                .control_file()
                .map(|c| c.representative_drafts.get(params.draft_category)),
            range_violations: session.range_violations(),
            interpolation: session.interpolation(),
            location: session.location().cloned(),
            fitted: session.dataset().map(|d| d.fitted()),
            current,
            is_in_danger_zone: session.is_in_danger_zone(),
            display,
            contour_levels: contour_levels(max_roll, options.contour_count),
            saved_cases: session.saved_cases().to_vec(),
            field,
        })
    }
}

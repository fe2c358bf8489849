//! Roll field classification and coloring.
//!
//! Two display modes are supported:
//! - **Continuous**: roll as a fraction of the allowed maximum, mapped onto a
//!   five-band blue-to-red scale.
//! - **Traffic light**: green below `max - 5`, yellow up to the limit, red
//!   beyond it.

pub mod classify;
pub mod color;

pub use classify::{
    classify, contour_levels, is_in_danger_zone, traffic_light, Classification, DisplayMode,
    TrafficLight, YELLOW_MARGIN,
};
pub use color::{continuous_color, interpolate_color, roll_ratio, Rgb, CONTINUOUS_STOPS};

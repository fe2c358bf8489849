//! Common test fixtures for roll polar tests.

/// Control file with every recognized key set.
pub const SAMPLE_CONTROL_FILE: &str = "\
# Roll polar control file
IMO = 9876543
VesselName = MV Example Carrier

GM_lower = 0.8
GM_upper = 4.5
Hs_lower = 2.0
Hs_upper = 14.0
Tz_lower = 4.5
Tz_upper = 16.0

Ts = 14.2
Td = 12.0
Ti = 10.5
";

/// Small dataset axes used across crates.
pub mod grid {
    /// Speeds of the small test grid (kn).
    pub const SPEEDS: [f64; 3] = [0.0, 10.0, 20.0];

    /// Headings of the small test grid (deg), full circle in 90° steps.
    pub const HEADINGS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

    /// Row-major roll values for [`SPEEDS`] × [`HEADINGS`].
    pub const ROLL: [f64; 12] = [
        2.0, 10.0, 4.0, 10.0, //
        3.0, 14.0, 5.0, 12.0, //
        4.0, 18.0, 6.0, 16.0,
    ];
}

/// File names used by the sea-state search examples.
pub mod names {
    pub const NEAR: &str = "MAXROLL_H10.0_T10.5.bpolar";
    pub const FAR: &str = "MAXROLL_H12.0_T9.0.bpolar";
}

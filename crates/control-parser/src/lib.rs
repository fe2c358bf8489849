//! Vessel control file parser.
//!
//! The control file is line-oriented text:
//!
//! ```text
//! # vessel
//! IMO = 9876543
//! VesselName = Example Carrier
//! GM_lower = 0.8
//! GM_upper = 4.5
//! Ts = 14.2
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. For each recognized
//! key the first line starting with that key is used; its value is everything
//! after the first `=`, trimmed. Keys that are missing or do not carry a usable
//! value take the entry from [`DEFAULTS`] and are listed in
//! [`ControlFile::defaulted_keys`]. Parsing itself never fails; only a byte
//! buffer that is not UTF-8 text is rejected.

use polar_common::{
    parse_leading_float, ControlFile, ParameterBounds, PolarError, PolarResult,
    RepresentativeDrafts, VesselInfo,
};
use tracing::{debug, warn};

/// Conventional control file name at the dataset root.
pub const DEFAULT_CONTROL_FILE_NAME: &str = "proll.ctl";

/// Default value of a recognized key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyDefault {
    Text(&'static str),
    Number(f64),
}

/// Recognized keys and the value each takes when absent or unusable.
pub const DEFAULTS: &[(&str, KeyDefault)] = &[
    ("IMO", KeyDefault::Text("Unknown")),
    ("VesselName", KeyDefault::Text("Unknown")),
    ("GM_lower", KeyDefault::Number(0.5)),
    ("GM_upper", KeyDefault::Number(5.0)),
    ("Hs_lower", KeyDefault::Number(3.0)),
    ("Hs_upper", KeyDefault::Number(12.0)),
    ("Tz_lower", KeyDefault::Number(5.0)),
    ("Tz_upper", KeyDefault::Number(18.0)),
    ("Ts", KeyDefault::Number(0.0)),
    ("Td", KeyDefault::Number(0.0)),
    ("Ti", KeyDefault::Number(0.0)),
];

/// Decode a control file buffer and parse it.
pub fn parse_control_bytes(bytes: &[u8]) -> PolarResult<ControlFile> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| PolarError::ConfigRead(format!("control file is not UTF-8 text: {}", e)))?;
    Ok(parse_control_text(text))
}

/// Parse control file text.
pub fn parse_control_text(text: &str) -> ControlFile {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();

    let mut reader = KeyReader {
        lines: &lines,
        defaulted: Vec::new(),
    };

    let vessel_info = VesselInfo {
        imo: reader.text("IMO"),
        name: reader.text("VesselName"),
    };

    let parameter_bounds = ParameterBounds {
        gm_lower: reader.number("GM_lower"),
        gm_upper: reader.number("GM_upper"),
        hs_lower: reader.number("Hs_lower"),
        hs_upper: reader.number("Hs_upper"),
        tz_lower: reader.number("Tz_lower"),
        tz_upper: reader.number("Tz_upper"),
    };

    let representative_drafts = RepresentativeDrafts {
        scantling: reader.number("Ts"),
        design: reader.number("Td"),
        intermediate: reader.number("Ti"),
    };

    debug!(
        imo = %vessel_info.imo,
        lines = lines.len(),
        defaulted = reader.defaulted.len(),
        "Parsed control file"
    );

    ControlFile {
        vessel_info,
        parameter_bounds,
        representative_drafts,
        defaulted_keys: reader.defaulted,
    }
}

/// Raw value of `key`: the remainder after the first `=` on the first line
/// starting with `key`.
fn extract_value<'a>(lines: &[&'a str], key: &str) -> Option<&'a str> {
    let line = lines.iter().find(|l| l.starts_with(key))?;
    let (_, value) = line.split_once('=')?;
    Some(value.trim())
}

fn default_for(key: &str) -> KeyDefault {
    DEFAULTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, d)| *d)
        .unwrap_or(KeyDefault::Text(""))
}

struct KeyReader<'a> {
    lines: &'a [&'a str],
    defaulted: Vec<String>,
}

impl KeyReader<'_> {
    fn text(&mut self, key: &str) -> String {
        match extract_value(self.lines, key) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => {
                self.mark_defaulted(key, None);
                match default_for(key) {
                    KeyDefault::Text(t) => t.to_string(),
                    KeyDefault::Number(n) => n.to_string(),
                }
            }
        }
    }

    fn number(&mut self, key: &str) -> f64 {
        let raw = extract_value(self.lines, key);
        match raw.and_then(parse_leading_float) {
            Some(v) if v.is_finite() => v,
            _ => {
                self.mark_defaulted(key, raw);
                match default_for(key) {
                    KeyDefault::Number(n) => n,
                    KeyDefault::Text(_) => 0.0,
                }
            }
        }
    }

    fn mark_defaulted(&mut self, key: &str, raw: Option<&str>) {
        match raw {
            Some(raw) if !raw.is_empty() => {
                warn!(key = %key, value = %raw, "Unparseable control file value, using default")
            }
            _ => debug!(key = %key, "Control file key missing, using default"),
        }
        self.defaulted.push(key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_value_first_match_and_first_equals() {
        let lines = vec!["VesselName = A=B", "VesselName = Second"];
        assert_eq!(extract_value(&lines, "VesselName"), Some("A=B"));
        assert_eq!(extract_value(&lines, "IMO"), None);
    }

    #[test]
    fn test_line_without_equals() {
        let lines = vec!["IMO 1234"];
        assert_eq!(extract_value(&lines, "IMO"), None);
    }

    #[test]
    fn test_defaults_table_covers_every_key() {
        let parsed = parse_control_text("");
        assert_eq!(parsed.defaulted_keys.len(), DEFAULTS.len());
        for (key, _) in DEFAULTS {
            assert!(parsed.defaulted_keys.iter().any(|k| k == key), "{}", key);
        }
    }

    #[test]
    fn test_zero_is_kept() {
        let parsed = parse_control_text("GM_lower = 0\n");
        assert_eq!(parsed.parameter_bounds.gm_lower, 0.0);
        assert!(!parsed.defaulted_keys.contains(&"GM_lower".to_string()));
    }
}

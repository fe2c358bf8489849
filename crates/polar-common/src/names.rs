//! Numeric extraction from dataset folder and file names.
//!
//! The dataset tree encodes continuous parameters in names, e.g.
//! `GM=1.5m` for a GM folder and `MAXROLL_H10.0_T10.5.bpolar` for a file.
//! Every extractor here is pure and returns `None` when the name does not
//! carry a usable number.

/// Parse the longest numeric prefix of `s`, after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction and an optional
/// exponent: `"2.5 m"` gives `2.5`, `"7."` gives `7.0`, `"m2"` gives `None`.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Length in bytes of the run of ASCII digits and `.` starting at `s`.
fn numeric_run_len(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.')
        .count()
}

/// Extract the decimal number embedded in a folder name.
///
/// The first run of digits and `.` anywhere in the name is parsed; if that
/// run is not a number (e.g. a lone `.`), the name has no value.
///
/// ```
/// use polar_common::parse_embedded_number;
/// assert_eq!(parse_embedded_number("GM=1.5m"), Some(1.5));
/// assert_eq!(parse_embedded_number("bin"), None);
/// ```
pub fn parse_embedded_number(name: &str) -> Option<f64> {
    let start = name.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let rest = &name[start..];
    let run = &rest[..numeric_run_len(rest)];
    parse_leading_float(run)
}

/// Find the `_H<float>_` group in a file name.
fn match_hs(name: &str) -> Option<&str> {
    name.match_indices("_H").find_map(|(pos, _)| {
        let rest = &name[pos + 2..];
        let len = numeric_run_len(rest);
        (len > 0 && rest[len..].starts_with('_')).then(|| &rest[..len])
    })
}

/// Find the `_T<float>.` group in a file name.
///
/// The run is greedy, so the captured value ends at the last `.` of the
/// digit/dot run, i.e. the dot that starts the extension.
fn match_tz(name: &str) -> Option<&str> {
    name.match_indices("_T").find_map(|(pos, _)| {
        let rest = &name[pos + 2..];
        let run = &rest[..numeric_run_len(rest)];
        match run.rfind('.') {
            Some(dot) if dot > 0 => Some(&run[..dot]),
            _ => None,
        }
    })
}

/// Extract `(hs, tz)` from a dataset file name such as
/// `MAXROLL_H10.0_T10.5.bpolar`.
///
/// Both groups must be present and numeric.
pub fn parse_file_hs_tz(name: &str) -> Option<(f64, f64)> {
    let hs = parse_leading_float(match_hs(name)?)?;
    let tz = parse_leading_float(match_tz(name)?)?;
    Some((hs, tz))
}

/// Extract the fitted `(hs, tz)` pair from the adjacent `_H<float>_T<float>`
/// group of a file name.
///
/// Each value is `None` when its run is present but not numeric; the outer
/// `None` means the name has no such group.
pub fn parse_fitted_hs_tz(name: &str) -> Option<(Option<f64>, Option<f64>)> {
    name.match_indices("_H").find_map(|(pos, _)| {
        let rest = &name[pos + 2..];
        let hs_len = numeric_run_len(rest);
        if hs_len == 0 {
            return None;
        }
        let after = rest[hs_len..].strip_prefix("_T")?;
        let tz_len = numeric_run_len(after);
        if tz_len == 0 {
            return None;
        }
        Some((
            parse_leading_float(&rest[..hs_len]),
            parse_leading_float(&after[..tz_len]),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("2.5"), Some(2.5));
        assert_eq!(parse_leading_float("  2.5 m"), Some(2.5));
        assert_eq!(parse_leading_float("-3"), Some(-3.0));
        assert_eq!(parse_leading_float("7."), Some(7.0));
        assert_eq!(parse_leading_float(".25"), Some(0.25));
        assert_eq!(parse_leading_float("1.2.3"), Some(1.2));
        assert_eq!(parse_leading_float("1e3x"), Some(1000.0));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("abc"), None);
        assert_eq!(parse_leading_float(""), None);
    }

    #[test]
    fn test_embedded_number() {
        assert_eq!(parse_embedded_number("GM=1.0m"), Some(1.0));
        assert_eq!(parse_embedded_number("GM=2.5m"), Some(2.5));
        assert_eq!(parse_embedded_number("gm_3"), Some(3.0));
        assert_eq!(parse_embedded_number("GM1.20.old"), Some(1.2));
        assert_eq!(parse_embedded_number("notes"), None);
        // first run is a bare dot: no value, later digits are not considered
        assert_eq!(parse_embedded_number("v.x2"), None);
    }

    #[test]
    fn test_file_hs_tz() {
        assert_eq!(
            parse_file_hs_tz("MAXROLL_H10.0_T10.5.bpolar"),
            Some((10.0, 10.5))
        );
        assert_eq!(parse_file_hs_tz("MAXROLL_H12.0_T9.0.bpolar"), Some((12.0, 9.0)));
        assert_eq!(parse_file_hs_tz("X_H4_T8.bin"), Some((4.0, 8.0)));
        assert_eq!(parse_file_hs_tz("MAXROLL_H10.0.bpolar"), None);
        assert_eq!(parse_file_hs_tz("MAXROLL_T10.0.bpolar"), None);
        assert_eq!(parse_file_hs_tz("readme.txt"), None);
        // no extension after the period group
        assert_eq!(parse_file_hs_tz("MAXROLL_H10_T10"), None);
    }

    #[test]
    fn test_fitted_hs_tz() {
        assert_eq!(
            parse_fitted_hs_tz("MAXROLL_H10.0_T10.5.bpolar"),
            Some((Some(10.0), Some(10.5)))
        );
        assert_eq!(parse_fitted_hs_tz("MAXROLL_H10_T10"), Some((Some(10.0), Some(10.0))));
        assert_eq!(parse_fitted_hs_tz("MAXROLL_H.._T5.bin"), Some((None, Some(5.0))));
        assert_eq!(parse_fitted_hs_tz("MAXROLL_H10_X_T10.bin"), None);
        assert_eq!(parse_fitted_hs_tz("polar.bin"), None);
    }
}

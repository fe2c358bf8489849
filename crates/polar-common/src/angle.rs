//! Angle helpers. All angles are in degrees.

/// Wrap an angle into `[0, 360)`.
///
/// Non-finite input yields NaN.
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
pub fn angle_difference(from: f64, to: f64) -> f64 {
    let diff = normalize_angle(to - from);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(725.0), 5.0);
    }

    #[test]
    fn test_normalize_range_and_periodicity() {
        for i in -720..720 {
            let x = i as f64 * 0.75 + 0.125;
            let n = normalize_angle(x);
            assert!((0.0..360.0).contains(&n), "normalize({}) = {}", x, n);
            for k in [-3.0, -1.0, 1.0, 2.0] {
                let shifted = normalize_angle(x + 360.0 * k);
                assert!((shifted - n).abs() < 1e-9, "x={} k={}", x, k);
            }
        }
    }

    #[test]
    fn test_normalize_tiny_negative() {
        let n = normalize_angle(-1e-20);
        assert!((0.0..360.0).contains(&n));
    }

    #[test]
    fn test_angle_difference() {
        assert_eq!(angle_difference(350.0, 10.0), 20.0);
        assert_eq!(angle_difference(10.0, 350.0), -20.0);
        assert_eq!(angle_difference(0.0, 180.0), 180.0);
    }
}

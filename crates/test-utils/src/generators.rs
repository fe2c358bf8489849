//! Generators for synthetic polar datasets.
//!
//! The roll values follow simple patterns so tests can check grid lookups by
//! arithmetic instead of stored tables.

use bytes::BufMut;

/// Encodes a dataset in the binary polar layout.
///
/// Little-endian: `i32 num_speeds, i32 num_headings, i32 num_parameters`,
/// then the speeds, the headings and the row-major roll values as `f64`.
///
/// # Example
///
/// ```
/// use test_utils::encode_polar_dataset;
///
/// let bytes = encode_polar_dataset(&[0.0, 10.0], &[0.0, 180.0], &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(bytes.len(), 12 + 8 * (2 + 2 + 4));
/// ```
pub fn encode_polar_dataset(speeds: &[f64], headings: &[f64], roll: &[f64]) -> Vec<u8> {
    encode_polar_raw(
        speeds.len() as i32,
        headings.len() as i32,
        1,
        speeds.iter().chain(headings).chain(roll).copied(),
    )
}

/// Encodes an arbitrary header followed by `values`.
///
/// Used to build inconsistent or truncated files.
pub fn encode_polar_raw(
    num_speeds: i32,
    num_headings: i32,
    num_parameters: i32,
    values: impl IntoIterator<Item = f64>,
) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.put_i32_le(num_speeds);
    buf.put_i32_le(num_headings);
    buf.put_i32_le(num_parameters);
    for v in values {
        buf.put_f64_le(v);
    }
    buf
}

/// Evenly spaced headings covering the full circle, starting at 0.
pub fn full_circle_headings(count: usize) -> Vec<f64> {
    let step = 360.0 / count as f64;
    (0..count).map(|i| i as f64 * step).collect()
}

/// Roll grid where each value is `speed_idx * 100 + heading_idx`.
///
/// # Example
///
/// ```
/// use test_utils::indexed_roll_grid;
///
/// let roll = indexed_roll_grid(3, 4);
/// assert_eq!(roll[4 + 2], 102.0); // speed 1, heading 2
/// ```
pub fn indexed_roll_grid(num_speeds: usize, num_headings: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(num_speeds * num_headings);
    for s in 0..num_speeds {
        for h in 0..num_headings {
            data.push((s * 100 + h) as f64);
        }
    }
    data
}

/// Roll grid shaped like a beam-sea response.
///
/// Roll peaks at beam seas (90° and 270°) and grows with speed; values stay
/// in roughly `0..=30` degrees.
pub fn beam_sea_roll_grid(speeds: &[f64], headings: &[f64]) -> Vec<f64> {
    let max_speed = speeds.iter().copied().fold(0.0_f64, f64::max).max(1.0);
    let mut data = Vec::with_capacity(speeds.len() * headings.len());
    for &speed in speeds {
        for &heading in headings {
            let beam = heading.to_radians().sin().abs();
            data.push(5.0 + 20.0 * beam + 5.0 * speed / max_speed);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let bytes = encode_polar_dataset(&[5.0], &[90.0], &[12.5]);
        assert_eq!(&bytes[0..4], &1i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1i32.to_le_bytes());
        assert_eq!(&bytes[8..12], &1i32.to_le_bytes());
        assert_eq!(&bytes[12..20], &5.0f64.to_le_bytes());
        assert_eq!(&bytes[20..28], &90.0f64.to_le_bytes());
        assert_eq!(&bytes[28..36], &12.5f64.to_le_bytes());
    }

    #[test]
    fn test_full_circle_headings() {
        assert_eq!(full_circle_headings(4), vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn test_beam_sea_peaks_abeam() {
        let speeds = [0.0, 10.0];
        let headings = full_circle_headings(4);
        let roll = beam_sea_roll_grid(&speeds, &headings);
        assert!(roll[1] > roll[0]);
        assert!(roll[4 + 1] > roll[1]);
    }
}

//! Binary roll polar decoder.
//!
//! File layout, all little-endian:
//!
//! ```text
//! i32 num_speeds
//! i32 num_headings
//! i32 num_parameters
//! f64 speeds[num_speeds]
//! f64 headings[num_headings]
//! f64 roll[num_speeds * num_headings]   row-major, outer index = speed
//! ```
//!
//! Every section is length-checked against the header before it is read, so a
//! short or inconsistent file fails with [`DecodeError`] instead of reading
//! past the end.

pub mod error;

pub use error::{DecodeError, DecodeResult};

use bytes::Buf;
use polar_common::{parse_fitted_hs_tz, FittedParameters, PolarDataset, PolarResult};
use tracing::{debug, warn};

/// Size of the three-integer header.
pub const HEADER_LEN: usize = 12;

const F64_LEN: usize = std::mem::size_of::<f64>();

/// Decoded header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolarHeader {
    pub num_speeds: usize,
    pub num_headings: usize,
    pub num_parameters: i32,
}

impl PolarHeader {
    /// Number of roll values in the grid.
    pub fn grid_len(&self) -> usize {
        self.num_speeds * self.num_headings
    }

    /// Total file size implied by the header.
    pub fn expected_len(&self) -> usize {
        HEADER_LEN + (self.num_speeds + self.num_headings + self.grid_len()) * F64_LEN
    }
}

/// Grid arrays as stored in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGrid {
    pub header: PolarHeader,
    pub speeds: Vec<f64>,
    pub headings: Vec<f64>,
    pub roll: Vec<f64>,
}

fn ensure(buf: &[u8], section: &'static str, needed: usize) -> DecodeResult<()> {
    if buf.remaining() < needed {
        return Err(DecodeError::Truncated {
            section,
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}

fn count(field: &'static str, value: i32) -> DecodeResult<usize> {
    if value <= 0 {
        return Err(DecodeError::InvalidCount { field, value });
    }
    Ok(value as usize)
}

/// Parse and validate the header.
pub fn decode_header(data: &[u8]) -> DecodeResult<PolarHeader> {
    let mut buf = data;
    ensure(buf, "header", HEADER_LEN)?;

    let raw_speeds = buf.get_i32_le();
    let raw_headings = buf.get_i32_le();
    let num_parameters = buf.get_i32_le();

    let num_speeds = count("num_speeds", raw_speeds)?;
    let num_headings = count("num_headings", raw_headings)?;

    // The byte size of the grid must fit in usize.
    num_speeds
        .checked_mul(num_headings)
        .and_then(|n| n.checked_add(num_speeds + num_headings))
        .and_then(|n| n.checked_mul(F64_LEN))
        .ok_or(DecodeError::TooLarge {
            num_speeds: raw_speeds,
            num_headings: raw_headings,
        })?;

    Ok(PolarHeader {
        num_speeds,
        num_headings,
        num_parameters,
    })
}

fn read_f64s(buf: &mut &[u8], section: &'static str, n: usize) -> DecodeResult<Vec<f64>> {
    ensure(*buf, section, n * F64_LEN)?;
    Ok((0..n).map(|_| buf.get_f64_le()).collect())
}

fn ensure_finite(axis: &'static str, values: &[f64]) -> DecodeResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DecodeError::NonFiniteAxis {
            axis,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Decode the header and arrays of a polar file.
///
/// Axis values must be finite; roll values are taken as stored.
pub fn decode_grid(data: &[u8]) -> DecodeResult<RawGrid> {
    let header = decode_header(data)?;
    let mut buf = &data[HEADER_LEN..];

    let speeds = read_f64s(&mut buf, "speeds", header.num_speeds)?;
    ensure_finite("speed", &speeds)?;
    let headings = read_f64s(&mut buf, "headings", header.num_headings)?;
    ensure_finite("heading", &headings)?;
    let roll = read_f64s(&mut buf, "roll matrix", header.grid_len())?;

    if buf.has_remaining() {
        debug!(
            trailing = buf.remaining(),
            expected = header.expected_len(),
            "Ignoring trailing bytes after roll matrix"
        );
    }
    if speeds.windows(2).any(|w| !(w[0] < w[1])) {
        warn!(speeds = ?speeds, "Speed axis is not strictly increasing");
    }

    Ok(RawGrid {
        header,
        speeds,
        headings,
        roll,
    })
}

/// Decode a polar file into a [`PolarDataset`].
///
/// The fitted Hs and Tz come from the `_H<float>_T<float>` group of
/// `file_name`; each falls back to the matching field of `requested` when the
/// name does not carry it. The fitted GM is always taken from `requested`,
/// which callers fill with the GM of the chosen folder.
pub fn decode_polar(
    data: &[u8],
    file_name: &str,
    requested: FittedParameters,
) -> PolarResult<PolarDataset> {
    let grid = decode_grid(data)?;

    let (hs, tz) = match parse_fitted_hs_tz(file_name) {
        Some((hs, tz)) => (hs.unwrap_or(requested.hs), tz.unwrap_or(requested.tz)),
        None => (requested.hs, requested.tz),
    };
    let fitted = FittedParameters {
        gm: requested.gm,
        hs,
        tz,
    };

    debug!(
        file = %file_name,
        speeds = grid.header.num_speeds,
        headings = grid.header.num_headings,
        parameters = grid.header.num_parameters,
        fitted_hs = hs,
        fitted_tz = tz,
        "Decoded polar dataset"
    );

    PolarDataset::new(
        grid.speeds,
        grid.headings,
        grid.roll,
        grid.header.num_parameters,
        fitted,
    )
}

//! Decoding tests against synthetic polar files.

use bpolar_parser::{decode_grid, decode_polar, DecodeError, HEADER_LEN};
use polar_common::FittedParameters;
use test_utils::{encode_polar_dataset, encode_polar_raw, grid, indexed_roll_grid, names};

fn requested() -> FittedParameters {
    FittedParameters {
        gm: 2.5,
        hs: 9.0,
        tz: 11.0,
    }
}

#[test]
fn test_decode_reproduces_arrays() {
    let bytes = encode_polar_dataset(&grid::SPEEDS, &grid::HEADINGS, &grid::ROLL);
    let dataset = decode_polar(&bytes, names::NEAR, requested()).unwrap();

    assert_eq!(dataset.speeds(), &grid::SPEEDS);
    assert_eq!(dataset.headings(), &grid::HEADINGS);
    assert_eq!(dataset.roll_matrix(), &grid::ROLL);
    assert_eq!(dataset.num_parameters(), 1);
    assert_eq!(dataset.roll(1, 3), 12.0);
}

#[test]
fn test_fitted_values_from_file_name() {
    let bytes = encode_polar_dataset(&[0.0], &[0.0], &[1.0]);

    let dataset = decode_polar(&bytes, names::NEAR, requested()).unwrap();
    let fitted = dataset.fitted();
    assert_eq!(fitted.gm, 2.5);
    assert_eq!(fitted.hs, 10.0);
    assert_eq!(fitted.tz, 10.5);

    let dataset = decode_polar(&bytes, "polar.bin", requested()).unwrap();
    assert_eq!(dataset.fitted(), requested());
}

#[test]
fn test_truncated_at_each_section() {
    let speeds = [0.0, 10.0];
    let headings = [0.0, 120.0, 240.0];
    let full = encode_polar_dataset(&speeds, &headings, &indexed_roll_grid(2, 3));

    let cases = [
        (HEADER_LEN - 1, "header"),
        (HEADER_LEN + 8, "speeds"),
        (HEADER_LEN + 2 * 8 + 3 * 8 - 1, "headings"),
        (full.len() - 1, "roll matrix"),
    ];
    for (len, section) in cases {
        match decode_grid(&full[..len]) {
            Err(DecodeError::Truncated { section: s, .. }) => assert_eq!(s, section),
            other => panic!("expected truncation in {}, got {:?}", section, other),
        }
        let err = decode_polar(&full[..len], "x", requested()).unwrap_err();
        assert_eq!(err.kind(), "MalformedDataFile");
    }
}

#[test]
fn test_header_claims_more_than_present() {
    let bytes = encode_polar_raw(1000, 1000, 1, [1.0, 2.0, 3.0]);
    let err = decode_grid(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::Truncated { section: "speeds", .. }));
}

#[test]
fn test_negative_count_rejected() {
    let bytes = encode_polar_raw(-1, 3, 1, std::iter::empty());
    let err = decode_polar(&bytes, "x", requested()).unwrap_err();
    assert_eq!(err.kind(), "MalformedDataFile");
}

#[test]
fn test_trailing_bytes_tolerated() {
    let mut bytes = encode_polar_dataset(&[0.0], &[0.0, 180.0], &[1.0, 2.0]);
    bytes.extend_from_slice(&[0xAB; 5]);
    let grid = decode_grid(&bytes).unwrap();
    assert_eq!(grid.roll, vec![1.0, 2.0]);
}

#[test]
fn test_non_increasing_speeds_still_decode() {
    let bytes = encode_polar_dataset(&[10.0, 5.0], &[0.0], &[1.0, 2.0]);
    let grid = decode_grid(&bytes).unwrap();
    assert_eq!(grid.speeds, vec![10.0, 5.0]);
}

#[test]
fn test_nan_speed_rejected() {
    let bytes = encode_polar_dataset(&[f64::NAN], &[0.0, 180.0], &[1.0, 2.0]);
    let err = decode_grid(&bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::NonFiniteAxis { axis: "speed", index: 0, .. }
    ));

    let err = decode_polar(&bytes, names::NEAR, requested()).unwrap_err();
    assert_eq!(err.kind(), "MalformedDataFile");
}

#[test]
fn test_infinite_heading_rejected() {
    let bytes = encode_polar_dataset(&[0.0, 10.0], &[0.0, f64::INFINITY], &[1.0; 4]);
    let err = decode_grid(&bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::NonFiniteAxis { axis: "heading", index: 1, .. }
    ));
}

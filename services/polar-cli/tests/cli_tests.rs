//! Runs the polar-cli binary against temporary dataset trees.

use std::path::Path;
use std::process::{Command, Output};

use test_utils::{encode_polar_dataset, grid, names, DatasetTree, DatasetTreeBuilder, SAMPLE_CONTROL_FILE};

fn dataset_tree() -> DatasetTree {
    let near = encode_polar_dataset(&grid::SPEEDS, &grid::HEADINGS, &grid::ROLL);
    let far: Vec<f64> = grid::ROLL.iter().map(|r| r * 3.0).collect();
    DatasetTreeBuilder::new()
        .control_file("proll.ctl", SAMPLE_CONTROL_FILE)
        .dataset("design", "GM=1.0m", names::NEAR, near.clone())
        .dataset("design", "GM=2.5m", names::NEAR, near)
        .dataset(
            "design",
            "GM=2.5m",
            names::FAR,
            encode_polar_dataset(&grid::SPEEDS, &grid::HEADINGS, &far),
        )
        .file(
            "polar.yaml",
            b"interpolation: bracketed\nangular_segments: 12\nradial_segments: 3\n".to_vec(),
        )
        .build()
        .unwrap()
}

fn run(root: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polar-cli"))
        .env_remove("POLAR_DATA_ROOT")
        .env_remove("POLAR_CONTROL_FILE")
        .env_remove("POLAR_INTERPOLATION")
        .env_remove("RUST_LOG")
        .arg("--data-root")
        .arg(root)
        .args(["--log-level", "warn"])
        .args(extra)
        .output()
        .unwrap()
}

fn report(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_selects_nearest_dataset() {
    let tree = dataset_tree();
    let output = run(
        tree.root(),
        &[
            "--gm", "2", "--hs", "10", "--tz", "10", "--speed", "10", "--heading", "90",
            "--max-roll", "12", "--interpolation", "bracketed", "--save-case", "C1",
        ],
    );
    let json = report(&output);

    assert_eq!(json["state"], "dataset_ready");
    assert_eq!(json["location"]["gm_folder"], "GM=2.5m");
    assert_eq!(json["location"]["file_name"], names::NEAR);
    assert_eq!(json["fitted"]["gm"], 2.5);
    assert_eq!(json["representative_draft"], 12.0);
    assert_eq!(json["current"]["roll"], 14.0);
    assert_eq!(json["current"]["traffic_light"], "red");
    assert_eq!(json["is_in_danger_zone"], true);
    assert_eq!(json["saved_cases"][0]["id"], "C1");
    assert!(json.get("field").is_none());
}

#[test]
fn test_cli_field_from_yaml_config() {
    let tree = dataset_tree();
    let config = tree.root().join("polar.yaml");
    let output = run(
        tree.root(),
        &["--config", config.to_str().unwrap(), "--field", "--hs", "10", "--tz", "10"],
    );
    let json = report(&output);

    assert_eq!(json["interpolation"], "bracketed");
    assert_eq!(json["field"].as_array().unwrap().len(), 36);
}

#[test]
fn test_cli_reports_range_violations() {
    let tree = dataset_tree();
    let output = run(tree.root(), &["--gm", "4.8", "--hs", "10", "--tz", "10"]);
    let json = report(&output);

    let fields: Vec<&str> = json["range_violations"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["gm"]);
}

#[test]
fn test_cli_fails_without_draft_folder() {
    let tree = dataset_tree();
    let output = run(tree.root(), &["--draft", "scantling"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

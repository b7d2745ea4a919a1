use assert_cmd::Command;
use predicates::prelude::*;

use roibridge::io_json::{read_source_json, read_toolkit_json};
use roibridge::source::SourceKind;
use roibridge::toolkit::ToolkitRegion;
use roibridge::PlaneIndex;

fn roibridge() -> Command {
    let mut cmd = Command::cargo_bin("roibridge").unwrap();
    cmd.env_remove("ROIBRIDGE_ORIGIN_X")
        .env_remove("ROIBRIDGE_ORIGIN_Y")
        .env_remove("ROIBRIDGE_DOWNSAMPLE");
    cmd
}

#[test]
fn runs() {
    roibridge().assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = roibridge();
    cmd.arg("-V");
    cmd.assert().success().stdout("roibridge 0.1.0\n");
}

// Validate subcommand tests

#[test]
fn validate_valid_source_succeeds() {
    let mut cmd = roibridge();
    cmd.args(["validate", "tests/fixtures/source_valid.json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Validation passed"));
}

#[test]
fn validate_invalid_source_fails() {
    let mut cmd = roibridge();
    cmd.args(["validate", "tests/fixtures/source_invalid.json"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("NegativeSize"))
        .stdout(predicate::str::contains("TooFewPolygonPoints"));
}

#[test]
fn validate_toolkit_reports_unsupported_kind() {
    let mut cmd = roibridge();
    cmd.args([
        "validate",
        "tests/fixtures/toolkit_angle.json",
        "--format",
        "toolkit",
    ]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("UnsupportedToolkitKind"));
}

#[test]
fn validate_toolkit_reports_negative_box() {
    let mut cmd = roibridge();
    cmd.args([
        "validate",
        "tests/fixtures/toolkit_negative.json",
        "--format",
        "toolkit",
    ]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("NegativeSize at region 0 (rectangle)"));
}

#[test]
fn to_source_rejects_negative_box() {
    let mut cmd = roibridge();
    cmd.args(["to-source", "tests/fixtures/toolkit_negative.json"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Malformed rectangle geometry"));
}

#[test]
fn validate_json_output_format() {
    let mut cmd = roibridge();
    cmd.args([
        "validate",
        "tests/fixtures/toolkit_valid.json",
        "--format",
        "toolkit",
        "--output",
        "json",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"error_count\": 0"))
        .stdout(predicate::str::contains("\"warning_count\": 0"));
}

#[test]
fn validate_unknown_format_fails() {
    let mut cmd = roibridge();
    cmd.args(["validate", "tests/fixtures/source_valid.json", "--format", "xml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

#[test]
fn validate_nonexistent_file_fails() {
    let mut cmd = roibridge();
    cmd.args(["validate", "nonexistent_file.json"]);
    cmd.assert().failure();
}

// Conversion subcommand tests

#[test]
fn to_toolkit_prints_converted_document() {
    let mut cmd = roibridge();
    cmd.args([
        "to-toolkit",
        "tests/fixtures/source_valid.json",
        "--downsample",
        "2",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"rectangle\""))
        .stdout(predicate::str::contains("\"type\": \"shape\""))
        .stdout(predicate::str::contains("\"width\": 50.0"));
}

#[test]
fn to_toolkit_reads_context_from_env_and_filters_planes() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let out = dir.path().join("toolkit.json");

    let mut cmd = roibridge();
    cmd.env("ROIBRIDGE_DOWNSAMPLE", "2")
        .env("ROIBRIDGE_ORIGIN_X", "5")
        .args(["to-toolkit", "tests/fixtures/source_valid.json", "--z", "2", "-o"])
        .arg(&out);
    cmd.assert().success();

    let doc = read_toolkit_json(&out).expect("read converted document");
    assert_eq!(doc.plane, PlaneIndex::all_channels_at(2, 0));
    assert_eq!(doc.regions.len(), 1);
    let ToolkitRegion::Polygon(roi) = &doc.regions[0] else {
        panic!("expected polygon, got {:?}", doc.regions[0]);
    };
    assert_eq!((roi.points[1].x, roi.points[1].y), (25.0, 0.0));
}

#[test]
fn to_source_uses_document_plane_with_overrides() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let out = dir.path().join("source.json");

    let mut cmd = roibridge();
    cmd.args([
        "to-source",
        "tests/fixtures/toolkit_valid.json",
        "--downsample",
        "2",
        "--channel",
        "1",
        "--output",
    ])
    .arg(&out);
    cmd.assert().success();

    let doc = read_source_json(&out).expect("read converted document");
    let kinds: Vec<SourceKind> = doc.regions.iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![SourceKind::Rectangle, SourceKind::Polyline, SourceKind::PointSet]
    );
    assert!(doc.regions.iter().all(|r| r.plane() == PlaneIndex::new(1, 3, 1)));
    assert_eq!(
        doc.regions[0].bounds().map(|b| b.to_xywh()),
        Some((10.0, 20.0, 100.0, 50.0))
    );
}

#[test]
fn to_source_rejects_unsupported_kind() {
    let mut cmd = roibridge();
    cmd.args(["to-source", "tests/fixtures/toolkit_angle.json"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported toolkit shape kind 'angle'"));
}

#[test]
fn zero_downsample_is_rejected() {
    let mut cmd = roibridge();
    cmd.args([
        "to-toolkit",
        "tests/fixtures/source_valid.json",
        "--downsample",
        "0",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinate context"));
}

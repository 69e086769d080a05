#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const ROWS: &str = r#"[
  {
    "article_author_year": "Begon et al. 2015",
    "joint": "sternoclavicular",
    "parent": "thorax",
    "child": "clavicle",
    "euler_sequence": "yxz",
    "segments": {
      "thorax": {
        "x": "y^z",
        "y": "vec(MID_T8_PX>MID_C7_IJ)",
        "z": "vec(IJ>C7)^vec(IJ>MID_T8_PX)",
        "origin": "IJ"
      },
      "clavicle": {
        "x": "vec(MID_T8_PX>MID_C7_IJ)^vec(SC>AC)",
        "y": "z^x",
        "z": "vec(SC>AC)",
        "origin": "SC"
      }
    },
    "deviation": { "parent_d1": 0.9, "parent_d3": 0.5, "child_d1": 0.9, "child_d3": 0.5 }
  },
  {
    "article_author_year": "Nobody",
    "joint": "elbow",
    "parent": "humerus",
    "child": "ulna"
  }
]"#;

fn bin() -> Command {
    Command::cargo_bin("shoulder-isb").unwrap()
}

#[test]
fn validate_prints_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let rows = dir.path().join("rows.json");
    fs::write(&rows, ROWS).unwrap();

    let out = bin()
        .args(["--log-level", "off", "validate"])
        .arg(&rows)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["summary"]["rows"], 2);
    assert_eq!(report["summary"]["valid"], 1);
    assert_eq!(report["summary"]["errors"], 1);
    assert_eq!(report["rows"][0]["conversion"]["strategy"], "sign_factors");
    let deviation = report["rows"][0]["total_deviation"].as_f64().unwrap();
    approx::assert_relative_eq!(deviation, 0.2025, epsilon = 1e-12);
}

#[test]
fn validate_writes_to_the_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let rows = dir.path().join("rows.json");
    let output = dir.path().join("report.json");
    fs::write(&rows, ROWS).unwrap();

    bin()
        .args(["--log-level", "off", "validate"])
        .arg(&rows)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("Begon et al. 2015"));
}

#[test]
fn missing_rows_file_fails() {
    bin()
        .args(["--log-level", "off", "validate", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn convert_isb_sequence_is_identity() {
    bin()
        .args([
            "--log-level",
            "off",
            "convert",
            "--joint",
            "sc",
            "--sequence",
            "yxz",
            "--angles=-10,20,30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sign_factors\""))
        .stdout(predicate::str::contains("-10.0"));
}

#[test]
fn convert_other_sequence_changes_sequence() {
    bin()
        .args([
            "--log-level", "off", "convert", "--joint", "glenohumeral", "--sequence", "xzy",
            "--angles", "10,20,30,5,5,5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sequence_change\""))
        .stdout(predicate::str::contains("\"to\": \"yxy\""));
}

#[test]
fn convert_rejects_incomplete_triples() {
    bin()
        .args([
            "--log-level", "off", "convert", "--joint", "sc", "--sequence", "yxz", "--angles",
            "10,20",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("angle triples"));
}

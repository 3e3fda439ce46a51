use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn measurements(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn city_stats() -> Command {
    Command::new(env!("CARGO_BIN_EXE_city_stats"))
}

#[test]
fn shows_help() {
    city_stats()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("city_stats"))
        .stdout(predicate::str::contains("--chunk-size"));
}

#[test]
fn aggregates_reference_scenario() {
    let file = measurements("Paris;12.3\nParis;15.0\nLondon;-2.5\n");

    city_stats()
        .arg(file.path())
        .args(["--chunk-size", "16", "-j", "3"])
        .assert()
        .success()
        .stdout("{London=-2.5/-2.5/-2.5, Paris=12.3/13.7/15.0}\n");
}

#[test]
fn empty_file_prints_empty_braces() {
    let file = measurements("");

    city_stats()
        .arg(file.path())
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn malformed_lines_are_dropped() {
    let file = measurements("Paris;12.3\nBadCity;notanumber\nParis;15.0\nLondon;-2.5\n");

    city_stats()
        .arg(file.path())
        .args(["--chunk-size", "24", "-j", "2"])
        .assert()
        .success()
        .stdout("{London=-2.5/-2.5/-2.5, Paris=12.3/13.7/15.0}\n");
}

#[test]
fn json_format() {
    let file = measurements("Paris;12.3\nParis;15.0\n");

    let output = city_stats()
        .arg(file.path())
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json[0]["key"], "Paris");
    assert_eq!(json[0]["count"], 2);
    assert_eq!(json[0]["mean"], 13.7);
}

#[test]
fn missing_file_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();

    city_stats()
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn oversized_line_fails_loudly() {
    let file = measurements("ok;1.0\nAVeryLongCityNameIndeed;12.3\n");

    city_stats()
        .arg(file.path())
        .args(["--chunk-size", "10"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("longer than the read buffer"));
}

#[test]
fn verbose_run_reports_progress_on_stderr() {
    let file = measurements("Paris;12.3\n");

    city_stats()
        .arg(file.path())
        .arg("-v")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("{Paris=12.3/12.3/12.3}\n")
        .stderr(predicate::str::contains("keys: 1"));
}

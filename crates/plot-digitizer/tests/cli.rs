mod common;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn write_plot(dir: &Path) -> String {
    let path = dir.join("plot.png");
    synthetic_plot().save(&path).unwrap();
    path.to_string_lossy().into_owned()
}

fn cmd() -> Command {
    Command::cargo_bin("plot-digitizer").unwrap()
}

fn with_points(cmd: &mut Command, locations: &[&str]) {
    for p in POINTS {
        cmd.arg("-p").arg(p);
    }
    for l in locations {
        cmd.arg("-l").arg(l);
    }
}

#[test]
fn writes_csv_trajectory() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_plot(dir.path());
    let out = dir.path().join("out/traj.csv");

    let mut c = cmd();
    c.arg("-i").arg(&input).arg("-o").arg(&out);
    with_points(&mut c, &LOCATIONS);
    c.assert().success();

    let csv = fs::read_to_string(&out).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("x,y"));
    assert_eq!(lines.count(), (WIDTH - ORIGIN_COL) as usize);
}

#[test]
fn prints_csv_and_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_plot(dir.path());
    let report = dir.path().join("report.json");

    let mut c = cmd();
    c.arg("-i").arg(&input).arg("--report").arg(&report);
    with_points(&mut c, &LOCATIONS);
    c.assert()
        .success()
        .stdout(predicate::str::starts_with("x,y\n"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["result"]["intensities"]["foreground"], CURVE_LEVEL);
    assert_eq!(json["result"]["mask"]["cols"], ORIGIN_COL);
}

#[test]
fn asks_for_missing_locations_on_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_plot(dir.path());
    let out = dir.path().join("traj.json");

    let mut c = cmd();
    c.arg("-i").arg(&input).arg("-o").arg(&out);
    with_points(&mut c, &LOCATIONS[..2]);
    c.write_stdin(format!("{}\n", LOCATIONS[2]))
        .assert()
        .success()
        .stderr(predicate::str::contains("(1 left)"));

    let pairs: Vec<[f64; 2]> = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(pairs.len(), (WIDTH - ORIGIN_COL) as usize);
}

#[test]
fn singular_points_fail() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_plot(dir.path());

    cmd()
        .args(["-i", &input])
        .args(["-p", "1,0", "-p", "1,1", "-l", "10,10", "-l", "20,20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SingularFit"));
}

#[test]
fn missing_input_fails() {
    cmd()
        .args(["-p", "0,0", "-p", "1,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("MissingInput"));
}

#[test]
fn unknown_log_level_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_plot(dir.path());

    let mut c = cmd();
    c.arg("-i").arg(&input).args(["--log-level", "loud"]);
    with_points(&mut c, &LOCATIONS);
    c.assert()
        .failure()
        .stderr(predicate::str::contains("unknown log level \"loud\""));
}

#[test]
fn log_level_is_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_plot(dir.path());

    let mut c = cmd();
    c.arg("-i").arg(&input).args(["--log-level", "DEBUG"]);
    with_points(&mut c, &LOCATIONS);
    c.assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("geoprofile").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("geoprofile"));
}

#[test]
fn lists_sections() {
    let mut cmd = Command::cargo_bin("geoprofile").unwrap();
    cmd.arg("sections");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("demographics"))
        .stdout(predicate::str::contains("ecd_centres"));
}

#[test]
fn prints_table_name() {
    let mut cmd = Command::cargo_bin("geoprofile").unwrap();
    cmd.args(["table-name", "--fields", "population group,gender", "--level", "ward"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::diff("gender_populationgroup_ward\n"));
}

#[test]
fn rejects_unknown_field() {
    let mut cmd = Command::cargo_bin("geoprofile").unwrap();
    cmd.args(["table-name", "--fields", "shoe size", "--level", "ward"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("shoe size"));
}

#[test]
fn profile_writes_csv_and_prints_summary() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let out = dir.path().join("w1.csv");

    let mut cmd = Command::cargo_bin("geoprofile").unwrap();
    cmd.arg("profile")
        .arg("--data")
        .arg(dir.path())
        .args(["--level", "ward", "--code", "W1", "--sections", "demographics;youth"])
        .arg("--out")
        .arg(&out)
        .args(["--print", "--locale", "de"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Ward 1 (ward W1)"))
        .stdout(predicate::str::contains("total_population"))
        .stdout(predicate::str::contains("country=10.000"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("section,key,name,level,value,numerator"));
    assert!(text.contains("demographics,total_population,"));
}

#[test]
fn unknown_geography_fails() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let mut cmd = Command::cargo_bin("geoprofile").unwrap();
    cmd.arg("profile")
        .arg("--data")
        .arg(dir.path())
        .args(["--level", "ward", "--code", "NOPE"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("NOPE"));
}

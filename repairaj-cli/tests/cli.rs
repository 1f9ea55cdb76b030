//! CLI behaviour tests.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FNS: &str = "AnimatedJava/data/animated_java/functions";

fn repair_aj() -> Command {
    Command::cargo_bin("repair-aj").expect("repair-aj binary")
}

fn create_temp_pack() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let root = td.path();

    fs::create_dir_all(root.join(FNS).join("global")).unwrap();
    fs::create_dir_all(root.join(FNS).join("bar").join("animations")).unwrap();
    fs::create_dir_all(root.join(FNS).join("foo").join("animations").join("walk")).unwrap();
    fs::create_dir_all(root.join(FNS).join("foo").join("animations").join("idle")).unwrap();
    fs::write(
        root.join(FNS).join("foo").join("on_load.mcfunction"),
        "data remove storage aj.foo:animations \nsay foo\n",
    )
    .unwrap();
    fs::write(root.join(FNS).join("bar").join("on_load.mcfunction"), "say bar\n").unwrap();

    td
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

#[test]
fn test_status_finds_export() {
    let temp = create_temp_pack();
    repair_aj()
        .current_dir(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repair AJ"));
}

#[test]
fn test_status_without_export_fails() {
    let temp = tempfile::tempdir().unwrap();
    repair_aj()
        .current_dir(temp.path())
        .arg("status")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No AnimatedJava directory"));
}

#[test]
fn test_list_models_sorted_without_global() {
    let temp = create_temp_pack();
    repair_aj()
        .arg("list-models")
        .arg("--project-root")
        .arg(temp.path())
        .assert()
        .success()
        .stdout("bar\nfoo\n");
}

#[test]
fn test_list_models_json() {
    let temp = create_temp_pack();
    let out = repair_aj()
        .current_dir(temp.path())
        .args(["list-models", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: Vec<String> = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v, vec!["bar".to_string(), "foo".to_string()]);
}

#[test]
fn test_repair_with_model_flag() {
    let temp = create_temp_pack();
    repair_aj()
        .current_dir(temp.path())
        .args(["repair", "--model", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("repaired model `foo`"));

    assert_eq!(
        read(
            temp.path(),
            "AnimatedJava/data/animated_java/tags/functions/global/on_load.json"
        ),
        r#"{"values":["animated_java:bar/on_load","animated_java:foo/on_load"]}"#
    );
    assert_eq!(
        read(temp.path(), &format!("{FNS}/foo/on_load.mcfunction")),
        "scoreboard objectives add aj.idle.frame dummy\n\
         scoreboard objectives add aj.walk.frame dummy\n\
         data remove storage aj.foo:animations idle\n\
         data remove storage aj.foo:animations walk\n\
         say foo\n"
    );
}

#[test]
fn test_repair_dry_run_writes_nothing() {
    let temp = create_temp_pack();
    repair_aj()
        .current_dir(temp.path())
        .args(["repair", "--model", "foo", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+scoreboard objectives add aj.idle.frame dummy"))
        .stdout(predicate::str::contains("dry-run: 6 of 6 files would change"));

    assert!(!temp.path().join("AnimatedJava/data/minecraft").exists());
    assert_eq!(
        read(temp.path(), &format!("{FNS}/foo/on_load.mcfunction")),
        "data remove storage aj.foo:animations \nsay foo\n"
    );
}

#[test]
fn test_repair_json_report() {
    let temp = create_temp_pack();
    let out = repair_aj()
        .current_dir(temp.path())
        .args(["repair", "--model", "foo", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["schema"], "repair-aj.report.v1");
    assert_eq!(v["model"], "foo");
    assert_eq!(v["animations"], serde_json::json!(["idle", "walk"]));
    assert_eq!(v["files"].as_array().unwrap().len(), 6);
}

#[test]
fn test_repair_twice_only_changes_on_load() {
    let temp = create_temp_pack();
    repair_aj()
        .current_dir(temp.path())
        .args(["repair", "--model", "foo"])
        .assert()
        .success();
    repair_aj()
        .current_dir(temp.path())
        .args(["repair", "--model", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 6 files changed"));
}

#[test]
fn test_repair_uses_config_model() {
    let temp = create_temp_pack();
    fs::write(
        temp.path().join("repair-aj.toml"),
        "[repair]\nmodel = \"bar\"\n",
    )
    .unwrap();

    repair_aj()
        .current_dir(temp.path())
        .arg("repair")
        .assert()
        .success()
        .stdout(predicate::str::contains("repaired model `bar`"));
}

#[test]
fn test_repair_missing_export_dir() {
    let temp = tempfile::tempdir().unwrap();
    repair_aj()
        .current_dir(temp.path())
        .args(["repair", "--model", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("AnimatedJava does not exist"));
}

#[test]
fn test_repair_unknown_model() {
    let temp = create_temp_pack();
    repair_aj()
        .current_dir(temp.path())
        .args(["repair", "--model", "global"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown model `global`"));
    assert!(!temp.path().join("AnimatedJava/data/minecraft").exists());
}

#[test]
fn test_repair_missing_project_root() {
    let temp = tempfile::tempdir().unwrap();
    repair_aj()
        .args(["repair", "--model", "foo", "--project-root"])
        .arg(temp.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no project is open"));
}

#[test]
fn test_repair_without_terminal_needs_model() {
    let temp = create_temp_pack();
    repair_aj()
        .current_dir(temp.path())
        .arg("repair")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pass --model"));
}

#[test]
fn test_invalid_format_rejected() {
    repair_aj()
        .args(["list-models", "--format", "yaml"])
        .assert()
        .failure();
}

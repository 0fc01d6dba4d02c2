// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn formcheck() -> Command {
    let mut cmd = Command::cargo_bin("formcheck").unwrap();
    cmd.env_remove("FORMCHECK_LOCALE").env_remove("RUST_LOG");
    cmd
}

/// A directory holding the example config and page written by `init`.
fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    formcheck()
        .current_dir(dir.path())
        .args(["init", "--dir"])
        .arg(dir.path())
        .assert()
        .success();
    dir
}

fn check(dir: &TempDir) -> Command {
    let mut cmd = formcheck();
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("formcheck.toml"))
        .arg("check")
        .arg(dir.path().join("page.toml"));
    cmd
}

#[test]
fn test_init_writes_config_and_page() {
    let dir = initialized();
    assert!(dir.path().join("formcheck.toml").exists());
    assert!(dir.path().join("page.toml").exists());

    formcheck()
        .args(["init", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    formcheck()
        .args(["init", "--force", "--dir"])
        .arg(dir.path())
        .assert()
        .success();
}

#[test]
fn test_init_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("site").join("forms");
    formcheck()
        .args(["init", "--dir"])
        .arg(&nested)
        .assert()
        .success();
    assert!(nested.join("page.toml").exists());
}

#[test]
fn test_init_into_a_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("taken");
    std::fs::write(&file, "").unwrap();
    formcheck()
        .args(["init", "--dir"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_check_fresh_page_reports_forms() {
    let dir = initialized();
    check(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("edit-profile"))
        .stdout(predicate::str::contains("new-place"))
        .stdout(predicate::str::contains("submit disabled"))
        .stdout(predicate::str::contains("remove-card").not());
}

#[test]
fn test_fresh_page_fails_on_invalid() {
    let dir = initialized();
    check(&dir)
        .arg("--fail-on-invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be submitted"));
}

#[test]
fn test_valid_values_enable_submit() {
    let dir = initialized();
    check(&dir)
        .args([
            "--set",
            "place-name=Камчатка",
            "--set",
            "link=https://example.com/kamchatka.jpg",
            "--form",
            "new-place",
            "--fail-on-invalid",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("submit enabled"));
}

#[test]
fn test_error_messages_follow_locale() {
    let dir = initialized();
    check(&dir)
        .args(["--set", "place-name=", "--form", "new-place"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Обязательное поле"));

    check(&dir)
        .args(["--locale", "en", "--set", "place-name=a", "--form", "new-place"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Must be between 2 and 30 characters"));
}

#[test]
fn test_locale_from_environment() {
    let dir = initialized();
    check(&dir)
        .env("FORMCHECK_LOCALE", "en")
        .args(["--set", "user-name=", "--form", "edit-profile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Required field"));
}

#[test]
fn test_json_output() {
    let dir = initialized();
    let output = check(&dir)
        .args(["--format", "json", "--set", "link=not a url"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let forms = report["forms"].as_array().unwrap();
    assert_eq!(forms.len(), 3);

    let new_place = forms.iter().find(|f| f["id"] == "new-place").unwrap();
    let link = new_place["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["id"] == "link")
        .unwrap();
    assert_eq!(link["invalid"], true);
    assert_eq!(link["code"], "native");
    assert_eq!(new_place["submit_enabled"], false);
}

#[test]
fn test_unknown_field_is_an_error() {
    let dir = initialized();
    check(&dir)
        .args(["--set", "nope=value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No element with id 'nope'"));
}

#[test]
fn test_form_without_fields_cannot_be_selected() {
    let dir = initialized();
    check(&dir)
        .args(["--form", "remove-card"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("remove-card"));
}

#[test]
fn test_bad_config_is_reported() {
    let dir = initialized();
    std::fs::write(
        dir.path().join("formcheck.toml"),
        "[validation]\nerror_class = \"two words\"\n",
    )
    .unwrap();
    check(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_version() {
    formcheck()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("formcheck "));
}

//! Integration tests for the recap CLI surface

mod support;

use predicates::prelude::*;
use support::{recap, write_config};
use tempfile::tempdir;

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    recap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: recap"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("auto"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_flag() {
    recap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("recap"));
}

#[test]
fn test_no_command_prints_banner() {
    recap()
        .assert()
        .success()
        .stdout(predicate::str::contains("recap --help"));
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn test_unknown_recap_kind_exit_code_2() {
    recap()
        .args(["run", "yearly"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown recap kind"));
}

#[test]
fn test_unknown_recap_kind_json_envelope() {
    recap()
        .args(["--format", "json", "run", "yearly"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\": \"usage_error\"").or(
            predicate::str::contains("\"type\":\"usage_error\""),
        ));
}

#[test]
fn test_today_with_monthly_is_usage_error() {
    let dir = tempdir().unwrap();
    recap()
        .current_dir(dir.path())
        .args(["run", "monthly", "--today", "2024-03-18"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--today only applies"));
    assert!(!dir.path().join("Recaps").exists());
}

#[test]
fn test_bad_auto_time_exit_code_2() {
    recap().args(["auto", "--at", "tomorrow"]).assert().code(2);
}

#[test]
fn test_missing_vault_exit_code_3() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nowhere");
    recap()
        .arg("--vault")
        .arg(&missing)
        .args(["run", "monthly"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("vault not found"));
}

#[test]
fn test_invalid_config_value_exit_code_2() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "note_extension = \".md\"\n");
    recap()
        .current_dir(dir.path())
        .args(["run", "weekly"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid note_extension"));
}

#[test]
fn test_bad_endpoint_url_does_not_block_monthly_run() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "api_base_url = \"localhost:8080\"\n");
    std::fs::write(dir.path().join("2024-01-05.md"), "January.").unwrap();
    recap()
        .current_dir(dir.path())
        .args(["run", "monthly"])
        .assert()
        .success();
    assert!(dir.path().join("Recaps/Monthly/2024-01.md").exists());
}

#[test]
fn test_escaping_output_folder_exit_code_2() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "monthly_output_folder = \"../outside\"\n");
    std::fs::write(dir.path().join("2024-01-05.md"), "January.").unwrap();
    recap()
        .current_dir(dir.path())
        .args(["run", "monthly"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("monthly_output_folder"));
}

#[test]
fn test_unknown_model_is_config_error() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "model = \"gpt-2\"\n");
    recap()
        .current_dir(dir.path())
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TOML error"));
}

// ============================================================================
// Config commands
// ============================================================================

#[test]
fn test_config_path_defaults_into_vault() {
    let dir = tempdir().unwrap();
    recap()
        .arg("--vault")
        .arg(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".recap"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_then_already_exists() {
    let dir = tempdir().unwrap();

    recap()
        .current_dir(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    let written = std::fs::read_to_string(dir.path().join(".recap/config.toml")).unwrap();
    assert!(written.contains("monthly_output_folder = \"Recaps/Monthly\""));

    recap()
        .current_dir(dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_config_show_masks_api_key() {
    let dir = tempdir().unwrap();
    write_config(dir.path(), "api_key = \"sk-secret-abcd\"\n");
    recap()
        .current_dir(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****abcd"))
        .stdout(predicate::str::contains("sk-secret").not());
}

#[test]
fn test_config_show_json_applies_env_override() {
    let dir = tempdir().unwrap();
    let output = recap()
        .current_dir(dir.path())
        .env("RECAP_API_BASE_URL", "http://localhost:8080/v1")
        .args(["--format", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["exists"], false);
    assert_eq!(json["config"]["api_base_url"], "http://localhost:8080/v1");
    assert_eq!(json["config"]["model"], "gpt-4o-mini");
}

#[test]
fn test_explicit_config_flag() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("elsewhere.toml");
    std::fs::write(&config, "weekly_output_folder = \"Digests\"\n").unwrap();

    let output = recap()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "config", "show"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["exists"], true);
    assert_eq!(json["config"]["weekly_output_folder"], "Digests");
}

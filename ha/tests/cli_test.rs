//! CLI smoke tests for the `ha` binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `ha` isolated from the user's config, data and API key
fn ha(temp: &Path) -> Command {
    let config = temp.join("halfart.yml");
    std::fs::write(
        &config,
        format!(
            "storage:\n  data-dir: {}\nllm:\n  api-key-env: HALFART_TEST_NO_SUCH_KEY\n",
            temp.join("data").display()
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("ha").unwrap();
    cmd.current_dir(temp)
        .env("XDG_DATA_HOME", temp.join("xdg-data"))
        .env("XDG_CONFIG_HOME", temp.join("xdg-config"))
        .env_remove("HALFART_TEST_NO_SUCH_KEY")
        .arg("--config")
        .arg(&config);
    cmd
}

#[test]
fn test_help() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("ha").unwrap();
    cmd.current_dir(temp.path())
        .env("XDG_DATA_HOME", temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("Logs are written to"));
}

#[test]
fn test_profile_path() {
    let temp = TempDir::new().unwrap();
    ha(temp.path())
        .args(["profile", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("halfart_profile.blob"));
}

#[test]
fn test_profile_show_defaults() {
    let temp = TempDir::new().unwrap();
    ha(temp.path())
        .args(["profile", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"default_max_walk_minutes\": 20"));
}

#[test]
fn test_profile_show_saved() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("halfart_profile.blob"), r#"{"home_areas": ["Chelsea"]}"#).unwrap();

    ha(temp.path())
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chelsea"))
        .stdout(predicate::str::contains("20 minutes between stops"));
}

#[test]
fn test_profile_reset() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    let blob = data.join("halfart_profile.blob");
    std::fs::write(&blob, "{}").unwrap();

    ha(temp.path())
        .args(["profile", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile reset"));
    assert!(!blob.exists());
}

#[test]
fn test_ask_without_key_apologizes() {
    let temp = TempDir::new().unwrap();
    ha(temp.path())
        .args(["ask", "Chelsea this afternoon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("having trouble connecting to the art world"));
}

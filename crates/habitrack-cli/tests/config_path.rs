use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("habitrack")
        .env("HABITRACK_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("habitrack")
        .env("HABITRACK_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("base_url ="));
    assert!(contents.contains("habit_done = 3"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("habitrack")
        .env("HABITRACK_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_base_url() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("habitrack")
        .env("HABITRACK_HOME", dir.path())
        .args(["config", "set-base-url", "https://habits.example.com/"])
        .assert()
        .success();

    let contents = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(contents.contains("base_url = \"https://habits.example.com\""));
}

#[test]
fn test_config_set_base_url_rejects_garbage() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("habitrack")
        .env("HABITRACK_HOME", dir.path())
        .args(["config", "set-base-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API base URL"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("habitrack")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

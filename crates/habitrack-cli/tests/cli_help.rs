use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("habitrack")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("habits"))
        .stdout(predicate::str::contains("today"))
        .stdout(predicate::str::contains("done"));
}

#[test]
fn test_habits_help_shows_subcommands() {
    cargo_bin_cmd!("habitrack")
        .args(["habits", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("habitrack")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_tui_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("habitrack")
        .env("HABITRACK_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}

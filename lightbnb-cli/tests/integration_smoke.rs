//! Smoke tests to verify command wiring (no database needed)

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("reservations"))
        .stdout(predicate::str::contains("search"));
}

#[test]
fn test_search_help() {
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    cmd.arg("search").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--min-rating"))
        .stdout(predicate::str::contains("only applied together with --max-price"));
}

#[test]
fn test_user_create_help() {
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    cmd.arg("user").arg("create").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--email"));
}

#[test]
fn test_property_add_help() {
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    cmd.arg("property").arg("add").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("JSON document"));
}

#[test]
fn test_reservations_requires_guest_id() {
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    cmd.arg("reservations");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("GUEST_ID"));
}

/// Variables that would let the caller's environment override the command line
const DB_OVERRIDE_VARS: &[&str] = &[
    "DATABASE_URL",
    "LIGHTBNB_CONFIG",
    "LIGHTBNB_DB_USER",
    "LIGHTBNB_DB_PASSWORD",
    "LIGHTBNB_DB_HOST",
    "LIGHTBNB_DB_PORT",
    "LIGHTBNB_DB_NAME",
    "LIGHTBNB_DB_MAX_CONNECTIONS",
];

#[test]
fn test_bad_database_url_fails() {
    // Empty home so no ~/.lightbnb config or .env is picked up
    let home = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("lightbnb").unwrap();
    for var in DB_OVERRIDE_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home.path())
        .arg("--database-url")
        .arg("not a url")
        .arg("search");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect to database"));
}

//! Integration tests for the citerd CLI commands.
//!
//! Offline checks only: argument parsing, validation, and the failure paths
//! that never reach the DOI service.

use assert_cmd::Command;
use predicates::prelude::*;

// Helper function to create a clean command instance
fn citerd() -> Command { Command::cargo_bin("citerd").unwrap() }

#[test]
fn test_help_lists_citation_commands() {
  citerd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("create"))
    .stdout(predicate::str::contains("delete"))
    .stdout(predicate::str::contains("status"));
}

#[test]
fn test_get_requires_an_identifier() {
  citerd().arg("get").assert().failure().stderr(predicate::str::contains("IDENTIFIER"));
}

#[test]
fn test_invalid_endpoint_is_rejected_before_any_call() {
  citerd()
    .arg("--endpoint")
    .arg("not a url")
    .arg("status")
    .arg("AB.1234")
    .assert()
    .failure();
}

#[test]
fn test_slashed_non_doi_identifier_is_rejected() {
  citerd()
    .arg("get")
    .arg("not/a/doi")
    .assert()
    .failure()
    .stderr(predicate::str::contains("InvalidIdentifier"));
}

#[test]
fn test_open_requires_a_parseable_page_url() {
  citerd().arg("open").arg("not a url").assert().failure();
}

//! Integration tests for the CLI binary.
//!
//! Verifies that the `idl` binary responds to basic flags and drives both
//! ledgers through a snapshot file.
//!
//! This test is registered as a [[test]] in the identity-ledger-cli crate
//! so that CARGO_BIN_EXE_idl is available.

use std::path::Path;
use std::process::{Command, Output};

const ISSUER: &str = "0x00000000000000000000000000000000000155e4";
const OPERATOR: &str = "0x000000000000000000000000000000000000095e";
const ALICE: &str = "0x00000000000000000000000000000000000a11ce";
const BOB: &str = "0x0000000000000000000000000000000000000b0b";
const REVIEWER: &str = "0x0000000000000000000000000000000000000eee";

/// Get a Command pointing to the `idl` binary.
fn idl_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_idl"))
}

/// Run `idl --store <store> <args...>`.
fn idl(store: &Path, args: &[&str]) -> Output {
    idl_binary()
        .arg("--store")
        .arg(store)
        .args(args)
        .output()
        .expect("failed to execute idl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "idl should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn cli_responds_to_help() {
    let output = idl_binary()
        .arg("--help")
        .output()
        .expect("failed to execute idl --help");

    assert_success(&output);
    let text = stdout(&output);
    assert!(
        text.contains("idl") || text.contains("IdentityLedger") || text.contains("Usage"),
        "idl --help output should contain usage information, got: {text}"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = idl_binary()
        .arg("--version")
        .output()
        .expect("failed to execute idl --version");

    assert_success(&output);
    let text = stdout(&output);
    assert!(
        text.contains("0.1") || text.contains("idl"),
        "idl --version should contain version info, got: {text}"
    );
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = idl_binary()
        .arg("--nonexistent-flag")
        .output()
        .expect("failed to execute idl");

    assert!(
        !output.status.success(),
        "idl with unknown flag should exit with error"
    );
}

#[test]
fn cli_new_address_is_parseable() {
    let output = idl_binary()
        .arg("new-address")
        .output()
        .expect("failed to execute idl new-address");
    assert_success(&output);
    let text = stdout(&output);
    let line = text.trim();
    assert!(line.starts_with("0x"));
    assert_eq!(line.len(), 42);
}

#[test]
fn cli_issuer_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("issuer.json");

    let out = idl(
        &store,
        &["issuer", "init", "--name", "Identity", "--symbol", "IDT", "--issuer", ISSUER],
    );
    assert_success(&out);

    // Init refuses to overwrite.
    let out = idl(
        &store,
        &["issuer", "init", "--name", "Again", "--symbol", "AGN", "--issuer", ISSUER],
    );
    assert!(!out.status.success());

    let out = idl(
        &store,
        &[
            "issuer", "create", "--caller", ISSUER, "--subject", ALICE, "--label", "Alice",
            "--url", "https://a.example", "--number", "101", "--timestamp", "1700000000",
        ],
    );
    assert_success(&out);
    assert!(stdout(&out).contains("created"));

    let out = idl(&store, &["issuer", "exists", "--subject", ALICE]);
    assert_success(&out);
    assert_eq!(stdout(&out).trim(), "true");

    // A non-issuer cannot update.
    let out = idl(
        &store,
        &[
            "issuer", "update", "--caller", ALICE, "--subject", ALICE, "--label", "Forged",
        ],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unauthorized"));

    let out = idl(
        &store,
        &[
            "issuer", "update", "--caller", ISSUER, "--subject", ALICE, "--label", "Alice2",
            "--url", "https://a2.example", "--number", "202", "--timestamp", "1700086400",
        ],
    );
    assert_success(&out);

    let out = idl(&store, &["issuer", "show", "--subject", ALICE, "--json"]);
    assert_success(&out);
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value["exists"], true);
    assert_eq!(value["record"]["subject_label"], "Alice2");
    assert_eq!(value["record"]["reference_number"], 202);

    // The subject removes itself.
    let out = idl(&store, &["issuer", "remove", "--caller", ALICE, "--subject", ALICE]);
    assert_success(&out);
    assert!(stdout(&out).contains("deleted"));

    let out = idl(&store, &["issuer", "exists", "--subject", ALICE]);
    assert_eq!(stdout(&out).trim(), "false");
}

#[test]
fn cli_open_profiles_and_cascade() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("open.json");

    assert_success(&idl(
        &store,
        &["open", "init", "--name", "Open", "--symbol", "OPN", "--operator", OPERATOR],
    ));
    assert_success(&idl(
        &store,
        &["open", "create", "--caller", OPERATOR, "--subject", BOB, "--label", "Bob"],
    ));

    let out = idl(
        &store,
        &[
            "open", "profile", "create", "--caller", REVIEWER, "--subject", BOB, "--label",
            "reliable", "--score", "90",
        ],
    );
    assert_success(&out);
    assert!(stdout(&out).contains("profile_created"));

    let out = idl(&store, &["open", "profile", "list", "--subject", BOB]);
    assert_success(&out);
    assert!(stdout(&out).contains(REVIEWER));

    // Profiling a subject without a record fails.
    let out = idl(
        &store,
        &[
            "open", "profile", "create", "--caller", REVIEWER, "--subject", ALICE, "--label", "x",
        ],
    );
    assert!(!out.status.success());

    assert_success(&idl(
        &store,
        &["open", "delete", "--caller", OPERATOR, "--subject", BOB],
    ));

    let out = idl(
        &store,
        &["open", "profile", "exists", "--profiler", REVIEWER, "--subject", BOB],
    );
    assert_success(&out);
    assert_eq!(stdout(&out).trim(), "false");
}

#[test]
fn cli_missing_ledger_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("absent.json");
    let out = idl(&store, &["open", "list"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("init"));
}

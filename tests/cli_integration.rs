//! Integration tests for the Skita CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Passwords come from the `SKITA_PASSWORD` environment variable so no
//! interactive prompt is needed; HOME/XDG_DATA_HOME point into the temp
//! dir so the operation history stays out of the real user profile.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the skita binary, homed in `dir`.
fn skita(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("skita").expect("binary should exist");
    cmd.env("HOME", dir.path())
        .env("XDG_DATA_HOME", dir.path().join(".data"))
        .current_dir(dir.path());
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let dir = TempDir::new().unwrap();
    skita(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Password-based file encryption"))
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn version_flag_works() {
    let dir = TempDir::new().unwrap();
    skita(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skita"));
}

#[test]
fn encrypt_then_decrypt_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.child("report.txt");
    input.write_str("quarterly numbers").unwrap();

    skita(&dir)
        .args(["encrypt", "report.txt"])
        .env("SKITA_PASSWORD", "a-long-password")
        .assert()
        .success();

    let container = dir.child("report.txt.skita");
    container.assert(predicate::path::exists());

    // Decrypt into a separate directory so the original is untouched.
    let restored_dir = dir.child("restored");
    restored_dir.create_dir_all().unwrap();

    skita(&dir)
        .args(["decrypt", "report.txt.skita", "--out-dir", "restored"])
        .env("SKITA_PASSWORD", "a-long-password")
        .assert()
        .success();

    dir.child("restored/report.txt")
        .assert("quarterly numbers");
}

#[test]
fn encrypt_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    dir.child("data.bin").write_binary(b"payload").unwrap();

    skita(&dir)
        .args(["encrypt", "data.bin"])
        .env("SKITA_PASSWORD", "a-long-password")
        .assert()
        .success();

    skita(&dir)
        .args(["encrypt", "data.bin"])
        .env("SKITA_PASSWORD", "a-long-password")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // With --force the second run succeeds.
    skita(&dir)
        .args(["encrypt", "data.bin", "--force"])
        .env("SKITA_PASSWORD", "a-long-password")
        .assert()
        .success();
}

#[test]
fn decrypt_with_wrong_password_fails() {
    let dir = TempDir::new().unwrap();
    dir.child("secret.txt").write_str("top secret").unwrap();

    skita(&dir)
        .args(["encrypt", "secret.txt"])
        .env("SKITA_PASSWORD", "correct-password")
        .assert()
        .success();

    skita(&dir)
        .args(["decrypt", "secret.txt.skita"])
        .env("SKITA_PASSWORD", "wrong-password")
        .assert()
        .failure()
        .stderr(predicate::str::contains("wrong password or corrupted"));

    // The plaintext must not have been written.
    dir.child("secret.txt")
        .assert("top secret"); // original untouched, no overwrite happened
}

#[test]
fn short_env_password_is_rejected() {
    let dir = TempDir::new().unwrap();
    dir.child("f.txt").write_str("x").unwrap();

    skita(&dir)
        .args(["encrypt", "f.txt"])
        .env("SKITA_PASSWORD", "short")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 8 characters"));
}

#[test]
fn inspect_shows_metadata_without_password() {
    let dir = TempDir::new().unwrap();
    dir.child("doc.md").write_str("# hello").unwrap();

    skita(&dir)
        .args(["encrypt", "doc.md", "--algorithm", "chacha20-poly1305"])
        .env("SKITA_PASSWORD", "a-long-password")
        .assert()
        .success();

    // No SKITA_PASSWORD for inspect — it never decrypts.
    skita(&dir)
        .args(["inspect", "doc.md.skita"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ChaCha20-Poly1305"))
        .stdout(predicate::str::contains("doc.md"))
        .stdout(predicate::str::contains("Argon2id"));
}

#[test]
fn inspect_json_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    dir.child("doc.md").write_str("# hello").unwrap();

    skita(&dir)
        .args(["encrypt", "doc.md"])
        .env("SKITA_PASSWORD", "a-long-password")
        .assert()
        .success();

    skita(&dir)
        .args(["inspect", "doc.md.skita", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"algorithm\": \"AES-256-GCM\""))
        .stdout(predicate::str::contains("\"original_size\": 7"));
}

#[test]
fn inspect_rejects_non_container() {
    let dir = TempDir::new().unwrap();
    dir.child("plain.txt").write_str("not a container").unwrap();

    skita(&dir)
        .args(["inspect", "plain.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("magic"));
}

#[test]
fn genpass_produces_requested_words() {
    let dir = TempDir::new().unwrap();
    let output = skita(&dir)
        .args(["genpass", "--words", "4"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let first_line = String::from_utf8(output)
        .unwrap()
        .lines()
        .next()
        .unwrap()
        .to_string();
    assert_eq!(first_line.split('-').count(), 4);
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().unwrap();
    skita(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skita"));
}

#[test]
fn history_lists_recent_operations() {
    let dir = TempDir::new().unwrap();
    dir.child("h.txt").write_str("history me").unwrap();

    skita(&dir)
        .args(["encrypt", "h.txt"])
        .env("SKITA_PASSWORD", "a-long-password")
        .assert()
        .success();

    skita(&dir)
        .args(["history", "--last", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("h.txt").or(predicate::str::contains("unavailable")));
}

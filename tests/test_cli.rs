//! Integration tests for the bigcalc binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn bigcalc() -> Command {
    let mut cmd = Command::cargo_bin("bigcalc").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("BIGCALC_RC")
        .env_remove("BIGCALC_BANNER");
    cmd
}

#[test]
fn test_command_prints_result() {
    bigcalc()
        .args(["-c", "2", "*", "(3", "+", "4)"])
        .assert()
        .success()
        .stdout("14\n");
}

#[test]
fn test_command_error_fails() {
    bigcalc()
        .args(["-c", "7 / 0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Division by zero"));
}

#[test]
fn test_help_and_version() {
    bigcalc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE"));
    bigcalc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("bigcalc "));
}

#[test]
fn test_script_runs_in_one_session() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("calc.txt");
    fs::write(
        &script,
        "# powers of two\nn = 2 ^ 64\n\nn - 1\nn / 2 ^ 32\n",
    )
    .unwrap();

    bigcalc()
        .arg(&script)
        .assert()
        .success()
        .stdout("18446744073709551615\n4294967296\n");
}

#[test]
fn test_script_stops_at_first_error() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("bad.txt");
    fs::write(&script, "1 + 1\nmissing * 2\n3 + 3\n").unwrap();

    bigcalc()
        .arg(&script)
        .assert()
        .failure()
        .stdout("2\n")
        .stderr(predicate::str::contains("Error at line 2: Unknown variable"));
}

#[test]
fn test_script_exit_command() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("exit.txt");
    fs::write(&script, "5\n/exit\n6\n").unwrap();

    bigcalc()
        .arg(&script)
        .assert()
        .success()
        .stdout("5\nBye!\n");
}

#[test]
fn test_missing_script() {
    bigcalc()
        .arg("/definitely/not/here.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading"));
}

#[test]
fn test_repl_reads_rc_and_stdin() {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join(".bigcalcrc"), "base = 1000\n").unwrap();

    bigcalc()
        .env("HOME", home.path())
        .write_stdin("base * 3\nx\n/exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3000"))
        .stdout(predicate::str::contains("Unknown variable"))
        .stdout(predicate::str::contains("Bye!"));
}

#[test]
fn test_repl_norc() {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join(".bigcalcrc"), "base = 1000\n").unwrap();

    bigcalc()
        .env("HOME", home.path())
        .arg("--norc")
        .write_stdin("base\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown variable"));
}

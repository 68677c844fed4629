// Drive the pwstore binary through piped shell commands.

use assert_cmd::Command;
use predicates::prelude::*;

fn pwstore() -> Command {
    let mut cmd = Command::cargo_bin("pwstore").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PWSTORE_ADMIN_PIN")
        .env_remove("PWSTORE_PIN_ATTEMPTS")
        .env_remove("PWSTORE_PASSWORD_LENGTH");
    cmd
}

#[test]
fn test_add_and_reveal() {
    pwstore()
        .write_stdin("add example.com abc Secr3t!\nreveal example.com abc\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: example.com"))
        .stdout(predicate::str::contains("Decrypted Password: Secr3t!"));
}

#[test]
fn test_wrong_key_is_reported() {
    pwstore()
        .write_stdin("add example.com abc Secr3t!\nreveal example.com xyz\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Secr3t!").not())
        .stderr(predicate::str::contains("Incorrect decryption key"));
}

#[test]
fn test_invalid_key_length() {
    pwstore()
        .write_stdin("add example.com ab Secr3t!\nlist\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("exactly 3 bytes"))
        .stdout(predicate::str::contains("No passwords stored"));
}

#[test]
fn test_list_is_sorted_by_site() {
    let output = pwstore()
        .write_stdin("add b.com abc pw\nadd a.com abc pw\nadd c.com abc pw\nlist\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let a = stdout.find("Website: a.com").unwrap();
    let b = stdout.find("Website: b.com").unwrap();
    let c = stdout.find("Website: c.com").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_delete_with_pin() {
    pwstore()
        .write_stdin("add a.com abc pw\ndelete a.com\ndsaastar\nreveal a.com abc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: a.com"))
        .stderr(predicate::str::contains("Password not found: a.com"));
}

#[test]
fn test_delete_with_configured_pin_from_env() {
    pwstore()
        .env("PWSTORE_ADMIN_PIN", "0420")
        .write_stdin("add a.com abc pw\ndelete a.com\n0420\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted: a.com"));
}

#[test]
fn test_delete_denied_after_three_wrong_pins() {
    pwstore()
        .write_stdin("add a.com abc pw\ndelete a.com\n1\n2\n3\nreveal a.com abc\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Access denied"))
        .stdout(predicate::str::contains("Decrypted Password: pw"));
}

#[test]
fn test_undo_reports_without_reverting() {
    pwstore()
        .write_stdin("add x abc pw\nundo\nreveal x abc\nundo\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Last affected entry: x"))
        .stdout(predicate::str::contains("Decrypted Password: pw"))
        .stderr(predicate::str::contains("No operations to undo"));
}

#[test]
fn test_sort_commands() {
    pwstore()
        .write_stdin("add b abc pw\nadd a abc pw\nsort quick\nsort merge\nsort bubble\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Passwords sorted using QuickSort"))
        .stdout(predicate::str::contains("Passwords sorted using MergeSort"))
        .stderr(predicate::str::contains("Unknown sort algorithm"));
}

#[test]
fn test_generate_uses_configured_length() {
    let output = pwstore()
        .args(["--password-length", "20"])
        .write_stdin("generate site.com abc\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let line = stdout
        .lines()
        .find(|line| line.contains("Generated Password: "))
        .unwrap();
    let password = line.split("Generated Password: ").nth(1).unwrap();
    assert_eq!(password.len(), 20);
}

#[test]
fn test_history_marks_shadowed_duplicates() {
    pwstore()
        .write_stdin("add site abc one\nadd site xyz two\nhistory\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"))
        .stdout(predicate::str::contains("[shadowed]"));
}

#[test]
fn test_json_stats() {
    pwstore()
        .args(["-o", "json"])
        .write_stdin("add a abc pw\nadd b abc pw\nstats\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"records\": 2"))
        .stdout(predicate::str::contains("\"undo_depth\": 2"));
}

#[test]
fn test_json_list() {
    pwstore()
        .args(["-o", "json"])
        .write_stdin("add a abc aa\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"site\": \"a\""))
        .stdout(predicate::str::contains("\"secret\": \"AAM=\""));
}

#[test]
fn test_invalid_config_exits_with_error() {
    pwstore()
        .args(["--attempts", "0"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("PIN attempts must be at least 1"));
}

#[test]
fn test_unknown_command() {
    pwstore()
        .write_stdin("frobnicate\nexit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command: frobnicate"));
}

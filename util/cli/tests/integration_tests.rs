use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

const C17: &str = "\
# c17
INPUT(1)
INPUT(2)
INPUT(3)
INPUT(6)
INPUT(7)

OUTPUT(22)
OUTPUT(23)

10 = NAND(1, 3)
11 = NAND(3, 6)
16 = NAND(2, 11)
19 = NAND(11, 7)
22 = NAND(10, 16)
23 = NAND(16, 19)
";

const C17_LOG: &str = "\
test 1: 01101
  16 /0
  16->19 /1
  11 /0
test 2: 11100
  16 /1
  7 /0
";

/// Helper to write a file into the test directory
fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Helper to get the xorlock binary
fn xorlock_cmd() -> Command {
    Command::cargo_bin("xorlock").unwrap()
}

fn lock_c17(dir: &TempDir, keys: usize) -> (PathBuf, PathBuf) {
    let bench = write_file(dir, "c17.bench", C17);
    let log = write_file(dir, "c17_log", C17_LOG);
    let output = dir.path().join("c17_locked.bench");

    xorlock_cmd()
        .arg("lock")
        .arg("--bench")
        .arg(&bench)
        .arg("--log")
        .arg(&log)
        .arg("--keys")
        .arg(keys.to_string())
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    (bench, output)
}

fn verify_cmd(original: &Path, locked: &Path) -> Command {
    let mut cmd = xorlock_cmd();
    cmd.arg("verify")
        .arg("--original")
        .arg(original)
        .arg("--locked")
        .arg(locked)
        .arg("--equivalence-patterns")
        .arg("200")
        .arg("--patterns")
        .arg("200");
    cmd
}

#[test]
fn test_help_command() {
    xorlock_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("XOR key-gate logic locking"));
}

#[test]
fn test_version_command() {
    xorlock_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("xorlock"));
}

#[test]
fn test_info_c17() {
    let dir = tempdir().unwrap();
    let bench = write_file(&dir, "c17.bench", C17);

    xorlock_cmd()
        .arg("info")
        .arg(&bench)
        .assert()
        .success()
        .stdout(predicate::str::contains("Inputs: 5"))
        .stdout(predicate::str::contains("Outputs: 2"))
        .stdout(predicate::str::contains("Total gates: 6"))
        .stdout(predicate::str::contains("NAND gates: 6 (100.0%)"));
}

#[test]
fn test_lock_writes_netlist() {
    let dir = tempdir().unwrap();
    let bench = write_file(&dir, "c17.bench", C17);
    let log = write_file(&dir, "c17_log", C17_LOG);
    let output = dir.path().join("c17_locked.bench");

    xorlock_cmd()
        .arg("lock")
        .arg("-b")
        .arg(&bench)
        .arg("-l")
        .arg(&log)
        .arg("-k")
        .arg("2")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Key gates: 2"))
        .stdout(predicate::str::contains("(3 detections)"))
        .stdout(predicate::str::contains("Key inputs: k0, k1"))
        .stdout(predicate::str::contains("Correct key: 00"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# Locked c17 with 2 key-gates\n"));
    assert!(text.contains("INPUT(k0)\n\nINPUT(k1)\n"));
    assert!(text.contains("16_locked  = XOR(16, k0)"));
    assert!(text.contains("11_locked  = XOR(11, k1)"));
    assert!(text.contains("16         = NAND(2, 11_locked)"));
}

#[test]
fn test_lock_custom_title() {
    let dir = tempdir().unwrap();
    let bench = write_file(&dir, "c17.bench", C17);
    let log = write_file(&dir, "c17_log", C17_LOG);
    let output = dir.path().join("out.bench");

    xorlock_cmd()
        .args(["lock", "--keys", "1", "--title", "my circuit"])
        .arg("--bench")
        .arg(&bench)
        .arg("--log")
        .arg(&log)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# my circuit\n"));
}

#[test]
fn test_lock_multi_line_title_reads_back() {
    let dir = tempdir().unwrap();
    let bench = write_file(&dir, "c17.bench", C17);
    let log = write_file(&dir, "c17_log", C17_LOG);
    let output = dir.path().join("out.bench");

    xorlock_cmd()
        .args(["lock", "--keys", "1", "--title", "locked\nINPUT(z)"])
        .arg("--bench")
        .arg(&bench)
        .arg("--log")
        .arg(&log)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# locked\n# INPUT(z)\n"));

    xorlock_cmd()
        .arg("info")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Inputs: 6"));
}

#[test]
fn test_lock_then_verify() {
    let dir = tempdir().unwrap();
    let (bench, locked) = lock_c17(&dir, 3);

    verify_cmd(&bench, &locked)
        .assert()
        .success()
        .stdout(predicate::str::contains("Key inputs: 3"))
        .stdout(predicate::str::contains("PASSED"))
        .stdout(predicate::str::contains("Wrong key 111:"))
        .stdout(predicate::str::contains("Wrong key 101:"))
        .stdout(predicate::str::contains("Wrong key 001:"))
        .stdout(predicate::str::contains("Bit flip rate"));
}

#[test]
fn test_verify_explicit_keys() {
    let dir = tempdir().unwrap();
    let (bench, locked) = lock_c17(&dir, 2);

    verify_cmd(&bench, &locked)
        .args(["--key", "01", "--key", "10", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrong key 01:"))
        .stdout(predicate::str::contains("Wrong key 10:"))
        .stdout(predicate::str::contains("Wrong key 11:").not());
}

#[test]
fn test_verify_same_seed_same_output() {
    let dir = tempdir().unwrap();
    let (bench, locked) = lock_c17(&dir, 2);

    let run = || {
        let out = verify_cmd(&bench, &locked)
            .args(["--seed", "7"])
            .output()
            .unwrap();
        assert!(out.status.success());
        out.stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_verify_detects_broken_lock() {
    let dir = tempdir().unwrap();
    let bench = write_file(&dir, "c17.bench", C17);
    let broken = write_file(&dir, "broken.bench", &C17.replace("22 = NAND", "22 = AND"));

    verify_cmd(&bench, &broken)
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("not equivalent"));
}

#[test]
fn test_verify_rejects_wrong_key_length() {
    let dir = tempdir().unwrap();
    let (bench, locked) = lock_c17(&dir, 2);

    verify_cmd(&bench, &locked)
        .args(["--key", "111"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key has 3 bit(s)"));
}

#[test]
fn test_verify_rejects_bad_key_string() {
    let dir = tempdir().unwrap();
    let (bench, locked) = lock_c17(&dir, 2);

    verify_cmd(&bench, &locked)
        .args(["--key", "0x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid key character"));
}

#[test]
fn test_lock_parse_error_writes_nothing() {
    let dir = tempdir().unwrap();
    let bench = write_file(&dir, "bad.bench", "INPUT(a)\ny = FOO(a)\n");
    let log = write_file(&dir, "log", "");
    let output = dir.path().join("out.bench");

    xorlock_cmd()
        .arg("lock")
        .arg("--bench")
        .arg(&bench)
        .arg("--log")
        .arg(&log)
        .arg("--keys")
        .arg("1")
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));

    assert!(!output.exists());
}

#[test]
fn test_lock_missing_log() {
    let dir = tempdir().unwrap();
    let bench = write_file(&dir, "c17.bench", C17);
    let output = dir.path().join("out.bench");

    xorlock_cmd()
        .arg("lock")
        .arg("--bench")
        .arg(&bench)
        .arg("--log")
        .arg(dir.path().join("nope"))
        .arg("--keys")
        .arg("1")
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read fault log"));

    assert!(!output.exists());
}

#[test]
fn test_lock_non_utf8_log() {
    let dir = tempdir().unwrap();
    let bench = write_file(&dir, "c17.bench", C17);
    let log = dir.path().join("c17_log");
    fs::write(&log, b"test 1\n  \xff\xfe /0\n  19 /0\n").unwrap();
    let output = dir.path().join("out.bench");

    xorlock_cmd()
        .arg("lock")
        .arg("--bench")
        .arg(&bench)
        .arg("--log")
        .arg(&log)
        .arg("--keys")
        .arg("1")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("19         <- k0"));
}

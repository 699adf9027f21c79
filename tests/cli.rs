//! CLI behavior tests: exit codes, output formats.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sniff_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sniff"))
}

const TEST_SOURCE: &str = r#"
public class AccountTest {
    @Test public void testNoisy() {
        System.out.println("state");
        assertEquals(1, a);
        assertEquals(2, b);
    }
}
"#;

fn fixture_manifest(dir: &TempDir) -> std::path::PathBuf {
    let test_path = dir.path().join("AccountTest.java");
    fs::write(&test_path, TEST_SOURCE).unwrap();
    let manifest = dir.path().join("manifest.txt");
    fs::write(&manifest, format!("{},\n", test_path.display())).unwrap();
    manifest
}

#[test]
fn no_args_returns_error_not_panic() {
    let mut cmd = sniff_cmd();
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("MANIFEST"));
}

#[test]
fn manifest_not_found_exit_2() {
    let mut cmd = sniff_cmd();
    cmd.arg("nonexistent.txt");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn missing_test_file_exit_2() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("manifest.txt");
    fs::write(&manifest, "missing/Test.java,\n").unwrap();
    let mut cmd = sniff_cmd();
    cmd.arg(manifest);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn json_output_valid() {
    let dir = TempDir::new().unwrap();
    let manifest = fixture_manifest(&dir);
    let mut cmd = sniff_cmd();
    cmd.arg(manifest).arg("--json");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(s.trim()).expect("valid JSON");
    assert!(parsed.is_array());
    assert!(s.contains("\"score\""));
    assert!(s.contains("Print Statement"));
}

#[test]
fn out_file_written() {
    let dir = TempDir::new().unwrap();
    let manifest = fixture_manifest(&dir);
    let out = dir.path().join("report.json");
    let mut cmd = sniff_cmd();
    cmd.arg(manifest).arg("--json").arg("--pretty").arg("--out").arg(&out);
    cmd.assert().success();
    let body = fs::read_to_string(&out).unwrap();
    let _: serde_json::Value = serde_json::from_str(&body).expect("valid JSON");
}

#[test]
fn console_output_names_smells() {
    let dir = TempDir::new().unwrap();
    let manifest = fixture_manifest(&dir);
    let mut cmd = sniff_cmd();
    cmd.arg(manifest);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Assertion Roulette"));
}

#[test]
fn thresholds_file_changes_verdict() {
    let dir = TempDir::new().unwrap();
    let manifest = fixture_manifest(&dir);
    let thresholds = dir.path().join("thresholds.json");
    fs::write(&thresholds, r#"{"printStatement": 99, "assertionRoulette": 99}"#).unwrap();
    let mut cmd = sniff_cmd();
    cmd.arg(manifest).arg("--json").arg("--thresholds").arg(&thresholds);
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    assert!(!s.contains("Print Statement"));
    assert!(!s.contains("Assertion Roulette"));
}

//! Integration tests for the `jsson` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, including stdin/stdout piping, file I/O, parser
//! flags and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to a file under tests/fixtures.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Canonical compact form of fixtures/sample.json.
const SAMPLE_COMPACT: &str = r#"{"name":"Alice","age":30,"height":1.68,"member":true,"nickname":null,"address":{"city":"Portland","zip":"97201"},"scores":[85,92,78]}"#;

fn jsson() -> Command {
    let mut cmd = Command::cargo_bin("jsson").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_valid_stdin() {
    jsson()
        .arg("check")
        .write_stdin(r#"{"a":[1,2,3]}"#)
        .assert()
        .success()
        .stdout("ok\n");
}

#[test]
fn check_valid_file() {
    jsson()
        .args(["check", "-i", fixture("sample.json").as_str()])
        .assert()
        .success()
        .stdout("ok\n");
}

#[test]
fn check_invalid_reports_error_kind() {
    jsson()
        .arg("check")
        .write_stdin("[1,2,]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON in <stdin>"))
        .stderr(predicate::str::contains("Invalid syntax"))
        .stderr(predicate::str::contains("at byte 5"));
}

#[test]
fn check_truncated_input() {
    jsson()
        .arg("check")
        .write_stdin(r#"{"a":"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Premature end of input"));
}

#[test]
fn check_missing_file() {
    jsson()
        .args(["check", "-i", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot open file"));
}

#[test]
fn check_max_depth_flag() {
    jsson()
        .args(["--max-depth", "2", "check"])
        .write_stdin("[[[1]]]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stack overflow"));

    jsson()
        .args(["check", "--max-depth", "3"])
        .write_stdin("[[[1]]]")
        .assert()
        .success();
}

#[test]
fn check_duplicate_keys_allowed_by_default() {
    jsson()
        .args(["check", "-i", fixture("duplicate_keys.json").as_str()])
        .assert()
        .success();
}

#[test]
fn check_reject_duplicates_flag() {
    jsson()
        .args(["--reject-duplicates", "check", "-i", fixture("duplicate_keys.json").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate key"));
}

#[test]
fn check_no_nul_flag() {
    jsson()
        .args(["check", "--no-nul"])
        .write_stdin(r#"["a\u0000"]"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Null character"));

    jsson()
        .args(["check", "--no-nul"])
        .write_stdin(r#"{"k\u0000":1}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Null byte in key"));
}

// ─────────────────────────────────────────────────────────────────────────────
// dump
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dump_file_to_stdout_is_compact() {
    jsson()
        .args(["dump", "-i", fixture("sample.json").as_str()])
        .assert()
        .success()
        .stdout(format!("{SAMPLE_COMPACT}\n"));
}

#[test]
fn dump_stdin_normalizes_numbers_and_escapes() {
    jsson()
        .arg("dump")
        .write_stdin(r#"[ 1E2, "A\/", -0 ]"#)
        .assert()
        .success()
        .stdout("[100.0,\"A/\",-0.0]\n");
}

#[test]
fn dump_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.json");

    jsson()
        .args(["dump", "-i", fixture("sample.json").as_str(), "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout("");

    assert_eq!(std::fs::read_to_string(&out).unwrap(), SAMPLE_COMPACT);
}

#[test]
fn dump_output_is_stable() {
    let first = jsson()
        .args(["dump", "-i", fixture("sample.json").as_str()])
        .output()
        .unwrap();
    jsson()
        .arg("dump")
        .write_stdin(first.stdout.clone())
        .assert()
        .success()
        .stdout(String::from_utf8(first.stdout).unwrap());
}

#[test]
fn dump_invalid_fails() {
    jsson()
        .arg("dump")
        .write_stdin("nul")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Invalid syntax"));
}

// ─────────────────────────────────────────────────────────────────────────────
// stats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_from_file() {
    let input_len = std::fs::read(fixture("sample.json")).unwrap().len();
    jsson()
        .args(["stats", "-i", fixture("sample.json").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Input size:    {input_len} bytes")))
        .stdout(predicate::str::contains(format!(
            "Compact size:  {} bytes",
            SAMPLE_COMPACT.len()
        )))
        .stdout(predicate::str::contains("Max depth:     2"))
        .stdout(predicate::str::contains("Nodes:         13"))
        .stdout(predicate::str::contains("integer:    4"))
        .stdout(predicate::str::contains("string:     3"))
        .stdout(predicate::str::contains("object:     2"));
}

#[test]
fn stats_scalar_has_zero_depth() {
    jsson()
        .arg("stats")
        .write_stdin("42")
        .assert()
        .success()
        .stdout(predicate::str::contains("Max depth:     0"))
        .stdout(predicate::str::contains("Nodes:         1"));
}

// ─────────────────────────────────────────────────────────────────────────────
// pack / unpack
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn pack_string_to_hex() {
    jsson()
        .arg("pack")
        .write_stdin(r#""example""#)
        .assert()
        .success()
        .stdout("73000000076578616d706c65\n");
}

#[test]
fn pack_scalars_under_natural_tag() {
    for (input, hex) in [
        ("42", "69000000000000002a\n"),
        ("1.5", "643ff8000000000000\n"),
        ("true", "6201\n"),
        ("null", "4e\n"),
    ] {
        jsson()
            .arg("pack")
            .write_stdin(input)
            .assert()
            .success()
            .stdout(hex);
    }
}

#[test]
fn pack_with_matching_type() {
    jsson()
        .args(["pack", "--type", "integer"])
        .write_stdin("-1")
        .assert()
        .success()
        .stdout("69ffffffffffffffff\n");
}

#[test]
fn pack_with_mismatched_type_fails() {
    jsson()
        .args(["pack", "-t", "real"])
        .write_stdin("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn pack_container_fails() {
    jsson()
        .arg("pack")
        .write_stdin("[1]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only scalar values can be packed"));
}

#[test]
fn unpack_hex_units() {
    jsson()
        .arg("unpack")
        .write_stdin("69000000000000002a 4e\n6201 73000000026869\n")
        .assert()
        .success()
        .stdout("42\nnull\ntrue\n\"hi\"\n");
}

#[test]
fn unpack_error_unit() {
    jsson()
        .arg("unpack")
        .write_stdin("4500000013")
        .assert()
        .success()
        .stdout("{\"error\":19,\"message\":\"Unknown error\"}\n");
}

#[test]
fn pack_then_unpack_via_files() {
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("unit.hex");
    let unpacked = dir.path().join("unit.json");

    jsson()
        .args(["pack", "-i", fixture("sample.json").as_str()])
        .assert()
        .failure();

    std::fs::write(dir.path().join("scalar.json"), r#""café""#).unwrap();
    jsson()
        .args([
            "pack",
            "-i",
            dir.path().join("scalar.json").to_str().unwrap(),
            "-o",
            packed.to_str().unwrap(),
        ])
        .assert()
        .success();
    jsson()
        .args([
            "unpack",
            "-i",
            packed.to_str().unwrap(),
            "-o",
            unpacked.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&unpacked).unwrap(), "\"café\"\n");
}

#[test]
fn unpack_truncated_unit_fails() {
    jsson()
        .arg("unpack")
        .write_stdin("690000")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Premature end of input"));
}

#[test]
fn unpack_unknown_tag_fails() {
    jsson()
        .arg("unpack")
        .write_stdin("4e7a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to unpack unit at byte 1"))
        .stderr(predicate::str::contains("Unknown error"));
}

#[test]
fn unpack_rejects_bad_hex() {
    jsson()
        .arg("unpack")
        .write_stdin("zz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is not valid hex"));
}

// ─────────────────────────────────────────────────────────────────────────────
// utf8
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn utf8_valid_input() {
    jsson()
        .arg("utf8")
        .write_stdin("a€😀")
        .assert()
        .success()
        .stdout("valid UTF-8: 8 bytes, 3 code points\n");
}

#[test]
fn utf8_invalid_input_reports_offset() {
    jsson()
        .arg("utf8")
        .write_stdin(&b"ok\xC0\xAF"[..])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid UTF-8 at byte 2"));
}

// ─────────────────────────────────────────────────────────────────────────────
// General
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    jsson()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("unpack"))
        .stdout(predicate::str::contains("utf8"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    jsson().assert().failure().code(2);
}

#[test]
fn verbose_logs_to_stderr_only() {
    jsson()
        .args(["-v", "check"])
        .write_stdin("true")
        .assert()
        .success()
        .stdout("ok\n")
        .stderr(predicate::str::contains("parser configured"));
}

// uart-echo - USART Echo Firmware
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[allow(deprecated)]
fn uart_echo() -> Command {
    Command::cargo_bin("uart-echo").unwrap()
}

#[test]
fn test_single_byte_echoed() {
    uart_echo()
        .arg("--stdio")
        .write_stdin(vec![0x41])
        .assert()
        .success()
        .stdout(predicate::eq(&[0x41][..]));
}

#[test]
fn test_binary_sequence_echoed_in_order() {
    let input: Vec<u8> = (0..=u8::MAX).rev().chain(0..=u8::MAX).collect();
    uart_echo()
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout(input);
}

#[test]
fn test_no_input_no_output() {
    uart_echo()
        .write_stdin(Vec::<u8>::new())
        .assert()
        .success()
        .stdout(predicate::eq(&b""[..]));
}

#[test]
fn test_banner_and_byte_limit() {
    uart_echo()
        .args(["--banner", "READY\n", "--max-bytes", "3"])
        .write_stdin("abcdef")
        .assert()
        .success()
        .stdout(predicate::eq(&b"READY\nabc"[..]));
}

#[test]
fn test_logs_stay_off_stdout_with_trace() {
    uart_echo()
        .arg("--trace")
        .write_stdin("xyz")
        .assert()
        .success()
        .stdout(predicate::eq(&b"xyz"[..]))
        .stderr(predicate::str::contains("session finished"));
}

#[test]
fn test_config_error_exit_code() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = dir.path().join("echo.yaml");
    fs::write(&config, "schema_version: \"9.9\"\n")?;

    uart_echo()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stdout(predicate::eq(&b""[..]));
    Ok(())
}

#[test]
fn test_missing_config_file_exit_code() {
    uart_echo()
        .args(["--config", "/nonexistent/echo.yaml"])
        .assert()
        .code(2);
}

#[test]
fn test_report_written() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = dir.path().join("echo.yaml");
    let report = dir.path().join("report.json");
    fs::write(
        &config,
        "name: \"bench\"\ntransport:\n  kind: stdio\nlimits:\n  max_bytes: 2\n",
    )?;

    uart_echo()
        .arg("--config")
        .arg(&config)
        .arg("--report")
        .arg(&report)
        .write_stdin("hello")
        .assert()
        .success()
        .stdout(predicate::eq(&b"he"[..]));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report)?)?;
    assert_eq!(json["name"], "bench");
    assert_eq!(json["status"], "finished");
    assert_eq!(json["totals"]["bytes_echoed"], 2);
    assert_eq!(json["sessions"][0]["peer"], "stdio");
    assert_eq!(json["sessions"][0]["stop_reason"], "max_bytes");
    Ok(())
}

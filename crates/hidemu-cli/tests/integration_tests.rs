//! Integration tests for the hidemu CLI
//!
//! Most tests run with --dry-run and check the hex reports printed on stdout.
//! Gadget tests point --gadget-dir at a temporary directory of plain files.

use assert_cmd::Command;
use insta::assert_snapshot;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn hidemu() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("hidemu")?;
    cmd.env_remove("HIDEMU_CONFIG")
        .env_remove("HIDEMU_GADGET_DIR")
        .env_remove("HIDEMU_LAYOUT")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

fn dry_run(args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let output = hidemu()?.arg("--dry-run").args(args).output()?;
    assert!(output.status.success(), "hidemu {args:?} failed: {output:?}");
    Ok(String::from_utf8(output.stdout)?.trim_end().to_string())
}

#[test]
fn test_cli_help() -> TestResult {
    hidemu()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USB HID device emulation"));
    Ok(())
}

#[test]
fn test_cli_version() -> TestResult {
    hidemu()?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hidemu"));
    Ok(())
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

#[test]
fn test_type_shifted_letter() -> TestResult {
    assert_snapshot!(dry_run(&["type", "A"])?, @r"
    keyboard: 00 00 00 00 00 00 00 00
    keyboard: 02 00 00 00 00 00 00 00
    keyboard: 02 00 04 00 00 00 00 00
    keyboard: 00 00 00 00 00 00 00 00
    ");
    Ok(())
}

#[test]
fn test_type_french_dead_key() -> TestResult {
    assert_snapshot!(dry_run(&["type", "--layout", "fr", "ê"])?, @r"
    keyboard: 00 00 00 00 00 00 00 00
    keyboard: 00 00 2f 00 00 00 00 00
    keyboard: 00 00 00 00 00 00 00 00
    keyboard: 00 00 08 00 00 00 00 00
    keyboard: 00 00 00 00 00 00 00 00
    ");
    Ok(())
}

#[test]
fn test_type_newline_ends_with_enter() -> TestResult {
    let stdout = dry_run(&["type", "--newline", "a"])?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3], "keyboard: 00 00 28 00 00 00 00 00");
    Ok(())
}

#[test]
fn test_type_unsupported_character_exit_code() -> TestResult {
    hidemu()?
        .args(["--dry-run", "type", "snow☃man"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No keycode available for character '☃'"));
    Ok(())
}

#[test]
fn test_type_unknown_layout_exit_code() -> TestResult {
    hidemu()?
        .args(["--dry-run", "type", "--layout", "klingon", "a"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown keyboard layout 'klingon'"));
    Ok(())
}

#[test]
fn test_key_chord() -> TestResult {
    assert_snapshot!(dry_run(&["key", "left-control", "c"])?, @r"
    keyboard: 00 00 00 00 00 00 00 00
    keyboard: 01 00 06 00 00 00 00 00
    keyboard: 00 00 00 00 00 00 00 00
    ");
    Ok(())
}

#[test]
fn test_key_unknown_name_exit_code() -> TestResult {
    hidemu()?
        .args(["--dry-run", "key", "hyper"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown key name 'hyper'"));
    Ok(())
}

#[test]
fn test_keycodes_human() -> TestResult {
    hidemu()?
        .args(["keycodes", "A"])
        .assert()
        .success()
        .stdout("LEFT_SHIFT + A\n");
    hidemu()?
        .args(["keycodes", "--layout", "fr", "Ë"])
        .assert()
        .success()
        .stdout("LEFT_SHIFT + LEFT_BRACKET\nLEFT_SHIFT + E\n");
    Ok(())
}

#[test]
fn test_keycodes_json() -> TestResult {
    let output = hidemu()?
        .args(["keycodes", "--layout", "fr", "@", "--json"])
        .output()?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["success"], true);
    assert_eq!(json["layout"], "fr");
    assert_eq!(json["chords"][0]["names"], serde_json::json!(["RIGHT_ALT", "ZERO"]));
    assert_eq!(json["chords"][0]["codes"], serde_json::json!([0xE6, 0x27]));
    Ok(())
}

#[test]
fn test_keycodes_rejects_more_than_one_character() -> TestResult {
    hidemu()?
        .args(["keycodes", "ab"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("expected exactly one character"));
    Ok(())
}

// ---------------------------------------------------------------------------
// Mouse and consumer control
// ---------------------------------------------------------------------------

#[test]
fn test_mouse_move_is_split() -> TestResult {
    assert_snapshot!(dry_run(&["mouse", "move", "300", "-5"])?, @r"
    mouse: 00 00 00 00
    mouse: 00 7f fb 00
    mouse: 00 7f 00 00
    mouse: 00 2e 00 00
    ");
    Ok(())
}

#[test]
fn test_mouse_eased_move_reaches_target() -> TestResult {
    let stdout = dry_run(&[
        "mouse",
        "move",
        "100",
        "0",
        "--duration-ms",
        "30",
        "--easing",
        "ease-in-out",
    ])?;
    let total: i32 = stdout
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().nth(2))
        .filter_map(|hex| u8::from_str_radix(hex, 16).ok())
        .map(|b| i32::from(i8::from_le_bytes([b])))
        .sum();
    assert_eq!(total, 100);
    Ok(())
}

#[test]
fn test_mouse_bad_easing_exit_code() -> TestResult {
    hidemu()?
        .args(["--dry-run", "mouse", "move", "1", "1", "--duration-ms", "10", "--easing", "wobbly"])
        .assert()
        .code(4);
    Ok(())
}

#[test]
fn test_mouse_click_right() -> TestResult {
    assert_snapshot!(dry_run(&["mouse", "click", "right"])?, @r"
    mouse: 00 00 00 00
    mouse: 02 00 00 00
    mouse: 00 00 00 00
    ");
    Ok(())
}

#[test]
fn test_consumer_by_name_and_code() -> TestResult {
    assert_snapshot!(dry_run(&["consumer", "play-pause"])?, @r"
    consumer: 00 00
    consumer: cd 00
    consumer: 00 00
    ");
    let stdout = dry_run(&["consumer", "0x00e2"])?;
    assert!(stdout.contains("consumer: e2 00"));
    Ok(())
}

// ---------------------------------------------------------------------------
// Gadget nodes and configuration
// ---------------------------------------------------------------------------

#[test]
fn test_missing_gadget_node_exit_code() -> TestResult {
    let dir = TempDir::new()?;
    hidemu()?
        .arg("--gadget-dir")
        .arg(dir.path())
        .args(["type", "a"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Could not find matching HID device"));
    Ok(())
}

#[test]
fn test_gadget_node_receives_reports() -> TestResult {
    let dir = TempDir::new()?;
    let node = dir.path().join("kbd");
    fs::write(&node, b"")?;

    hidemu()?
        .arg("--gadget-dir")
        .arg(dir.path())
        .args(["--keyboard-node", "kbd", "type", "b"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read(&node)?;
    assert_eq!(written.len(), 24);
    assert_eq!(&written[8..16], &[0, 0, 0x05, 0, 0, 0, 0, 0]);
    Ok(())
}

#[test]
fn test_config_file_selects_layout() -> TestResult {
    let dir = TempDir::new()?;
    let config = dir.path().join("hidemu.json");
    fs::write(&config, r#"{ "layout": "fr" }"#)?;

    let output = hidemu()?
        .arg("--config")
        .arg(&config)
        .args(["--dry-run", "type", "a"])
        .output()?;
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("keyboard: 00 00 14 00 00 00 00 00"));
    Ok(())
}

#[test]
fn test_env_layout_applies() -> TestResult {
    let output = hidemu()?
        .env("HIDEMU_LAYOUT", "us-dvorak")
        .args(["--dry-run", "type", "s"])
        .output()?;
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("keyboard: 00 00 33 00 00 00 00 00"));
    Ok(())
}

#[test]
fn test_invalid_config_exit_code() -> TestResult {
    let dir = TempDir::new()?;
    let config = dir.path().join("broken.json");
    fs::write(&config, "{ not json")?;

    hidemu()?
        .arg("--config")
        .arg(&config)
        .args(["--dry-run", "type", "a"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}

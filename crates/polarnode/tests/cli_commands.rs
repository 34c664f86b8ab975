#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

const V1_FRAME: &str = "AB 2A 00 EB FF 01 00 50 04 C0";
const V3_FRAME: &str = "AB 07 00 60 4D 01 00 5A 00 3B 55";
const V3_FRAME_NO_BATTERY: &str = "AB 08 00 60 4D 00 01 00 8F 22";

fn polarnode(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_polarnode"))
        .env_remove("POLARNODE_PROTOCOL")
        .args(args)
        .output()
        .expect("polarnode binary should run")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("stdout should be json")
}

fn unique_temp_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "polarnode-{tag}-{}-{}.hex",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ))
}

#[test]
fn decode_v1_frame_as_json() {
    let output = polarnode(&["--protocol", "v1", "--format", "json", "decode", V1_FRAME]);
    assert!(output.status.success(), "{output:?}");

    let json = json_stdout(&output);
    assert_eq!(json["protocol"], "v1");
    assert_eq!(json["id"], 42);
    assert_eq!(json["temperature"], -21.0);
    assert_eq!(json["fan_on"], true);
    assert_eq!(json["heater_on"], false);
    assert_eq!(json["battery"], 80);
    assert_eq!(json["status_label"], "Too hot");
}

#[test]
fn decode_v3_optional_battery() {
    let output = polarnode(&["--format", "json", "decode", V3_FRAME]);
    assert!(output.status.success(), "{output:?}");
    let json = json_stdout(&output);
    assert_eq!(json["temperature"], 21.5);
    assert_eq!(json["battery"], 90);

    let output = polarnode(&["--format", "json", "decode", V3_FRAME_NO_BATTERY]);
    assert!(output.status.success(), "{output:?}");
    let json = json_stdout(&output);
    assert!(json["battery"].is_null());
    assert_eq!(json["heater_on"], true);
}

#[test]
fn protocol_env_selects_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_polarnode"))
        .env("POLARNODE_PROTOCOL", "v1")
        .args(["--format", "json", "decode", V1_FRAME])
        .output()
        .expect("polarnode binary should run");
    assert!(output.status.success(), "{output:?}");
}

#[test]
fn rejected_message_exits_data_invalid() {
    // Valid V1 message under the default V3 checksum.
    let output = polarnode(&["--format", "json", "decode", V1_FRAME]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("integrity error"), "{stderr}");

    let output = polarnode(&["decode", "AB 2A"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn invalid_hex_argument_is_usage_error() {
    let output = polarnode(&["decode", "not hex"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn encode_fan_on_v1() {
    let output = polarnode(&["--protocol", "v1", "--format", "json", "encode", "fan", "on"]);
    assert!(output.status.success(), "{output:?}");

    let json = json_stdout(&output);
    assert_eq!(json["hex"], "BA 01 01 BA");
    assert_eq!(json["command"], "toggle-fan");
}

#[test]
fn encode_then_inspect_command() {
    let output = polarnode(&["--format", "json", "encode", "heater", "1"]);
    assert!(output.status.success(), "{output:?}");
    let hex = json_stdout(&output)["hex"]
        .as_str()
        .expect("hex should be a string")
        .to_string();

    let output = polarnode(&["--format", "json", "inspect-command", &hex]);
    assert!(output.status.success(), "{output:?}");
    let json = json_stdout(&output);
    assert_eq!(json["command_type"], 2);
    assert_eq!(json["value"], 1);
}

#[test]
fn raw_format_writes_wire_bytes() {
    let output = polarnode(&["--protocol", "v1", "--format", "raw", "encode", "fan", "off"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(output.stdout, vec![0xBA, 0x01, 0x00, 0xBB]);
}

#[test]
fn status_labels() {
    let output = polarnode(&["--format", "json", "status", "3"]);
    assert!(output.status.success(), "{output:?}");
    let json = json_stdout(&output);
    assert_eq!(json["label"], "Unknown error");
    assert_eq!(json["known"], false);
}

#[test]
fn checksum_check_value() {
    // "123456789"
    let output = polarnode(&["--format", "json", "checksum", "313233343536373839"]);
    assert!(output.status.success(), "{output:?}");
    let json = json_stdout(&output);
    assert_eq!(json["algorithm"], "crc16");
    assert_eq!(json["trailer"], "29 B1");
}

#[test]
fn mock_capture_feeds_watch() {
    let output = polarnode(&[
        "mock",
        "--id",
        "12",
        "--temperature",
        "-3.5",
        "--fan",
        "--battery",
        "70",
        "--capture",
    ]);
    assert!(output.status.success(), "{output:?}");

    let path = unique_temp_file("mock");
    std::fs::write(&path, &output.stdout).expect("capture should be writable");

    let output = polarnode(&["--format", "json", "watch", path.to_str().expect("utf-8 path")]);
    let _ = std::fs::remove_file(&path);
    assert!(output.status.success(), "{output:?}");

    let json = json_stdout(&output);
    assert_eq!(json["id"], 12);
    assert_eq!(json["temperature"], -3.5);
    assert_eq!(json["battery"], 70);
    assert_eq!(json["line"], 2);
}

#[test]
fn watch_drops_rejects_and_strict_fails() {
    let path = unique_temp_file("watch");
    std::fs::write(
        &path,
        format!("# capture\n{V3_FRAME}\n{V1_FRAME}\nzz\n{V3_FRAME_NO_BATTERY}\n"),
    )
    .expect("capture should be writable");
    let file = path.to_str().expect("utf-8 path");

    let output = polarnode(&["--format", "json", "watch", file]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<u64> = stdout
        .lines()
        .map(|line| {
            serde_json::from_str::<serde_json::Value>(line).expect("line should be json")["id"]
                .as_u64()
                .expect("id should be a number")
        })
        .collect();
    assert_eq!(ids, vec![7, 8]);

    let output = polarnode(&["--format", "json", "watch", "--strict", file]);
    let _ = std::fs::remove_file(&path);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn watch_missing_file_fails() {
    let output = polarnode(&["watch", "/nonexistent/polarnode-capture.hex"]);
    assert_eq!(output.status.code(), Some(1));
}

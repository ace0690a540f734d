use faultview_core::snapshot::ExceptionSnapshot;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_file(prefix: &str, ext: &str, contents: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push("faultview-tests");
    let _ = std::fs::create_dir_all(&dir);

    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = dir.join(format!("{}-{}.{}", prefix, nonce, ext));
    std::fs::write(&path, contents).expect("Failed to write temp file");
    path
}

fn test_snapshot_json() -> String {
    let mut snapshot = ExceptionSnapshot {
        thread_id: 5,
        pc: 0x8000_0404,
        sr: 0x2400_5503,
        badvaddr: 0xDEAD_BEEF,
        cause: 8 << 2,
        fpcsr: (1 << 17) | (1 << 14),
        ..Default::default()
    };
    snapshot.gpr[faultview_core::snapshot::REG_SP] = 0x8000_0800;
    serde_json::to_string(&snapshot).unwrap()
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_faultview"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Faultview crash display"));
}

#[test]
fn test_cli_missing_snapshot_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_faultview"))
        .arg("-s")
        .arg("non_existent_snapshot.json")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_cli_renders_context_page() {
    let snapshot = write_temp_file("snapshot", "json", &test_snapshot_json());

    let output = Command::new(env!("CARGO_BIN_EXE_faultview"))
        .args(["--snapshot", snapshot.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("CONTEXT"));
    assert!(stdout.contains("CAUSE: Failed assert (syscall)"));
    assert!(stdout.contains("THREAD: 5 (game loop)"));
    assert!(stdout.contains("FPCSR:"));
    assert!(stdout.contains("(Unimplemented operation)"));
    assert!(stdout.contains("VA:"));
    assert!(stdout.contains("DEADBEEF"));
}

#[test]
fn test_cli_page_switch_input() {
    let snapshot = write_temp_file("snapshot-switch", "json", &test_snapshot_json());

    let output = Command::new(env!("CARGO_BIN_EXE_faultview"))
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--frames",
            "2",
            "--input",
            ",r",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("SP: 80000800"));
    // The stack pointer lands in zero-filled RDRAM, so words are readable.
    assert!(stdout.contains("80000800: 00000000"));
}

#[test]
fn test_cli_cycles_float_format() {
    let snapshot = write_temp_file("snapshot-floats", "json", &test_snapshot_json());

    let output = Command::new(env!("CARGO_BIN_EXE_faultview"))
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--frames",
            "2",
            "--input",
            "b,b",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // First press lands on scientific, second on hex.
    assert!(stdout.contains("0.000e0"));
    assert!(stdout.contains("F00: 00000000"));
}

#[test]
fn test_cli_rejects_unknown_button() {
    let snapshot = write_temp_file("snapshot-badinput", "json", &test_snapshot_json());

    let output = Command::new(env!("CARGO_BIN_EXE_faultview"))
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--input",
            "q",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_cli_with_memory_layout() {
    let snapshot = write_temp_file("snapshot-layout", "json", &test_snapshot_json());
    let layout = write_temp_file(
        "layout",
        "yaml",
        r#"
name: "console"
regions:
  - name: "rdram"
    base: 0x80000000
    size: "4MiB"
"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_faultview"))
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--layout",
            layout.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("CAUSE: Failed assert (syscall)"));
}

#[test]
fn test_cli_rejects_bad_layout() {
    let snapshot = write_temp_file("snapshot-badlayout", "json", &test_snapshot_json());
    let layout = write_temp_file(
        "layout-bad",
        "yaml",
        r#"
name: "empty"
regions: []
"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_faultview"))
        .args([
            "--snapshot",
            snapshot.to_str().unwrap(),
            "--layout",
            layout.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

//! E2E Test Suite 03: CLI integration
//!
//! Tests the `bpack` binary as a black-box CLI tool using
//! std::process::Command.  Covers compress/decompress dispatch for both
//! schemes, test mode, list mode, overwrite refusal, corrupt-file handling,
//! and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `bpack` binary produced by Cargo.
fn bpack_bin() -> PathBuf {
    // CARGO_BIN_EXE_bpack is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_bpack") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("bpack");
    p
}

/// Create a TempDir containing a text file with ~4 KB of content.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "Hello, bpack!\n".repeat(300);
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

// ── 1. Compress / decompress roundtrip (default LZ scheme) ───────────────────

#[test]
fn test_cli_roundtrip_lz() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let compressed = dir.path().join("output.bpk");
    let roundtrip = dir.path().join("roundtrip.txt");

    let status = Command::new(bpack_bin())
        .args([input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .expect("failed to run bpack compress");
    assert!(status.success(), "compress step should exit 0");
    assert!(compressed.exists());
    assert!(
        fs::metadata(&compressed).unwrap().len() < original.len() as u64,
        "repetitive text should shrink even with the container header"
    );

    let status = Command::new(bpack_bin())
        .args([
            "-d",
            compressed.to_str().unwrap(),
            roundtrip.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run bpack decompress");
    assert!(status.success(), "decompress step should exit 0");
    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

// ── 2. RLE scheme roundtrip ──────────────────────────────────────────────────

#[test]
fn test_cli_roundtrip_rle() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("runs.bin");
    let mut original = vec![0u8; 2000];
    original[500..900].fill(0xAB);
    fs::write(&input, &original).unwrap();

    let compressed = dir.path().join("runs.bin.bpk");
    let roundtrip = dir.path().join("runs.out");

    let status = Command::new(bpack_bin())
        .args(["--rle", input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(bpack_bin())
        .args([
            "-d",
            compressed.to_str().unwrap(),
            roundtrip.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

// ── 3. Automatic output name resolution ──────────────────────────────────────

#[test]
fn test_cli_default_output_names() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    // Compress without an explicit output: INPUT.bpk is created.
    let status = Command::new(bpack_bin())
        .arg(input.to_str().unwrap())
        .status()
        .unwrap();
    assert!(status.success());
    let compressed = dir.path().join("input.txt.bpk");
    assert!(compressed.exists());

    // Decompressing it back would collide with the original; -f overwrites.
    let status = Command::new(bpack_bin())
        .args(["-df", compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 4. Test mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_test_mode() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("t.bpk");

    let status = Command::new(bpack_bin())
        .args([input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(bpack_bin())
        .args(["-t", compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success(), "-t on a valid archive should exit 0");
}

// ── 5. List mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_list_mode() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("l.bpk");

    let status = Command::new(bpack_bin())
        .args([input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let output = Command::new(bpack_bin())
        .args(["-l", compressed.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lz"), "list output should name the scheme");
    assert!(stdout.contains("l.bpk"), "list output should name the file");
}

// ── 6. Corrupt input fails cleanly ───────────────────────────────────────────

#[test]
fn test_cli_corrupt_file_fails() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("c.bpk");

    let status = Command::new(bpack_bin())
        .args([input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    // Flip a payload byte; either token replay or the checksum must catch it.
    let mut bytes = fs::read(&compressed).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&compressed, &bytes).unwrap();

    let status = Command::new(bpack_bin())
        .args(["-t", compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(!status.success(), "-t on a corrupt archive should exit non-zero");
}

#[test]
fn test_cli_not_an_archive_fails() {
    let (dir, input) = make_temp_input();
    let out = dir.path().join("never_written.txt");
    let status = Command::new(bpack_bin())
        .args(["-d", input.to_str().unwrap(), out.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(!status.success(), "plain text is not a valid container");
    assert!(!out.exists());
}

// ── 7. Overwrite refusal ─────────────────────────────────────────────────────

#[test]
fn test_cli_refuses_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("exists.bpk");
    fs::write(&compressed, b"occupied").unwrap();

    let status = Command::new(bpack_bin())
        .args([input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(!status.success(), "existing destination without -f should fail");
    assert_eq!(fs::read(&compressed).unwrap(), b"occupied");

    let status = Command::new(bpack_bin())
        .args(["-f", input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success(), "-f should allow the overwrite");
}

// ── 8. Usage errors and flags ────────────────────────────────────────────────

#[test]
fn test_cli_bad_option_exits_nonzero() {
    let output = Command::new(bpack_bin()).arg("--bogus").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad usage"));
}

#[test]
fn test_cli_version_flag() {
    let output = Command::new(bpack_bin()).arg("-V").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bpack"));
}

// Unit tests for the .bpk container format and file operations.

use std::fs;

use bpack::io::{
    compress_file, decompress_file, file_info, parse_header, Scheme, BPK_MAGICNUMBER, HEADER_SIZE,
};
use bpack::xxhash::xxh32_oneshot;
use tempfile::TempDir;

/// Build a header + payload by hand.
fn container(scheme_byte: u8, content_size: u32, payload: &[u8], checksum: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&BPK_MAGICNUMBER.to_le_bytes());
    out.push(scheme_byte);
    out.extend_from_slice(&content_size.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&checksum.to_le_bytes());
    out.extend_from_slice(payload);
    out
}

// ── Header parsing ───────────────────────────────────────────────────────────

#[test]
fn header_size_is_stable() {
    // 4 magic + 1 scheme + 4 content size + 4 compressed size + 4 checksum.
    assert_eq!(HEADER_SIZE, 17);
}

#[test]
fn parse_valid_header() {
    let file = container(1, 10, &[0u8; 4], 0xDEADBEEF);
    let info = parse_header(&file).unwrap();
    assert_eq!(info.scheme, Scheme::Lz);
    assert_eq!(info.content_size, 10);
    assert_eq!(info.compressed_size, 4);
    assert_eq!(info.checksum, 0xDEADBEEF);
    assert!(!info.stored_raw());
}

#[test]
fn parse_rejects_short_file() {
    assert!(parse_header(&[0u8; 5]).is_err());
}

#[test]
fn parse_rejects_bad_magic() {
    let mut file = container(1, 4, &[0u8; 4], 0);
    file[0] ^= 0xFF;
    let err = parse_header(&file).unwrap_err();
    assert!(err.to_string().contains("magic"));
}

#[test]
fn parse_rejects_unknown_scheme() {
    let file = container(9, 4, &[0u8; 4], 0);
    assert!(parse_header(&file).is_err());
}

#[test]
fn parse_rejects_payload_size_mismatch() {
    let mut file = container(2, 100, &[0u8; 4], 0);
    // Claim 5 payload bytes while carrying 4.
    file[9..13].copy_from_slice(&5u32.to_le_bytes());
    assert!(parse_header(&file).is_err());
}

#[test]
fn parse_rejects_expansion() {
    // compressed_size > content_size cannot come from these encoders.
    let file = container(1, 2, &[0u8; 4], 0);
    assert!(parse_header(&file).is_err());
}

// ── File roundtrips ──────────────────────────────────────────────────────────

#[test]
fn compress_decompress_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.bin");
    let packed = dir.path().join("data.bpk");
    let unpacked = dir.path().join("data.out");

    let original = b"abcabcabcabc".repeat(50);
    fs::write(&input, &original).unwrap();

    let res = compress_file(&input, &packed, Scheme::Lz).unwrap();
    assert_eq!(res.bytes_read, original.len() as u64);
    assert_eq!(res.bytes_written, fs::metadata(&packed).unwrap().len());

    let info = file_info(&packed).unwrap();
    assert_eq!(info.scheme, Scheme::Lz);
    assert_eq!(info.content_size as usize, original.len());
    assert_eq!(info.checksum, xxh32_oneshot(&original, 0));
    assert!(!info.stored_raw());

    let res = decompress_file(&packed, Some(&unpacked)).unwrap();
    assert_eq!(res.bytes_written, original.len() as u64);
    assert_eq!(fs::read(&unpacked).unwrap(), original);
}

#[test]
fn empty_file_roundtrip_is_stored_raw() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty");
    let packed = dir.path().join("empty.bpk");
    let unpacked = dir.path().join("empty.out");
    fs::write(&input, b"").unwrap();

    compress_file(&input, &packed, Scheme::Rle).unwrap();
    assert_eq!(
        fs::metadata(&packed).unwrap().len(),
        HEADER_SIZE as u64,
        "an empty payload is just the header"
    );
    assert!(file_info(&packed).unwrap().stored_raw());

    decompress_file(&packed, Some(&unpacked)).unwrap();
    assert_eq!(fs::read(&unpacked).unwrap(), b"");
}

#[test]
fn checksum_mismatch_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.bin");
    let packed = dir.path().join("data.bpk");
    fs::write(&input, b"xyxyxyxyxyxyxyxyxyxyxyxyxyxyxyxy").unwrap();

    compress_file(&input, &packed, Scheme::Lz).unwrap();

    // Corrupt the stored checksum; the payload still decodes, so only the
    // checksum comparison can catch this.
    let mut bytes = fs::read(&packed).unwrap();
    bytes[13] ^= 0x01;
    fs::write(&packed, &bytes).unwrap();

    let err = decompress_file(&packed, None).unwrap_err();
    assert!(err.to_string().contains("checksum"));
}

#[test]
fn test_mode_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("data.bin");
    let packed = dir.path().join("data.bpk");
    fs::write(&input, [0x55u8; 512]).unwrap();

    compress_file(&input, &packed, Scheme::Rle).unwrap();
    let res = decompress_file(&packed, None).unwrap();
    assert_eq!(res.bytes_written, 0);
}

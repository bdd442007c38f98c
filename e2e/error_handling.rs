//! E2E Test Suite 02: Decoder Error Handling
//!
//! The decoders are the untrusted-input boundary: arbitrary bytes handed to
//! them must produce `Err(DecompressError::MalformedInput)` — never a panic,
//! never an out-of-bounds access, never silently wrong output.
//!
//! Every buffer below is sized so that the compressed and decompressed
//! lengths differ; equal lengths select the stored-raw copy path, which
//! accepts any payload by design.

use bpack::{decompress_lz, decompress_rle, DecompressError};

// ── LZ decoder ───────────────────────────────────────────────────────────────

#[test]
fn lz_truncated_token_header() {
    // One byte cannot hold a 2-byte token header.
    let mut out = [0u8; 3];
    assert_eq!(
        decompress_lz(&[5], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

#[test]
fn lz_literal_run_overruns_input() {
    // Token announces 3 literals, stream carries only 1.
    let mut out = [0u8; 5];
    assert_eq!(
        decompress_lz(&[3, 0, 1], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

#[test]
fn lz_backref_before_start_of_output() {
    // Distance 5 with no output produced yet.
    let mut out = [0u8; 4];
    assert_eq!(
        decompress_lz(&[2, 5], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

#[test]
fn lz_literal_run_overruns_output() {
    let mut out = [0u8; 3];
    assert_eq!(
        decompress_lz(&[4, 0, 1, 2, 3, 4], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

#[test]
fn lz_backref_overruns_output() {
    // 1 literal, then a 200-byte back-reference into a 4-byte output.
    let mut out = [0u8; 4];
    assert_eq!(
        decompress_lz(&[1, 0, 9, 200, 1], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

#[test]
fn lz_output_cursor_short_of_end() {
    // A valid 1-literal stream that fills only 1 of 5 output bytes.
    let mut out = [0u8; 5];
    assert_eq!(
        decompress_lz(&[1, 0, 7], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

// ── RLE decoder ──────────────────────────────────────────────────────────────

#[test]
fn rle_truncated_record() {
    // A literal-count byte with no room for the mandatory run fields.
    let mut out = [0u8; 2];
    assert_eq!(
        decompress_rle(&[0], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

#[test]
fn rle_literal_run_overruns_input() {
    let mut out = [0u8; 9];
    assert_eq!(
        decompress_rle(&[5, 1, 2], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

#[test]
fn rle_run_overruns_output() {
    let mut out = [0u8; 5];
    assert_eq!(
        decompress_rle(&[0, 250, 7], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

#[test]
fn rle_output_cursor_short_of_end() {
    let mut out = [0u8; 5];
    assert_eq!(
        decompress_rle(&[0, 2, 7], &mut out),
        Err(DecompressError::MalformedInput)
    );
}

// ── Garbage never panics ─────────────────────────────────────────────────────

fn pseudo_random_bytes(len: usize, mut seed: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        out.push((seed >> 24) as u8);
    }
    out
}

#[test]
fn arbitrary_bytes_never_panic() {
    for seed in 1..200u32 {
        let stream = pseudo_random_bytes((seed % 64) as usize, seed);
        for out_len in [0usize, 1, 16, 64, 300] {
            let mut out = vec![0u8; out_len];
            // Result intentionally ignored; only absence of panics matters.
            let _ = decompress_lz(&stream, &mut out);
            let _ = decompress_rle(&stream, &mut out);
        }
    }
}

//! Block decompression — the LZ and RLE token interpreters.
//!
//! # Security boundary
//!
//! This module is the untrusted-input path.  The encoders only ever produce
//! well-formed streams, but nothing stops a caller from handing these
//! functions arbitrary bytes, so every read and write is bounds-checked and
//! every violation returns [`DecompressError::MalformedInput`].  Malformed
//! or truncated input must never panic.
//!
//! Dispatch: the stream carries no format tag.  The caller persists both
//! the compressed and the decompressed size, and equality of the two is the
//! stored-raw sentinel — the payload is a verbatim copy and no tokens are
//! replayed.  The encoders guarantee the sentinel is truthful.

use super::types::store_raw;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by block decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressError {
    /// The compressed data is malformed or truncated, or the sizes supplied
    /// by the caller are inconsistent with the stream: a token overran the
    /// input, a back-reference reached before the start of the output, or
    /// the cursors did not land exactly on both buffer ends.
    MalformedInput,
}

#[inline(always)]
fn malformed<T>() -> Result<T, DecompressError> {
    Err(DecompressError::MalformedInput)
}

// ─────────────────────────────────────────────────────────────────────────────
// LZ decoder
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress an LZ stream.
///
/// `src` is the full compressed buffer; `dst` must be exactly the original
/// (decompressed) size.  When the two lengths are equal the payload is a
/// stored-raw copy and is reproduced verbatim.
///
/// Back-reference copies proceed byte by byte, in order, so a `distance`
/// smaller than `count` reads bytes the same copy has just written and
/// expands into a repeating pattern.
pub fn decompress_lz(src: &[u8], dst: &mut [u8]) -> Result<(), DecompressError> {
    if src.len() == dst.len() {
        store_raw(src, dst);
        return Ok(());
    }

    let mut ip = 0usize;
    let mut op = 0usize;

    while ip < src.len() {
        if ip + 2 > src.len() {
            return malformed();
        }
        let count = src[ip] as usize;
        let distance = src[ip + 1] as usize;
        ip += 2;

        if distance != 0 {
            if distance > op || op + count > dst.len() {
                return malformed();
            }
            for i in 0..count {
                dst[op + i] = dst[op - distance + i];
            }
            op += count;
        } else {
            if ip + count > src.len() || op + count > dst.len() {
                return malformed();
            }
            dst[op..op + count].copy_from_slice(&src[ip..ip + count]);
            ip += count;
            op += count;
        }
    }

    // Both cursors must land exactly on their buffer ends; anything else
    // means the stream and the caller-supplied sizes disagree.
    if ip != src.len() || op != dst.len() {
        return malformed();
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// RLE decoder
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress an RLE stream.
///
/// Same size contract and stored-raw dispatch as [`decompress_lz`].  Each
/// record is a literal-count byte, that many literals, then the mandatory
/// `(run_count, run_value)` pair.
pub fn decompress_rle(src: &[u8], dst: &mut [u8]) -> Result<(), DecompressError> {
    if src.len() == dst.len() {
        store_raw(src, dst);
        return Ok(());
    }

    let mut ip = 0usize;
    let mut op = 0usize;

    while ip < src.len() {
        let literal_count = src[ip] as usize;
        ip += 1;

        if ip + literal_count + 2 > src.len() || op + literal_count > dst.len() {
            return malformed();
        }
        dst[op..op + literal_count].copy_from_slice(&src[ip..ip + literal_count]);
        ip += literal_count;
        op += literal_count;

        let run_count = src[ip] as usize;
        let run_value = src[ip + 1];
        ip += 2;

        if op + run_count > dst.len() {
            return malformed();
        }
        dst[op..op + run_count].fill(run_value);
        op += run_count;
    }

    if ip != src.len() || op != dst.len() {
        return malformed();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lz_replays_overlapping_backref() {
        // Literal "AB", then copy 6 bytes from distance 2.
        let stream = [2u8, 0, b'A', b'B', 6, 2];
        let mut out = [0u8; 8];
        decompress_lz(&stream, &mut out).unwrap();
        assert_eq!(&out, b"ABABABAB");
    }

    #[test]
    fn rle_replays_literals_and_run() {
        let stream = [2u8, b'x', b'y', 4, b'z'];
        let mut out = [0u8; 6];
        decompress_rle(&stream, &mut out).unwrap();
        assert_eq!(&out, b"xyzzzz");
    }

    #[test]
    fn equal_sizes_dispatch_to_raw_copy() {
        // [2, 0] would be a valid token header, but equal sizes mean the
        // payload is stored raw and must be copied untouched.
        let stream = [2u8, 0];
        let mut out = [0u8; 2];
        decompress_lz(&stream, &mut out).unwrap();
        assert_eq!(out, [2, 0]);
        let mut out = [9u8; 2];
        decompress_rle(&stream, &mut out).unwrap();
        assert_eq!(out, [2, 0]);
    }
}

//! bpack — greedy byte-buffer block compression.
//!
//! Two codec pairs over caller-owned fixed-size buffers: a dictionary-match
//! scheme ([`compress_lz`] / [`decompress_lz`]) and a run-length scheme
//! ([`compress_rle`] / [`decompress_rle`]), both with a stored-raw fallback
//! guaranteeing the compressed size never exceeds the original.  The
//! [`io`] module adds the `.bpk` single-block container used by the
//! `bpack` binary.

pub mod block;
pub mod cli;
pub mod io;
pub mod xxhash;

// ── Version constants ─────────────────────────────────────────────────────────
pub const BPACK_VERSION_MAJOR: u32 = 0;
pub const BPACK_VERSION_MINOR: u32 = 1;
pub const BPACK_VERSION_RELEASE: u32 = 0;
pub const BPACK_VERSION_NUMBER: u32 =
    BPACK_VERSION_MAJOR * 100 * 100 + BPACK_VERSION_MINOR * 100 + BPACK_VERSION_RELEASE;
pub const BPACK_VERSION_STRING: &str = "0.1.0";

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    BPACK_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    BPACK_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use block::{
    compress_bound, compress_lz, compress_rle, decompress_lz, decompress_rle, DecompressError,
};
pub use io::Scheme;

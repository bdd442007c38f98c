//! Thin wrapper around the `xxhash-rust` crate providing the XXH32 API used
//! by the container format for content checksums.

pub use xxhash_rust::xxh32::Xxh32 as Xxh32State;

/// One-shot XXH32 hash of `data` with the given `seed`.
#[inline]
pub fn xxh32_oneshot(data: &[u8], seed: u32) -> u32 {
    xxhash_rust::xxh32::xxh32(data, seed)
}

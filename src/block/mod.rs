//! Byte-buffer block compression.
//!
//! Two independent codec pairs over caller-owned, fixed-size buffers: a
//! greedy dictionary-match scheme (LZ) and a run-length scheme (RLE), both
//! sharing a stored-raw fallback signalled purely by the compressed size
//! equalling the original size.  No allocation, no streaming, no framing —
//! the caller persists both sizes alongside the payload.

pub mod compress;
pub mod decompress;
pub mod types;

// Re-export the most important public API items at the module level.
pub use compress::{compress_lz, compress_rle};
pub use decompress::{decompress_lz, decompress_rle, DecompressError};
pub use types::{compress_bound, MAX_DISTANCE, MAX_LITERALS, MAX_RUN, TOKEN_SIZE};

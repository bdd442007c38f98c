//! Shared constants and helpers for the block codecs.
//!
//! Both schemes (LZ and RLE) store every count in a single byte, so all the
//! structural bounds of the format are 255: the back-reference window, the
//! longest run a token can describe, and the longest pending-literal batch.
//! The helpers here are allocation-free; the literal scratch space lives on
//! the stack because its capacity is a compile-time constant.

/// Farthest back an LZ match may reach.  The window is the span of
/// already-produced output behind the current position, bounded so the
/// distance always fits the one-byte token field.
pub const MAX_DISTANCE: usize = 255;

/// Longest run a single token can describe.  The match-search comparison
/// loop is capped here explicitly; without the cap an overlapping match
/// could grow past what the one-byte count field can hold.
pub const MAX_RUN: usize = 255;

/// Capacity of the pending-literal scratch buffer.  Reaching it forces a
/// literal-token flush in both encoders.
pub const MAX_LITERALS: usize = 255;

/// Size of a token header: `(count, distance)` for LZ, `(run_count,
/// run_value)` for RLE.  The RLE literal-count prefix is 1 byte and is
/// accounted separately.
pub const TOKEN_SIZE: usize = 2;

/// Minimum profitable match length when no literals are pending.  A match
/// token costs `TOKEN_SIZE` bytes, so a 2-byte match is break-even at best.
pub const MATCH_THRESHOLD: usize = 2;

/// Minimum profitable match length when literals are pending.  Emitting the
/// match forces the pending literal run out first, which costs a second
/// 2-byte header; a short match must be long enough to pay for both.
pub const MATCH_THRESHOLD_PENDING: usize = 4;

/// Worst-case compressed size for `input_size` bytes of input.
///
/// Always equals `input_size`: whenever the tokenized form would be larger
/// (or merely equal), the encoders fall back to storing the payload
/// verbatim.  Callers therefore never need a destination larger than the
/// source.
#[inline]
pub fn compress_bound(input_size: usize) -> usize {
    input_size
}

/// Copy `src` verbatim into the front of `dst` and return the byte count.
///
/// The shared stored-raw escape path: used by both encoders when tokenizing
/// would overflow the destination or yield no savings, and by both decoders
/// when the compressed and decompressed sizes are equal.
#[inline]
pub fn store_raw(src: &[u8], dst: &mut [u8]) -> usize {
    dst[..src.len()].copy_from_slice(src);
    src.len()
}

/// Fixed-capacity scratch buffer for literals awaiting a flush.
///
/// Replaces the classic `u8 literals[255]` + counter pair.  `push` must not
/// be called while full; encoders flush at capacity before buffering more.
pub struct PendingLiterals {
    buf: [u8; MAX_LITERALS],
    len: usize,
}

impl PendingLiterals {
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_LITERALS],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        debug_assert!(self.len < MAX_LITERALS);
        self.buf[self.len] = byte;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == MAX_LITERALS
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for PendingLiterals {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_literals_push_and_drain() {
        let mut lits = PendingLiterals::new();
        assert!(lits.is_empty());
        lits.push(0xAA);
        lits.push(0xBB);
        assert_eq!(lits.len(), 2);
        assert_eq!(lits.as_slice(), &[0xAA, 0xBB]);
        lits.clear();
        assert!(lits.is_empty());
        assert_eq!(lits.as_slice(), &[] as &[u8]);
    }

    #[test]
    fn pending_literals_fills_to_capacity() {
        let mut lits = PendingLiterals::new();
        for i in 0..MAX_LITERALS {
            assert!(!lits.is_full());
            lits.push(i as u8);
        }
        assert!(lits.is_full());
        assert_eq!(lits.len(), MAX_LITERALS);
        assert_eq!(lits.as_slice()[254], 254);
    }

    #[test]
    fn store_raw_copies_prefix() {
        let src = [1u8, 2, 3];
        let mut dst = [0u8; 5];
        assert_eq!(store_raw(&src, &mut dst), 3);
        assert_eq!(dst, [1, 2, 3, 0, 0]);
    }

    #[test]
    fn bound_is_identity() {
        assert_eq!(compress_bound(0), 0);
        assert_eq!(compress_bound(300), 300);
    }
}

//! Block compression — the LZ and RLE encoders.
//!
//! Both encoders share one contract: the caller supplies a destination at
//! least as large as the source, the encoder returns the number of bytes it
//! wrote, and a return value equal to the source size means the payload was
//! stored verbatim.  That size equality is the *only* stored-raw signal —
//! there is no format tag in the stream — so both encoders go out of their
//! way to keep it truthful: any destination overrun and any zero-savings
//! result abandons the tokenized output and falls back to [`store_raw`].
//!
//! Wire formats:
//!
//! - LZ: a sequence of 2-byte `(count, distance)` tokens.  `distance == 0`
//!   introduces a literal run of `count` raw bytes inlined right after the
//!   token; `distance > 0` is a back-reference copying `count` bytes from
//!   `distance` bytes behind the current output position.  `distance` may be
//!   smaller than `count`, which encodes a repeating pattern.
//! - RLE: a sequence of records `(literal_count, literals…, run_count,
//!   run_value)`.  The literal-count byte is always present, even when 0,
//!   because the decoder reads the record unconditionally.  A `run_count` of
//!   0 appears only in the bookkeeping trailer that carries literals still
//!   pending at end of input.
//!
//! The LZ match search is greedy and exhaustive over a 255-byte window, so
//! encoding is `O(size × window)` worst case; RLE encoding is `O(size)`.
//! Neither encoder allocates or keeps state across calls.

use super::types::{
    store_raw, PendingLiterals, MATCH_THRESHOLD, MATCH_THRESHOLD_PENDING, MAX_DISTANCE, MAX_RUN,
    TOKEN_SIZE,
};

// ─────────────────────────────────────────────────────────────────────────────
// LZ encoder
// ─────────────────────────────────────────────────────────────────────────────

/// Find the longest match for `src[pos..]` within the backward window.
///
/// The window is scanned from its oldest position toward `pos`; the best
/// candidate is replaced only on strict improvement, so ties keep the first
/// (farthest) match found.  The forward comparison may run past `pos`
/// itself — a match overlapping its own output is valid and is how runs
/// longer than their distance get encoded — and is capped at [`MAX_RUN`]
/// so the length always fits the one-byte token field.
///
/// Returns `(run, distance)`; `run` is 0 when nothing matched.
fn find_match(src: &[u8], pos: usize) -> (usize, usize) {
    let size = src.len();
    let window = pos.min(MAX_DISTANCE);
    let mut best_run = 0;
    let mut best_distance = 0;

    for start in (pos - window)..pos {
        let mut run = 0;
        while run < MAX_RUN && pos + run < size && src[start + run] == src[pos + run] {
            run += 1;
        }
        if run > best_run {
            best_run = run;
            best_distance = pos - start;
        }
    }

    (best_run, best_distance)
}

/// Compress `src` into `dst` with the greedy windowed LZ scheme.
///
/// Returns the compressed size, which never exceeds `src.len()`.  A return
/// value equal to `src.len()` means the input was stored verbatim (the
/// tokenized form would not have been smaller, or would have overflowed the
/// destination).
///
/// `dst` must be at least `src.len()` bytes; `src` and `dst` must be
/// distinct buffers (guaranteed by the `&`/`&mut` split).
pub fn compress_lz(src: &[u8], dst: &mut [u8]) -> usize {
    debug_assert!(dst.len() >= src.len());
    let size = src.len();
    let mut lits = PendingLiterals::new();
    let mut pos = 0usize;
    let mut out = 0usize;
    let mut stored_raw = false;

    loop {
        let (best_run, best_distance) = find_match(src, pos);

        // A match must amortize its own header, plus the header of the
        // literal flush it forces when literals are pending.
        let threshold = if lits.is_empty() {
            MATCH_THRESHOLD
        } else {
            MATCH_THRESHOLD_PENDING
        };
        let emit_match = best_run > threshold;

        if pos == size || emit_match || lits.is_full() {
            if !lits.is_empty() {
                if out + TOKEN_SIZE + lits.len() > size {
                    stored_raw = true;
                    break;
                }
                dst[out] = lits.len() as u8;
                dst[out + 1] = 0;
                out += TOKEN_SIZE;
                out += store_raw(lits.as_slice(), &mut dst[out..]);
                lits.clear();
            }

            if emit_match {
                debug_assert!(best_run <= MAX_RUN);
                debug_assert!(best_distance <= MAX_DISTANCE);
                if out + TOKEN_SIZE > size {
                    stored_raw = true;
                    break;
                }
                dst[out] = best_run as u8;
                dst[out + 1] = best_distance as u8;
                out += TOKEN_SIZE;
                pos += best_run;
                debug_assert!(pos <= size);
            }

            if pos == size {
                break;
            }
        } else {
            lits.push(src[pos]);
            pos += 1;
        }
    }

    if !stored_raw {
        debug_assert_eq!(pos, size);
        debug_assert!(lits.is_empty());
        debug_assert!(out <= size);
        if out < size {
            return out;
        }
        // Tokenizing saved nothing; storing raw keeps the sentinel truthful.
    }

    store_raw(src, dst)
}

// ─────────────────────────────────────────────────────────────────────────────
// RLE encoder
// ─────────────────────────────────────────────────────────────────────────────

/// Length of the run of bytes equal to `src[pos]` starting at `pos`,
/// capped at [`MAX_RUN`] and at the remaining input.
fn measure_run(src: &[u8], pos: usize) -> usize {
    let size = src.len();
    let mut run = 0;
    while run < MAX_RUN && pos + run < size && src[pos + run] == src[pos] {
        run += 1;
    }
    run
}

/// Compress `src` into `dst` with the run-length scheme.
///
/// Same contract as [`compress_lz`]: the result never exceeds `src.len()`,
/// and a result equal to `src.len()` means the payload was stored verbatim.
pub fn compress_rle(src: &[u8], dst: &mut [u8]) -> usize {
    debug_assert!(dst.len() >= src.len());
    let size = src.len();
    let mut lits = PendingLiterals::new();
    let mut pos = 0usize;
    let mut out = 0usize;
    let mut stored_raw = false;

    loop {
        let run = measure_run(src, pos);

        // A run of exactly 1 is cheaper carried as a literal; anything
        // longer, end of input, or a full literal buffer forces a record.
        if pos == size || run > 1 || lits.is_full() {
            if pos == size && lits.is_empty() {
                // Input ended exactly on a run boundary; no trailer needed.
                break;
            }

            let record = 1 + lits.len() + TOKEN_SIZE;
            if out + record > size {
                stored_raw = true;
                break;
            }

            dst[out] = lits.len() as u8;
            out += 1;
            out += store_raw(lits.as_slice(), &mut dst[out..]);
            lits.clear();

            // The run fields are always present.  `run == 0` happens only
            // in the end-of-input trailer that flushes pending literals.
            dst[out] = run as u8;
            dst[out + 1] = if run > 0 { src[pos] } else { 0 };
            out += TOKEN_SIZE;
            pos += run;

            if pos == size {
                break;
            }
        } else {
            lits.push(src[pos]);
            pos += 1;
        }
    }

    if !stored_raw {
        debug_assert_eq!(pos, size);
        debug_assert!(lits.is_empty());
        debug_assert!(out <= size);
        if out < size {
            return out;
        }
    }

    store_raw(src, dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_match_prefers_first_on_tie() {
        // "abab|ab": both start=0 (distance 4) and start=2 (distance 2)
        // match 2 bytes; the scan starts at the oldest position and only
        // replaces on strict improvement.
        let src = b"ababab";
        let (run, distance) = find_match(src, 4);
        assert_eq!(run, 2);
        assert_eq!(distance, 4);
    }

    #[test]
    fn find_match_overlaps_its_own_output() {
        // At pos 2 the candidate at start 0 keeps matching past pos.
        let src = [0x41u8; 40];
        let (run, distance) = find_match(&src, 2);
        assert_eq!(run, 38);
        assert_eq!(distance, 2);
    }

    #[test]
    fn find_match_run_is_clamped() {
        let src = [7u8; 600];
        let (run, _) = find_match(&src, 1);
        assert_eq!(run, MAX_RUN);
    }

    #[test]
    fn measure_run_caps_at_input_end() {
        assert_eq!(measure_run(&[9, 9, 9], 0), 3);
        assert_eq!(measure_run(&[9, 9, 3], 0), 2);
        assert_eq!(measure_run(&[9, 9, 3], 2), 1);
        assert_eq!(measure_run(&[7u8; 300], 0), MAX_RUN);
        assert_eq!(measure_run(&[], 0), 0);
    }
}

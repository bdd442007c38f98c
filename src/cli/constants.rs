//! Identity constants and display (logging) infrastructure for the CLI.

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity constants ────────────────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "bpack";
pub const BPK_EXTENSION: &str = ".bpk";

// ── Display level global ──────────────────────────────────────────────────────
//
// Crate-level atomic shared by the CLI and the file I/O layer.
// 0 = no output; 1 = errors only; 2 = normal; 3 = progress; 4 = verbose
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}

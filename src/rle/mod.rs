//! Byte-oriented run-length coding.
//!
//! Token layout (no stream header):
//!
//! | first byte    | meaning                                              |
//! |---------------|------------------------------------------------------|
//! | `0x80..=0xFF` | run of `(b & 0x7F) + min_run_length` copies of next byte |
//! | `0x7F`        | escape: the next byte is a single literal            |
//! | `0x01..=0x7E` | literal run: `b + 1` raw bytes follow                |
//! | `0x00`        | a single zero byte                                   |

mod compress;
mod decompress;

pub use compress::{compress, compress_with};
pub use decompress::{decompress, decompress_with};

use crate::fixed::Q8_8;

/// High bit marking a run token.
const RUN_FLAG: u8 = 0x80;

/// Prefix for a lone literal that is not zero.
const ESCAPE: u8 = 0x7F;

/// Largest `run - min_run_length` the 7-bit run field holds.
const MAX_RUN_BIAS: usize = 0x7F;

/// Most bytes a single literal-run token can carry (`0x7E + 1`).
const MAX_LITERAL_RUN: usize = 0x7F;

/// Worst-case compressed size for `len` input bytes under any valid params.
///
/// Every input byte costs at most two output bytes: isolated non-zero
/// literals are escaped, and with `min_run_length = 1` every byte can become
/// its own run token.
#[must_use]
pub const fn max_compressed_len(len: usize) -> usize {
    len.saturating_mul(2)
}

/// Q8.8 ratio of `compressed_size` to `original_size`; `1.0` for empty input.
#[must_use]
pub const fn calculate_ratio(original_size: usize, compressed_size: usize) -> Q8_8 {
    crate::fixed::calculate_ratio(original_size, compressed_size)
}

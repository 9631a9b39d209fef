//! LZSS over a circular window.
//!
//! Stream layout:
//!
//! ```text
//! [original size: u32 LE]
//! repeat: [tag byte] [token] x up to 8
//!   literal token: 1 byte
//!   match token:   [offset bits 11..8 | len - 2] [offset bits 7..0]
//! ```
//!
//! Bit `i` of a tag byte (LSB first) is set when token `i` of its group is a
//! match. The offset is a back-distance from the window cursor, so the decoder
//! must rebuild exactly the window the encoder had.

mod compress;
mod decompress;
mod window;

pub use compress::{compress, compress_with};
pub use decompress::{decompress, decompress_with};

use crate::error::{Error, Result};
use crate::fixed::Q8_8;

/// Length of the little-endian original-size header.
pub const HEADER_LEN: usize = 4;

/// Tokens described by one tag byte.
const TAG_GROUP_SIZE: usize = 8;

/// Smallest length a match token can express (field value 0).
const MATCH_LEN_BIAS: usize = 2;

/// Packs a back-distance (12 bits) and length (`len - 2` in 4 bits).
#[inline]
const fn encode_match(distance: usize, len: usize) -> [u8; 2] {
    debug_assert!(distance < 0x1000);
    debug_assert!(len >= MATCH_LEN_BIAS && len - MATCH_LEN_BIAS < 0x10);
    let hi = (((distance >> 8) as u8) << 4) | (len - MATCH_LEN_BIAS) as u8;
    [hi, distance as u8]
}

/// Unpacks a match token into `(distance, len)`.
#[inline]
const fn decode_match(token: [u8; 2]) -> (usize, usize) {
    let distance = (((token[0] >> 4) as usize) << 8) | token[1] as usize;
    let len = (token[0] & 0x0F) as usize + MATCH_LEN_BIAS;
    (distance, len)
}

/// Reads the original size from the stream header.
///
/// Lets callers size the output buffer before calling [`decompress`].
pub fn read_header(stream: &[u8]) -> Result<usize> {
    match stream.first_chunk::<HEADER_LEN>() {
        Some(header) => Ok(u32::from_le_bytes(*header) as usize),
        None => Err(Error::CorruptStream("missing size header")),
    }
}

/// Worst-case compressed size for `len` input bytes: the header, every byte
/// as a literal, and one tag byte per 8 literals.
#[must_use]
pub const fn max_compressed_len(len: usize) -> usize {
    HEADER_LEN
        .saturating_add(len)
        .saturating_add(len.div_ceil(TAG_GROUP_SIZE))
}

/// Q8.8 ratio of `compressed_size` to `original_size`; `1.0` for empty input.
#[must_use]
pub const fn calculate_ratio(original_size: usize, compressed_size: usize) -> Q8_8 {
    crate::fixed::calculate_ratio(original_size, compressed_size)
}

//! # lzrle
//!
//! Allocation-free run-length and LZSS codecs for constrained targets. Every
//! call reads a caller-owned input slice, writes into a caller-owned,
//! pre-sized output slice, and returns how many bytes it wrote. Nothing
//! outlives a call; the LZSS window lives on the stack for its duration.
//!
//! Both wire formats are bit-exact and fixed, so data compressed on one
//! device decodes on another.
//!
//! ## Example
//!
//! ```rust
//! use lzrle::{Codec, lz77};
//!
//! let input = b"ABABABAB";
//! let mut packed = [0u8; lz77::max_compressed_len(8)];
//! let n = lz77::compress(input, &mut packed).expect("buffer sized for worst case");
//!
//! // Header (4) + tag (1) + 'A' + 'B' + one 2-byte match.
//! assert_eq!(n, 9);
//!
//! let mut restored = [0u8; 8];
//! let report = Codec::default().decompress(&packed[..n], &mut restored).unwrap();
//! assert_eq!(&restored, input);
//! assert_eq!(report.original_size, 8);
//! ```

#![no_std]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate alloc;

mod buffer;
pub mod error;
pub mod fixed;
pub mod lz77;
pub mod params;
pub mod rle;

pub use error::{Error, Result};
pub use fixed::{Q8_8, calculate_ratio};
pub use params::{CompressionResult, Lz77Params, RleParams};

/// Codec selection plus its parameters, for callers that pick at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Rle(RleParams),
    Lz77(Lz77Params),
}

impl Default for Codec {
    fn default() -> Self {
        Self::Lz77(Lz77Params::default())
    }
}

impl Codec {
    /// Compresses `input` into `output` and reports sizes and ratio.
    pub fn compress(&self, input: &[u8], output: &mut [u8]) -> Result<CompressionResult> {
        let written = match self {
            Self::Rle(params) => rle::compress_with(input, output, params)?,
            Self::Lz77(params) => lz77::compress_with(input, output, params)?,
        };
        Ok(CompressionResult::new(input.len(), written))
    }

    /// Decompresses `input` into `output` and reports sizes and ratio.
    pub fn decompress(&self, input: &[u8], output: &mut [u8]) -> Result<CompressionResult> {
        let written = match self {
            Self::Rle(params) => rle::decompress_with(input, output, params)?,
            Self::Lz77(params) => lz77::decompress_with(input, output, params)?,
        };
        Ok(CompressionResult::new(written, input.len()))
    }

    /// Output size that is always enough to compress `len` bytes.
    #[must_use]
    pub const fn max_compressed_len(&self, len: usize) -> usize {
        match self {
            Self::Rle(_) => rle::max_compressed_len(len),
            Self::Lz77(_) => lz77::max_compressed_len(len),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_round_trip_both_codecs() {
        let original = b"Hello world repeated Hello world repeated Hello world repeated";
        for codec in [Codec::Rle(RleParams::default()), Codec::default()] {
            let mut compressed = vec![0u8; codec.max_compressed_len(original.len())];
            let packed = codec.compress(original, &mut compressed).unwrap();
            assert!(packed.success);
            assert_eq!(packed.original_size, original.len());

            let mut restored = vec![0u8; original.len()];
            let unpacked = codec
                .decompress(&compressed[..packed.compressed_size], &mut restored)
                .unwrap();
            assert_eq!(unpacked.original_size, original.len());
            assert_eq!(unpacked.ratio, packed.ratio);
            assert_eq!(&restored[..], &original[..]);
        }
    }

    #[test]
    fn test_compress_rle() {
        let original = vec![b'A'; 100];
        let codec = Codec::Rle(RleParams::default());
        let mut compressed = [0u8; 8];
        let report = codec.compress(&original, &mut compressed).unwrap();
        assert_eq!(report.compressed_size, 2);
        assert_eq!(report.ratio, Q8_8::divide(2, 100));
    }

    #[test]
    fn test_errors_pass_through() {
        let mut out = [0u8; 4];
        assert_eq!(
            Codec::default().compress(&[], &mut out),
            Err(Error::InvalidArgument("empty input"))
        );
        assert!(Codec::default().compress(b"abcdef", &mut out).unwrap_err().is_retryable());
    }
}

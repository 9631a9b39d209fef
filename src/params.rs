//! Codec configuration and per-call outcome.

use core::fmt;

use crate::error::{Error, Result};
use crate::fixed::{Q8_8, calculate_ratio};

/// Widest back-reference the 12-bit offset field can address.
pub const MAX_WINDOW_SIZE: usize = 4096;

/// Longest match the 4-bit length field (`len - 2`) can carry.
pub const MAX_ENCODABLE_MATCH: usize = 17;

/// Run-length codec settings. Both values are in `1..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RleParams {
    pub max_run_length: u8,
    pub min_run_length: u8,
}

impl Default for RleParams {
    fn default() -> Self {
        Self::new()
    }
}

impl RleParams {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_run_length: 255,
            min_run_length: 3,
        }
    }

    #[must_use]
    pub const fn with_max_run_length(mut self, max_run_length: u8) -> Self {
        self.max_run_length = max_run_length;
        self
    }

    #[must_use]
    pub const fn with_min_run_length(mut self, min_run_length: u8) -> Self {
        self.min_run_length = min_run_length;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.check_invariants().inspect_err(|err| {
            tracing::debug!(params = ?self, %err, "rejected rle params");
        })
    }

    fn check_invariants(&self) -> Result<()> {
        if self.min_run_length == 0 || self.max_run_length == 0 {
            return Err(Error::InvalidArgument("run lengths must be at least 1"));
        }
        if self.min_run_length > self.max_run_length {
            return Err(Error::InvalidArgument(
                "min_run_length exceeds max_run_length",
            ));
        }
        Ok(())
    }
}

/// Sliding-window codec settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lz77Params {
    /// Dictionary size in bytes, `1..=4096`.
    pub window_size: usize,
    /// Longest match the search will try; clamped to 17 by the wire format.
    pub look_ahead_size: usize,
    /// Shortest match worth a 2-byte token; lengths below 2 are always literals.
    pub min_match_length: usize,
}

impl Default for Lz77Params {
    fn default() -> Self {
        Self::new()
    }
}

impl Lz77Params {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            window_size: MAX_WINDOW_SIZE,
            look_ahead_size: 18,
            min_match_length: 2,
        }
    }

    #[must_use]
    pub const fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    #[must_use]
    pub const fn with_look_ahead_size(mut self, look_ahead_size: usize) -> Self {
        self.look_ahead_size = look_ahead_size;
        self
    }

    #[must_use]
    pub const fn with_min_match_length(mut self, min_match_length: usize) -> Self {
        self.min_match_length = min_match_length;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.check_invariants().inspect_err(|err| {
            tracing::debug!(params = ?self, %err, "rejected lz77 params");
        })
    }

    fn check_invariants(&self) -> Result<()> {
        if self.window_size == 0 || self.window_size > MAX_WINDOW_SIZE {
            return Err(Error::InvalidArgument("window_size must be in 1..=4096"));
        }
        if self.look_ahead_size == 0 || self.min_match_length == 0 {
            return Err(Error::InvalidArgument(
                "look_ahead_size and min_match_length must be positive",
            ));
        }
        if self.min_match_length > self.look_ahead_size {
            return Err(Error::InvalidArgument(
                "min_match_length exceeds look_ahead_size",
            ));
        }
        Ok(())
    }

    /// Longest match the encoder will emit.
    pub(crate) fn max_match(&self) -> usize {
        self.look_ahead_size.min(MAX_ENCODABLE_MATCH)
    }

    /// Shortest match the encoder will emit.
    pub(crate) fn min_match(&self) -> usize {
        self.min_match_length.max(2)
    }
}

/// Outcome of a single compress or decompress call. Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionResult {
    pub success: bool,
    /// Size of the encoded stream.
    pub compressed_size: usize,
    /// Size of the plain data.
    pub original_size: usize,
    /// `compressed_size / original_size` in Q8.8.
    pub ratio: Q8_8,
}

impl CompressionResult {
    #[must_use]
    pub const fn new(original_size: usize, compressed_size: usize) -> Self {
        Self {
            success: true,
            compressed_size,
            original_size,
            ratio: calculate_ratio(original_size, compressed_size),
        }
    }

    /// A failed call: no compressed bytes, ratio pinned at `1.0`.
    #[must_use]
    pub const fn failed(original_size: usize) -> Self {
        Self {
            success: false,
            compressed_size: 0,
            original_size,
            ratio: Q8_8::ONE,
        }
    }

    /// Flattens a compression call's outcome into the success-flag form.
    #[must_use]
    pub fn from_outcome(original_size: usize, outcome: &Result<usize>) -> Self {
        match outcome {
            Ok(written) => Self::new(original_size, *written),
            Err(_) => Self::failed(original_size),
        }
    }
}

impl fmt::Display for CompressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(
                f,
                "{} -> {} bytes (ratio {})",
                self.original_size, self.compressed_size, self.ratio
            )
        } else {
            write!(f, "{} bytes: failed", self.original_size)
        }
    }
}

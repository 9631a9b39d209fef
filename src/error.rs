use thiserror::Error;

/// Failure reported by any codec call.
///
/// No variant carries partial output: a failed call leaves the output buffer
/// in an unspecified state and the caller must not read it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Empty input, zero-capacity output, or parameters that break their invariants.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The next write would land past the end of the output buffer.
    #[error("Output buffer too small")]
    BufferTooSmall,

    /// The input is not something the matching encoder could have produced.
    #[error("Corrupt stream: {0}")]
    CorruptStream(&'static str),
}

impl Error {
    /// Returns `true` when the same call can succeed with a larger output buffer.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::BufferTooSmall)
    }
}

pub type Result<T> = core::result::Result<T, Error>;

use super::{ESCAPE, MAX_LITERAL_RUN, MAX_RUN_BIAS, RUN_FLAG};
use crate::buffer::OutputBuffer;
use crate::error::{Error, Result};
use crate::params::RleParams;

/// Pending stretch of input bytes that did not form a run.
///
/// Literal bytes are always contiguous in the input (a run token flushes the
/// group first), so only the start and length need tracking.
struct LiteralGroup {
    start: usize,
    len: usize,
}

impl LiteralGroup {
    const fn new() -> Self {
        Self { start: 0, len: 0 }
    }

    /// Adds `input[idx]` to the group, flushing first if the group is full.
    fn push(&mut self, idx: usize, input: &[u8], out: &mut OutputBuffer<'_>) -> Result<()> {
        if self.len == MAX_LITERAL_RUN {
            self.flush(input, out)?;
        }
        if self.len == 0 {
            self.start = idx;
        }
        self.len += 1;
        Ok(())
    }

    /// Emits the group as a single literal, an escaped literal, or a literal run.
    fn flush(&mut self, input: &[u8], out: &mut OutputBuffer<'_>) -> Result<()> {
        match self.len {
            0 => {}
            1 => match input[self.start] {
                0 => out.push(0)?,
                byte => {
                    out.ensure(2)?;
                    out.push(ESCAPE)?;
                    out.push(byte)?;
                }
            },
            n => {
                out.ensure(n + 1)?;
                out.push((n - 1) as u8)?;
                out.extend_from_slice(&input[self.start..self.start + n])?;
            }
        }
        self.len = 0;
        Ok(())
    }
}

/// Compresses `input` into `output` using the default [`RleParams`].
///
/// Returns the number of bytes written.
pub fn compress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    compress_with(input, output, &RleParams::default())
}

/// Compresses `input` into `output`, returning the number of bytes written.
///
/// The stream has no header. Fails with [`Error::BufferTooSmall`] as soon as
/// the next token would not fit; `output` contents are unspecified after any
/// failure.
pub fn compress_with(input: &[u8], output: &mut [u8], params: &RleParams) -> Result<usize> {
    params.validate()?;
    if input.is_empty() {
        return Err(Error::InvalidArgument("empty input"));
    }
    if output.is_empty() {
        return Err(Error::InvalidArgument("zero-capacity output"));
    }

    let capacity = output.len();
    let mut out = OutputBuffer::new(output);
    let result = encode(input, &mut out, params);

    match result {
        Ok(()) => {
            tracing::debug!(
                original = input.len(),
                compressed = out.len(),
                "rle compression complete"
            );
            Ok(out.len())
        }
        Err(err) => {
            tracing::debug!(original = input.len(), capacity, %err, "rle compression failed");
            Err(err)
        }
    }
}

fn encode(input: &[u8], out: &mut OutputBuffer<'_>, params: &RleParams) -> Result<()> {
    let min_run = params.min_run_length as usize;
    // The run token has 7 bits for `run - min_run`.
    let max_run = (params.max_run_length as usize).min(min_run + MAX_RUN_BIAS);

    let mut literals = LiteralGroup::new();
    let mut idx = 0;

    while idx < input.len() {
        let run = run_length(&input[idx..], max_run);

        if run >= min_run {
            literals.flush(input, out)?;
            out.ensure(2)?;
            out.push(RUN_FLAG | (run - min_run) as u8)?;
            out.push(input[idx])?;
        } else {
            for k in idx..idx + run {
                literals.push(k, input, out)?;
            }
        }

        idx += run;
    }

    literals.flush(input, out)
}

/// Counts identical leading bytes of `data`, up to `max`.
#[inline]
fn run_length(data: &[u8], max: usize) -> usize {
    let first = data[0];
    data.iter()
        .take(max)
        .take_while(|&&b| b == first)
        .count()
}

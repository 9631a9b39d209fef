//! Bounds-checked cursors over caller-owned byte regions.
//!
//! Every write is checked against capacity before it happens, so no codec can
//! touch memory past the end of the slice it was handed.

use crate::error::{Error, Result};

/// Write cursor over a fixed-capacity output slice.
pub(crate) struct OutputBuffer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> OutputBuffer<'a> {
    pub(crate) const fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub(crate) const fn len(&self) -> usize {
        self.pos
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Fails with `BufferTooSmall` unless `n` more bytes fit.
    #[inline]
    pub(crate) const fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            Err(Error::BufferTooSmall)
        } else {
            Ok(())
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, byte: u8) -> Result<()> {
        self.ensure(1)?;
        self.buf[self.pos] = byte;
        self.pos += 1;
        Ok(())
    }

    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    /// Writes `n` copies of `byte`.
    pub(crate) fn fill(&mut self, byte: u8, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.buf[self.pos..self.pos + n].fill(byte);
        self.pos += n;
        Ok(())
    }

    /// Reserves a zeroed byte to be filled in later with [`Self::patch`].
    pub(crate) fn reserve(&mut self) -> Result<usize> {
        let slot = self.pos;
        self.push(0)?;
        Ok(slot)
    }

    /// Overwrites a byte previously handed out by [`Self::reserve`].
    pub(crate) fn patch(&mut self, slot: usize, byte: u8) {
        debug_assert!(slot < self.pos, "patching an unreserved slot");
        self.buf[slot] = byte;
    }
}

/// Read cursor over an encoded input stream.
///
/// Running out of input is reported as `CorruptStream` with the given reason,
/// since every decoder treats truncation as a malformed stream.
pub(crate) struct InputReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> InputReader<'a> {
    pub(crate) const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    pub(crate) fn read_u8(&mut self, reason: &'static str) -> Result<u8> {
        let byte = *self.data.get(self.pos).ok_or(Error::CorruptStream(reason))?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn read_slice(&mut self, n: usize, reason: &'static str) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::CorruptStream(reason))?;
        let slice = self.data.get(self.pos..end).ok_or(Error::CorruptStream(reason))?;
        self.pos = end;
        Ok(slice)
    }
}

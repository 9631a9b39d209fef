use super::window::Window;
use super::{TAG_GROUP_SIZE, encode_match};
use crate::buffer::OutputBuffer;
use crate::error::{Error, Result};
use crate::params::Lz77Params;

/// Builds one tag group: a reserved flag byte followed by up to 8 tokens.
///
/// The flag slot is reserved when the group's first token is written and
/// patched with the final bit pattern once the group fills or the stream ends.
/// Bit `i` (LSB first) is 0 for a literal and 1 for a match.
struct TagGroup {
    slot: Option<usize>,
    tag_byte: u8,
    item_count: usize,
}

impl TagGroup {
    const fn new() -> Self {
        Self {
            slot: None,
            tag_byte: 0,
            item_count: 0,
        }
    }

    /// Checks room for a `token_len`-byte token plus a new flag byte if needed,
    /// then reserves the flag byte.
    fn begin(&mut self, token_len: usize, out: &mut OutputBuffer<'_>) -> Result<()> {
        let flag_len = usize::from(self.slot.is_none());
        out.ensure(flag_len + token_len)?;
        if self.slot.is_none() {
            self.slot = Some(out.reserve()?);
        }
        Ok(())
    }

    fn push_literal(&mut self, byte: u8, out: &mut OutputBuffer<'_>) -> Result<()> {
        self.begin(1, out)?;
        out.push(byte)?;
        self.commit_item(out);
        Ok(())
    }

    fn push_match(&mut self, distance: usize, len: usize, out: &mut OutputBuffer<'_>) -> Result<()> {
        self.begin(2, out)?;
        self.tag_byte |= 1 << self.item_count;
        out.extend_from_slice(&encode_match(distance, len))?;
        self.commit_item(out);
        Ok(())
    }

    fn commit_item(&mut self, out: &mut OutputBuffer<'_>) {
        self.item_count += 1;
        if self.item_count == TAG_GROUP_SIZE {
            self.flush(out);
        }
    }

    /// Patches the final flag byte into its slot and starts a new group.
    fn flush(&mut self, out: &mut OutputBuffer<'_>) {
        if let Some(slot) = self.slot.take() {
            out.patch(slot, self.tag_byte);
            self.tag_byte = 0;
            self.item_count = 0;
        }
    }
}

/// Longest match found in the window for the current look-ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Match {
    distance: usize,
    len: usize,
}

/// Compresses `input` into `output` using the default [`Lz77Params`].
pub fn compress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    compress_with(input, output, &Lz77Params::default())
}

/// Compresses `input` into `output`, returning the number of bytes written.
///
/// The stream starts with the 4-byte little-endian input length. Fails with
/// [`Error::BufferTooSmall`] before any write that would not fit; `output`
/// contents are unspecified after any failure.
pub fn compress_with(input: &[u8], output: &mut [u8], params: &Lz77Params) -> Result<usize> {
    params.validate()?;
    if input.is_empty() {
        return Err(Error::InvalidArgument("empty input"));
    }
    if output.is_empty() {
        return Err(Error::InvalidArgument("zero-capacity output"));
    }
    let original_size = u32::try_from(input.len())
        .map_err(|_| Error::InvalidArgument("input exceeds the 32-bit size header"))?;

    let capacity = output.len();
    let mut out = OutputBuffer::new(output);
    let result = encode(input, original_size, &mut out, params);

    match result {
        Ok(()) => {
            tracing::debug!(
                original = input.len(),
                compressed = out.len(),
                "lz77 compression complete"
            );
            Ok(out.len())
        }
        Err(err) => {
            tracing::debug!(original = input.len(), capacity, %err, "lz77 compression failed");
            Err(err)
        }
    }
}

fn encode(
    input: &[u8],
    original_size: u32,
    out: &mut OutputBuffer<'_>,
    params: &Lz77Params,
) -> Result<()> {
    out.extend_from_slice(&original_size.to_le_bytes())?;

    let mut window = Window::new(params.window_size);
    let mut tags = TagGroup::new();
    let max_match = params.max_match();
    let min_match = params.min_match();

    let mut in_idx = 0;
    while in_idx < input.len() {
        let limit = max_match.min(input.len() - in_idx);
        let lookahead = &input[in_idx..in_idx + limit];

        let consumed = match longest_match(&window, lookahead) {
            Some(found) if found.len >= min_match => {
                tags.push_match(found.distance, found.len, out)?;
                found.len
            }
            _ => {
                tags.push_literal(input[in_idx], out)?;
                1
            }
        };

        for &byte in &input[in_idx..in_idx + consumed] {
            window.push(byte);
        }
        in_idx += consumed;
    }

    tags.flush(out);
    Ok(())
}

/// Scans every window slot in ascending order for the longest match.
///
/// A later slot replaces the current best only when strictly longer, so the
/// lowest slot wins ties. The scan stops early at a full-length match.
fn longest_match(window: &Window, lookahead: &[u8]) -> Option<Match> {
    let mut best: Option<Match> = None;

    for pos in 0..window.size() {
        let len = match_len(window, pos, lookahead);
        if len > best.map_or(0, |m| m.len) {
            best = Some(Match {
                distance: window.distance_to(pos),
                len,
            });
            if len == lookahead.len() {
                break;
            }
        }
    }

    best
}

/// Length of the common prefix of `lookahead` and the bytes the decoder would
/// read starting at window slot `pos`.
///
/// While a match is replayed, each copied byte is written at the cursor
/// before later bytes are read, so a source slot the copy has already
/// overwritten holds the look-ahead byte written there, not the old contents.
/// A match longer than the window rewrites the same slot every `size` steps;
/// only the most recent write is visible.
#[inline]
fn match_len(window: &Window, pos: usize, lookahead: &[u8]) -> usize {
    let size = window.size();
    let cursor = window.cursor();

    let mut len = 0;
    while len < lookahead.len() {
        let slot = (pos + len) % size;
        let first_write = (slot + size - cursor) % size;
        let byte = if first_write < len {
            let last_write = first_write + (len - 1 - first_write) / size * size;
            lookahead[last_write]
        } else {
            window.get(slot)
        };
        if byte != lookahead[len] {
            break;
        }
        len += 1;
    }
    len
}

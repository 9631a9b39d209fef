use crate::buffer::OutputBuffer;
use crate::error::Result;
use crate::params::MAX_WINDOW_SIZE;

/// Circular dictionary of the most recent `size` bytes of plain data.
///
/// Encoder and decoder each build one, zero-filled, at call entry and push
/// exactly the same bytes in the same order, so back-references resolve to
/// identical positions on both sides. Storage is a fixed array; only the
/// first `size` slots are used.
pub(crate) struct Window {
    buf: [u8; MAX_WINDOW_SIZE],
    size: usize,
    cursor: usize,
}

impl Window {
    /// `size` must already be validated to `1..=MAX_WINDOW_SIZE`.
    pub(crate) const fn new(size: usize) -> Self {
        Self {
            buf: [0; MAX_WINDOW_SIZE],
            size,
            cursor: 0,
        }
    }

    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    /// Slot the next pushed byte will land in.
    pub(crate) const fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub(crate) const fn get(&self, pos: usize) -> u8 {
        self.buf[pos % self.size]
    }

    #[inline]
    pub(crate) const fn push(&mut self, byte: u8) {
        self.buf[self.cursor] = byte;
        self.cursor = (self.cursor + 1) % self.size;
    }

    /// Back-distance from the cursor to `pos`, as stored in a match token.
    #[inline]
    pub(crate) const fn distance_to(&self, pos: usize) -> usize {
        (self.cursor + self.size - pos) % self.size
    }

    /// Replays a back-reference into `out`, one byte at a time.
    ///
    /// Source and destination advance together with wraparound, so a match
    /// whose source overlaps the bytes it is producing (`distance < len`)
    /// repeats them, and `distance == 0` reads each slot just before
    /// overwriting it.
    pub(crate) fn copy_match(
        &mut self,
        distance: usize,
        len: usize,
        out: &mut OutputBuffer<'_>,
    ) -> Result<()> {
        debug_assert!(distance < self.size);
        let mut src = (self.cursor + self.size - distance) % self.size;
        for _ in 0..len {
            let byte = self.buf[src];
            out.push(byte)?;
            self.push(byte);
            src = (src + 1) % self.size;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_wraps() {
        let mut window = Window::new(3);
        for b in 1..=4 {
            window.push(b);
        }
        assert_eq!(window.cursor(), 1);
        assert_eq!([window.get(0), window.get(1), window.get(2)], [4, 2, 3]);
        assert_eq!(window.distance_to(0), 1);
        assert_eq!(window.distance_to(1), 0);
    }

    #[test]
    fn test_overlapping_copy() {
        let mut window = Window::new(16);
        window.push(b'A');
        window.push(b'B');

        let mut storage = [0u8; 6];
        let mut out = OutputBuffer::new(&mut storage);
        window.copy_match(2, 6, &mut out).unwrap();
        assert_eq!(&storage, b"ABABAB");
    }

    #[test]
    fn test_zero_distance_reads_before_overwrite() {
        let mut window = Window::new(2);
        window.push(b'x');
        window.push(b'y');

        let mut storage = [0u8; 3];
        let mut out = OutputBuffer::new(&mut storage);
        window.copy_match(0, 3, &mut out).unwrap();
        assert_eq!(&storage, b"xyx");
    }
}

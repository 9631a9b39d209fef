use super::{ESCAPE, RUN_FLAG};
use crate::buffer::{InputReader, OutputBuffer};
use crate::error::{Error, Result};
use crate::params::RleParams;

/// Decompresses an RLE stream produced with the default [`RleParams`].
pub fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    decompress_with(input, output, &RleParams::default())
}

/// Decompresses `input` into `output`, returning the number of bytes written.
///
/// `params.min_run_length` must match the value used to compress.
pub fn decompress_with(input: &[u8], output: &mut [u8], params: &RleParams) -> Result<usize> {
    params.validate()?;
    if input.is_empty() {
        return Err(Error::InvalidArgument("empty input"));
    }
    if output.is_empty() {
        return Err(Error::InvalidArgument("zero-capacity output"));
    }

    let mut out = OutputBuffer::new(output);
    let capacity = out.remaining();
    let result = decode(input, &mut out, params.min_run_length as usize);

    match result {
        Ok(()) => {
            tracing::debug!(
                compressed = input.len(),
                original = out.len(),
                "rle decompression complete"
            );
            Ok(out.len())
        }
        Err(err) => {
            tracing::debug!(
                compressed = input.len(),
                capacity,
                produced = out.len(),
                %err,
                "rle decompression failed"
            );
            Err(err)
        }
    }
}

fn decode(input: &[u8], out: &mut OutputBuffer<'_>, min_run: usize) -> Result<()> {
    let mut reader = InputReader::new(input);

    while !reader.is_empty() {
        let token = reader.read_u8("missing token")?;

        match token {
            t if t & RUN_FLAG != 0 => {
                let value = reader.read_u8("run token without value")?;
                let run = (t & !RUN_FLAG) as usize + min_run;
                out.fill(value, run)?;
            }
            ESCAPE => {
                let value = reader.read_u8("escape without literal")?;
                out.push(value)?;
            }
            0 => out.push(0)?,
            count => {
                let bytes = reader.read_slice(count as usize + 1, "truncated literal run")?;
                out.extend_from_slice(bytes)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_token_kind() {
        let stream = [0x87, b'A', ESCAPE, 0x90, 0x00, 0x01, b'x', b'y'];
        let mut out = [0u8; 32];
        let n = decompress(&stream, &mut out).unwrap();
        assert_eq!(&out[..n], b"AAAAAAAAAA\x90\x00xy");
    }

    #[test]
    fn test_truncated_tokens() {
        let mut out = [0u8; 32];
        assert!(matches!(
            decompress(&[0x85], &mut out),
            Err(Error::CorruptStream(_))
        ));
        assert!(matches!(
            decompress(&[ESCAPE], &mut out),
            Err(Error::CorruptStream(_))
        ));
        assert!(matches!(
            decompress(&[0x03, 1, 2], &mut out),
            Err(Error::CorruptStream(_))
        ));
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut out = [0u8; 9];
        assert_eq!(
            decompress(&[0x87, b'A'], &mut out),
            Err(Error::BufferTooSmall)
        );
    }

    #[test]
    fn test_min_run_changes_run_decoding() {
        let params = RleParams::new().with_min_run_length(1);
        let mut out = [0u8; 4];
        let n = decompress_with(&[0x80, 9], &mut out, &params).unwrap();
        assert_eq!(&out[..n], &[9]);
    }
}

use super::window::Window;
use super::{HEADER_LEN, TAG_GROUP_SIZE, decode_match, read_header};
use crate::buffer::{InputReader, OutputBuffer};
use crate::error::{Error, Result};
use crate::params::Lz77Params;

/// Decompresses a stream produced with the default [`Lz77Params`].
pub fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize> {
    decompress_with(input, output, &Lz77Params::default())
}

/// Decompresses `input` into `output`, returning the number of bytes written.
///
/// `params.window_size` must match the value used to compress; the other
/// fields only steer the encoder. Succeeds only when exactly the number of
/// bytes declared in the header has been produced.
pub fn decompress_with(input: &[u8], output: &mut [u8], params: &Lz77Params) -> Result<usize> {
    params.validate()?;
    if input.is_empty() {
        return Err(Error::InvalidArgument("empty input"));
    }
    if output.is_empty() {
        return Err(Error::InvalidArgument("zero-capacity output"));
    }

    let original_size = read_header(input).inspect_err(|err| {
        tracing::debug!(compressed = input.len(), %err, "lz77 header unreadable");
    })?;
    if original_size > output.len() {
        tracing::debug!(
            original = original_size,
            capacity = output.len(),
            "lz77 output buffer too small for declared size"
        );
        return Err(Error::BufferTooSmall);
    }

    let mut out = OutputBuffer::new(&mut output[..original_size]);
    let result = decode(&input[HEADER_LEN..], &mut out, original_size, params.window_size);

    match result {
        Ok(()) => {
            tracing::debug!(
                compressed = input.len(),
                original = original_size,
                "lz77 decompression complete"
            );
            Ok(original_size)
        }
        Err(err) => {
            tracing::debug!(
                compressed = input.len(),
                original = original_size,
                produced = out.len(),
                %err,
                "lz77 decompression failed"
            );
            Err(err)
        }
    }
}

fn decode(
    body: &[u8],
    out: &mut OutputBuffer<'_>,
    original_size: usize,
    window_size: usize,
) -> Result<()> {
    let mut reader = InputReader::new(body);
    let mut window = Window::new(window_size);

    while out.len() < original_size {
        let tag_byte = reader.read_u8("missing tag byte")?;

        for i in 0..TAG_GROUP_SIZE {
            if out.len() == original_size {
                break;
            }

            if (tag_byte >> i) & 1 != 0 {
                let hi = reader.read_u8("truncated match token")?;
                let lo = reader.read_u8("truncated match token")?;
                let (distance, len) = decode_match([hi, lo]);

                if distance >= window.size() {
                    return Err(Error::CorruptStream("match offset outside window"));
                }
                if out.len() + len > original_size {
                    return Err(Error::CorruptStream("match runs past declared size"));
                }
                window.copy_match(distance, len, out)?;
            } else {
                let byte = reader.read_u8("truncated literal")?;
                out.push(byte)?;
                window.push(byte);
            }
        }
    }

    Ok(())
}

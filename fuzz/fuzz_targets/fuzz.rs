#![no_main]

use libfuzzer_sys::fuzz_target;
use lzrle::{lz77, rle};

/// Capacity handed to the decoders when fed raw fuzz input.
const DECODE_CAPACITY: usize = 64 * 1024;

/// Feeds arbitrary bytes to both decoders.
///
/// # Invariant
/// Each decoder returns `Ok` or `Err`; it never panics and never writes past
/// the slice it was given.
fn verify_decompression_robustness(data: &[u8]) {
    let mut output = vec![0u8; DECODE_CAPACITY];
    let _ = rle::decompress(data, &mut output);
    let _ = lz77::decompress(data, &mut output);
}

/// Verifies `decompress(compress(data)) == data` for both codecs, with output
/// buffers sized by each codec's worst-case bound.
///
/// # Panics
/// On any compression error, decompression error, or byte mismatch.
fn verify_round_trip(data: &[u8]) {
    if data.is_empty() {
        return;
    }

    let mut compressed = vec![0u8; rle::max_compressed_len(data.len())];
    let n = rle::compress(data, &mut compressed).expect("RLE rejected a worst-case sized buffer");
    let mut restored = vec![0u8; data.len()];
    let m = rle::decompress(&compressed[..n], &mut restored)
        .unwrap_or_else(|e| panic!("RLE rejected its own stream: {e:?}"));
    assert_eq!(&restored[..m], data, "RLE round-trip mismatch");

    let mut compressed = vec![0u8; lz77::max_compressed_len(data.len())];
    let n = lz77::compress(data, &mut compressed).expect("LZ77 rejected a worst-case sized buffer");
    let mut restored = vec![0u8; data.len()];
    lz77::decompress(&compressed[..n], &mut restored)
        .unwrap_or_else(|e| panic!("LZ77 rejected its own stream: {e:?}"));
    assert_eq!(restored, data, "LZ77 round-trip mismatch");
}

fuzz_target!(|data: &[u8]| {
    verify_decompression_robustness(data);
    verify_round_trip(data);
});

use lzrle::{Error, Lz77Params, RleParams, lz77, rle};
use proptest::prelude::*;

/// Byte vectors biased toward repetition so both codecs see runs and matches.
fn repetitive_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec((0u8..4, 1usize..24), 1..max_len).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(value, len)| std::iter::repeat_n(value * 0x41, len))
            .collect()
    })
}

fn rle_params() -> impl Strategy<Value = RleParams> {
    (1u8..=255, 1u8..=255).prop_map(|(a, b)| {
        RleParams::new()
            .with_min_run_length(a.min(b))
            .with_max_run_length(a.max(b))
    })
}

fn lz77_params() -> impl Strategy<Value = Lz77Params> {
    (1usize..=4096, 2usize..=18).prop_flat_map(|(window, look_ahead)| {
        (1usize..=look_ahead).prop_map(move |min_match| {
            Lz77Params::new()
                .with_window_size(window)
                .with_look_ahead_size(look_ahead)
                .with_min_match_length(min_match)
        })
    })
}

/// Windows no longer than the longest match, so matches can wrap their own source.
fn small_window_params() -> impl Strategy<Value = Lz77Params> {
    (1usize..=17, 2usize..=18).prop_map(|(window, look_ahead)| {
        Lz77Params::new()
            .with_window_size(window)
            .with_look_ahead_size(look_ahead)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rle_round_trip(data in proptest::collection::vec(any::<u8>(), 1..2000), params in rle_params()) {
        let mut compressed = vec![0u8; rle::max_compressed_len(data.len())];
        let n = rle::compress_with(&data, &mut compressed, &params).unwrap();

        let mut restored = vec![0u8; data.len()];
        let m = rle::decompress_with(&compressed[..n], &mut restored, &params).unwrap();
        prop_assert_eq!(&restored[..m], &data[..]);
    }

    #[test]
    fn prop_rle_round_trip_repetitive(data in repetitive_bytes(64)) {
        let mut compressed = vec![0u8; rle::max_compressed_len(data.len())];
        let n = rle::compress(&data, &mut compressed).unwrap();

        let mut restored = vec![0u8; data.len()];
        let m = rle::decompress(&compressed[..n], &mut restored).unwrap();
        prop_assert_eq!(&restored[..m], &data[..]);
    }

    #[test]
    fn prop_lz77_round_trip(data in repetitive_bytes(32), params in lz77_params()) {
        let mut compressed = vec![0u8; lz77::max_compressed_len(data.len())];
        let n = lz77::compress_with(&data, &mut compressed, &params).unwrap();

        let mut restored = vec![0u8; data.len()];
        let m = lz77::decompress_with(&compressed[..n], &mut restored, &params).unwrap();
        prop_assert_eq!(m, data.len());
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn prop_lz77_round_trip_small_window(
        data in proptest::collection::vec(0u8..3, 1..120),
        params in small_window_params(),
    ) {
        let mut compressed = vec![0u8; lz77::max_compressed_len(data.len())];
        let n = lz77::compress_with(&data, &mut compressed, &params).unwrap();

        let mut restored = vec![0u8; data.len()];
        let m = lz77::decompress_with(&compressed[..n], &mut restored, &params).unwrap();
        prop_assert_eq!(m, data.len());
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn prop_lz77_round_trip_arbitrary(data in proptest::collection::vec(any::<u8>(), 1..400)) {
        let mut compressed = vec![0u8; lz77::max_compressed_len(data.len())];
        let n = lz77::compress(&data, &mut compressed).unwrap();

        let mut restored = vec![0u8; data.len()];
        lz77::decompress(&compressed[..n], &mut restored).unwrap();
        prop_assert_eq!(restored, data);
    }

    #[test]
    fn prop_undersized_output_never_succeeds(data in repetitive_bytes(32), shrink in 1usize..8) {
        let mut full = vec![0u8; lz77::max_compressed_len(data.len())];
        let needed = lz77::compress(&data, &mut full).unwrap();
        let mut small = vec![0u8; needed.saturating_sub(shrink).max(1)];
        if small.len() < needed {
            prop_assert_eq!(lz77::compress(&data, &mut small), Err(Error::BufferTooSmall));
        }
    }

    #[test]
    fn prop_decoders_survive_garbage(data in proptest::collection::vec(any::<u8>(), 1..512)) {
        let mut out = vec![0u8; 8192];
        let _ = rle::decompress(&data, &mut out);
        let _ = lz77::decompress(&data, &mut out);
    }
}

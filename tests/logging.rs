use std::io;
use std::sync::{Arc, Mutex};

use lzrle::{Lz77Params, RleParams, lz77, rle};
use tracing::Level;

/// Shared sink the fmt subscriber writes formatted events into.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a debug-level subscriber and returns everything it logged.
fn capture_debug_logs(f: impl FnOnce()) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = logs.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_rejected_params_are_logged() {
    let logs = capture_debug_logs(|| {
        let mut out = [0u8; 16];
        let bad_rle = RleParams::new().with_min_run_length(9).with_max_run_length(4);
        assert!(rle::compress_with(b"abc", &mut out, &bad_rle).is_err());
        let bad_lz = Lz77Params::new().with_window_size(0);
        assert!(lz77::decompress_with(&[1, 0, 0, 0, 0, 7], &mut out, &bad_lz).is_err());
    });

    assert!(logs.contains("rejected rle params"), "{logs}");
    assert!(logs.contains("rejected lz77 params"), "{logs}");
}

#[test]
fn test_corrupt_streams_are_logged() {
    let logs = capture_debug_logs(|| {
        let mut out = [0u8; 16];
        // Declares 8 bytes but carries only one literal.
        assert!(lz77::decompress(&[8, 0, 0, 0, 0, b'A'], &mut out).is_err());
        assert!(lz77::decompress(&[8, 0], &mut out).is_err());
        // Run token with its value byte missing.
        assert!(rle::decompress(&[0x85], &mut out).is_err());
    });

    assert!(logs.contains("lz77 decompression failed"), "{logs}");
    assert!(logs.contains("lz77 header unreadable"), "{logs}");
    assert!(logs.contains("rle decompression failed"), "{logs}");
}

#[test]
fn test_successful_calls_log_sizes() {
    let logs = capture_debug_logs(|| {
        let mut out = [0u8; 16];
        assert_eq!(rle::compress(&[0x41; 10], &mut out), Ok(2));
    });

    assert!(logs.contains("rle compression complete"), "{logs}");
    assert!(logs.contains("original=10"), "{logs}");
    assert!(logs.contains("compressed=2"), "{logs}");
}

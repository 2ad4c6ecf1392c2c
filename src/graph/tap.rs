//! Read-only tap on the post-mix signal.
//!
//! The audio thread pushes every rendered sample into a wait-free SPSC ring
//! and drops whatever does not fit. The display thread drains the ring at its
//! own pace and keeps a rolling window of the most recent samples. Neither
//! side ever waits on the other; a slow display simply shows older data.

use rtrb::{Consumer, Producer, PushError, RingBuffer};

/// Create a connected producer/reader pair.
///
/// `capacity` is the ring size in samples, `window_len` the number of
/// most-recent samples the reader keeps for analysis.
pub fn analyzer_tap(capacity: usize, window_len: usize) -> (AnalyzerTap, TapReader) {
    let (tx, rx) = RingBuffer::<f32>::new(capacity);
    (
        AnalyzerTap { tx, dropped: 0 },
        TapReader {
            rx,
            window: vec![0.0; window_len],
            fresh: 0,
        },
    )
}

/// Audio-thread side of the tap.
pub struct AnalyzerTap {
    tx: Producer<f32>,
    dropped: u64,
}

impl AnalyzerTap {
    /// Push a block, never blocking. Samples that do not fit are dropped.
    pub fn push_block(&mut self, block: &[f32]) {
        for (i, &sample) in block.iter().enumerate() {
            if let Err(PushError::Full(_)) = self.tx.push(sample) {
                self.dropped += (block.len() - i) as u64;
                break;
            }
        }
    }

    /// Samples discarded so far because the reader fell behind.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Display-thread side of the tap.
pub struct TapReader {
    rx: Consumer<f32>,
    window: Vec<f32>,
    fresh: usize,
}

impl TapReader {
    /// Drain everything available into the rolling window. Returns the number
    /// of samples read.
    pub fn poll(&mut self) -> usize {
        let available = self.rx.slots();
        if available == 0 {
            return 0;
        }
        let Ok(chunk) = self.rx.read_chunk(available) else {
            return 0;
        };
        let (first, second) = chunk.as_slices();
        push_latest(&mut self.window, first);
        push_latest(&mut self.window, second);
        chunk.commit_all();

        self.fresh = (self.fresh + available).min(self.window.len());
        available
    }

    /// The most recent samples, oldest first.
    pub fn window(&self) -> &[f32] {
        &self.window
    }

    /// Whether the window has been completely refilled since the last call to
    /// [`TapReader::mark_seen`].
    pub fn has_full_window(&self) -> bool {
        self.fresh == self.window.len()
    }

    pub fn mark_seen(&mut self) {
        self.fresh = 0;
    }
}

/// Shift `samples` into the end of `window`, discarding the oldest values.
fn push_latest(window: &mut [f32], samples: &[f32]) {
    let len = window.len();
    if samples.len() >= len {
        window.copy_from_slice(&samples[samples.len() - len..]);
    } else {
        window.copy_within(samples.len().., 0);
        window[len - samples.len()..].copy_from_slice(samples);
    }
}

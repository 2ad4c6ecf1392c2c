//! Time sources for pluck scheduling.
//!
//! Voices only ever see a millisecond timestamp. Where it comes from is up
//! to the clock the scheduler was given: the real monotonic clock on a live
//! stream, a sample counter for offline renders, or a hand-driven clock in
//! tests.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};

pub trait Clock: Send {
    /// Current time in whole milliseconds.
    fn now_ms(&self) -> u64;

    /// Called by the scheduler after each rendered block.
    fn advance(&mut self, _frames: usize) {
        // Default: time moves on its own
    }
}

/// Monotonic wall-clock milliseconds since the clock was created.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Time derived from rendered frames: each frame is `1000 / sample_rate` ms.
pub struct SampleClock {
    frames: u64,
    sample_rate: f64,
}

impl SampleClock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            frames: 0,
            sample_rate: sample_rate as f64,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Clock for SampleClock {
    fn now_ms(&self) -> u64 {
        (self.frames as f64 * 1000.0 / self.sample_rate) as u64
    }

    fn advance(&mut self, frames: usize) {
        self.frames += frames as u64;
    }
}

/// Externally driven clock. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::Relaxed);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

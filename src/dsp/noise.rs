//! Excitation sources for plucks.
//!
//! A pluck injects a short burst of samples into the delay line. In normal
//! use that burst is uniform white noise; tests can substitute a fixed
//! sequence to make voices fully deterministic.

use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Produces the burst samples injected by a pluck.
pub trait Excitation: Send {
    /// Next excitation sample, bounded by `max_amplitude` in magnitude.
    fn next_sample(&mut self, max_amplitude: f32) -> f32;
}

/// Uniform white noise in `[-max_amplitude, max_amplitude)`.
pub struct WhiteNoise {
    rng: SmallRng,
}

impl WhiteNoise {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reproducible noise, mainly for tests and offline renders.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for WhiteNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl Excitation for WhiteNoise {
    #[inline]
    fn next_sample(&mut self, max_amplitude: f32) -> f32 {
        self.rng.gen::<f32>() * 2.0 * max_amplitude - max_amplitude
    }
}

/// Replays a fixed list of samples, scaled by the amplitude bound and
/// cycling when exhausted.
pub struct SequenceExcitation {
    samples: Vec<f32>,
    pos: usize,
}

impl SequenceExcitation {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, pos: 0 }
    }
}

impl Excitation for SequenceExcitation {
    fn next_sample(&mut self, max_amplitude: f32) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.pos];
        self.pos = (self.pos + 1) % self.samples.len();
        sample * max_amplitude
    }
}

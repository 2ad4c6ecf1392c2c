//! Read-only analysis of rendered audio for display.

pub mod spectrum;

pub use spectrum::{level_from_db, SpectrumAnalyzer, FFT_SIZE};

/// Peak and RMS of a block of samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self::default();
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

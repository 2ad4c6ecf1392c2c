//! FFT spectrum with log-spaced display bins.
//!
//! Magnitudes follow the browser analyser convention: the windowed FFT is
//! scaled by `1 / fft_size`, smoothed over time per FFT bin, then converted
//! to dB. Display levels are the dB values mapped linearly from
//! `[MIN_DB, MAX_DB]` onto `[0, 1]`.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

pub const FFT_SIZE: usize = 4096;
/// Number of frequency bins handed to the display.
pub const SPECTRUM_BINS: usize = 48;
pub const DEFAULT_SMOOTHING: f32 = 0.8;
pub const MIN_DB: f64 = -100.0;
pub const MAX_DB: f64 = -30.0;

const LOWEST_FREQ: f32 = 20.0;

/// Map a dB value onto the display range, clamped to `[0, 1]`.
pub fn level_from_db(db: f64) -> f64 {
    ((db - MIN_DB) / (MAX_DB - MIN_DB)).clamp(0.0, 1.0)
}

pub struct SpectrumAnalyzer {
    sample_rate: f32,
    /// Hann window coefficients
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Smoothed linear magnitude per FFT bin up to Nyquist
    smoothed: Vec<f32>,
    smoothing: f32,
    /// First FFT bin of each display bin; each display bin spans up to the
    /// next one's start.
    bin_starts: Vec<usize>,
    /// (frequency_hz, magnitude_db) per display bin
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(fft_size: usize, sample_rate: f32) -> Self {
        let fft_size = fft_size.max(2);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        let denom = (fft_size - 1) as f32;
        let window = (0..fft_size)
            .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos()))
            .collect();

        let half = fft_size / 2;
        let max_freq = (sample_rate / 2.0).max(LOWEST_FREQ + 1.0);
        let ratio = (max_freq / LOWEST_FREQ) as f64;

        let mut freq_bins = Vec::with_capacity(SPECTRUM_BINS);
        let mut bin_starts = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = LOWEST_FREQ as f64 * ratio.powf(t);
            let index = (freq * fft_size as f64 / sample_rate as f64).round() as usize;
            freq_bins.push(freq);
            bin_starts.push(index.min(half - 1));
        }

        let scratch_len = fft.get_inplace_scratch_len();
        Self {
            sample_rate,
            window,
            fft,
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            smoothed: vec![0.0; half],
            smoothing: DEFAULT_SMOOTHING,
            bin_starts,
            spectrum: freq_bins.into_iter().map(|f| (f, MIN_DB)).collect(),
        }
    }

    /// Set the time constant, clamped to `[0, 1]`. Zero disables smoothing.
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.clamp(0.0, 1.0);
        self
    }

    pub fn fft_size(&self) -> usize {
        self.window.len()
    }

    /// Analyse one window of samples. Returns `false` and leaves the spectrum
    /// untouched when `samples` is not exactly one FFT long.
    pub fn update(&mut self, samples: &[f32]) -> bool {
        if samples.len() != self.window.len() {
            return false;
        }

        for ((slot, &sample), &w) in self.buffer.iter_mut().zip(samples).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        let scale = 1.0 / self.window.len() as f32;
        let tau = self.smoothing;
        for (smoothed, bin) in self.smoothed.iter_mut().zip(&self.buffer) {
            let magnitude = bin.norm() * scale;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
        }

        let half = self.smoothed.len();
        for (i, &start) in self.bin_starts.iter().enumerate() {
            let end = self
                .bin_starts
                .get(i + 1)
                .copied()
                .unwrap_or(half)
                .clamp(start + 1, half);
            let magnitude = self.smoothed[start..end].iter().fold(0.0f32, |acc, &m| acc.max(m));
            self.spectrum[i].1 = 20.0 * (magnitude.max(1e-10) as f64).log10();
        }

        true
    }

    /// Current spectrum as (frequency_hz, magnitude_db) pairs.
    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }

    /// Current spectrum mapped onto `[0, 1]` for drawing.
    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        self.spectrum.iter().map(|&(_, db)| level_from_db(db))
    }

    /// Frequency of the strongest FFT bin, if anything is above the floor.
    pub fn peak_frequency(&self) -> Option<f32> {
        let (index, &magnitude) = self
            .smoothed
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))?;
        (magnitude > 0.0)
            .then(|| index as f32 * self.sample_rate / self.window.len() as f32)
    }
}

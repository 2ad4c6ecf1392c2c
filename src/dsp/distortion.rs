//! Curve-based waveshaping.
//!
//! A waveshaper maps every input sample through a transfer curve sampled
//! at evenly spaced points over [-1, 1]:
//!
//!   index = (len - 1) / 2 * (x + 1)
//!   output = lerp(curve[floor(index)], curve[floor(index) + 1], fract(index))
//!
//! Inputs beyond [-1, 1] clamp to the first/last curve point. Unlike the
//! biquad stages, a shaper is nonlinear, so where it sits in a chain changes
//! the result.
//!
//! # Curves
//!
//! Classic (soft knee, adjustable amount):
//!   f(x) = (3 + k) * x * 20° / (π + k * |x|)
//!   - Large `amount` values drive quickly into a flat ceiling
//!   - Symmetric, so only odd harmonics are added
//!
//! Asymmetric tanh-like:
//!   x' = 0.686306 * x,  a = 1 + exp(-0.75 * sqrt(|x'|))
//!   f(x) = (e^x' - e^(-a x')) / (e^x' + e^-x')
//!   - Negative half compresses differently from the positive half
//!   - Adds even harmonics as well, a warmer, tube-like colour

use std::f32::consts::PI;

use crate::error::ConfigError;

/// Drive used by the classic curve when nothing else is configured.
pub const CLASSIC_AMOUNT: f32 = 400.0;
pub const CLASSIC_CURVE_LEN: usize = 44_100;
pub const ASYMMETRIC_CURVE_LEN: usize = 139;

/// Soft-knee curve with `len` points.
pub fn classic_curve(amount: f32, len: usize) -> Vec<f32> {
    let deg = PI / 180.0;
    (0..len)
        .map(|i| {
            let x = i as f32 * 2.0 / len as f32 - 1.0;
            (3.0 + amount) * x * 20.0 * deg / (PI + amount * x.abs())
        })
        .collect()
}

/// Asymmetric tanh-like curve with `len` points.
pub fn asymmetric_curve(len: usize) -> Vec<f32> {
    let last = len.saturating_sub(1).max(1) as f32;
    (0..len)
        .map(|i| {
            let x = (2.0 * i as f32 / last - 1.0) * 0.686306;
            let a = 1.0 + (x.abs().sqrt() * -0.75).exp();
            (x.exp() - (-x * a).exp()) / (x.exp() + (-x).exp())
        })
        .collect()
}

pub struct WaveShaper {
    curve: Vec<f32>,
}

impl WaveShaper {
    pub fn new(curve: Vec<f32>) -> Result<Self, ConfigError> {
        if curve.len() < 2 {
            return Err(ConfigError::CurveTooShort { len: curve.len() });
        }
        Ok(Self { curve })
    }

    pub fn classic() -> Self {
        Self {
            curve: classic_curve(CLASSIC_AMOUNT, CLASSIC_CURVE_LEN),
        }
    }

    pub fn asymmetric() -> Self {
        Self {
            curve: asymmetric_curve(ASYMMETRIC_CURVE_LEN),
        }
    }

    pub fn curve(&self) -> &[f32] {
        &self.curve
    }

    #[inline]
    pub fn apply(&self, sample: f32) -> f32 {
        let last = self.curve.len() - 1;
        let v = last as f32 * 0.5 * (sample + 1.0);

        if v <= 0.0 || v.is_nan() {
            return self.curve[0];
        }
        if v >= last as f32 {
            return self.curve[last];
        }

        let k = v as usize;
        let frac = v - k as f32;
        let a = self.curve[k];
        let b = self.curve[(k + 1).min(last)];
        a + (b - a) * frac
    }

    pub fn render(&self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.apply(*sample);
        }
    }
}

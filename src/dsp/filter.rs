use std::f64::consts::{SQRT_2, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_sample_rate, ConfigError};

/*
| type       | boosts / cuts by gain_db  | shape parameter |
| ---------- | ------------------------- | --------------- |
| low-shelf  | below center frequency    | slope S = 1     |
| peaking    | band around center        | Q = 1           |
| high-shelf | above center frequency    | slope S = 1     |

Coefficients follow the Audio EQ Cookbook as adopted by the Web Audio
BiquadFilterNode, so a chain configured with the same numbers sounds the
same as a browser-side equalizer.
*/

/// Q used by peaking stages.
pub const PEAKING_Q: f64 = 1.0;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    LowShelf,
    Peaking,
    HighShelf,
}

/// Immutable description of one equalization stage.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterStage {
    pub kind: FilterKind,
    pub center_hz: f32,
    pub gain_db: f32,
}

impl FilterStage {
    pub const fn low_shelf(center_hz: f32, gain_db: f32) -> Self {
        Self {
            kind: FilterKind::LowShelf,
            center_hz,
            gain_db,
        }
    }

    pub const fn peaking(center_hz: f32, gain_db: f32) -> Self {
        Self {
            kind: FilterKind::Peaking,
            center_hz,
            gain_db,
        }
    }

    pub const fn high_shelf(center_hz: f32, gain_db: f32) -> Self {
        Self {
            kind: FilterKind::HighShelf,
            center_hz,
            gain_db,
        }
    }

    /// Balancing EQ for Karplus-Strong chords: high strings die away faster
    /// and sound thinner, so lows are lifted and highs tamed.
    pub const fn default_chain() -> [FilterStage; 3] {
        [
            FilterStage::low_shelf(600.0, 15.0),
            FilterStage::peaking(220.0, 5.0),
            FilterStage::high_shelf(2500.0, -15.0),
        ]
    }

    pub fn validate(&self, sample_rate: f32) -> Result<(), ConfigError> {
        check_sample_rate(sample_rate)?;
        let nyquist = sample_rate / 2.0;
        if !(self.center_hz > 0.0 && self.center_hz < nyquist) {
            return Err(ConfigError::InvalidFilterFrequency {
                center_hz: self.center_hz,
                nyquist,
            });
        }
        if !self.gain_db.is_finite() {
            return Err(ConfigError::InvalidFilterGain {
                gain_db: self.gain_db,
            });
        }
        Ok(())
    }
}

/// Normalised biquad coefficients (a0 divided out).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoeffs {
    /// Designed in f64 and rounded once, which keeps low-frequency shelves
    /// at high sample rates well conditioned.
    pub fn design(stage: &FilterStage, sample_rate: f32) -> Self {
        let a = 10f64.powf(stage.gain_db as f64 / 40.0);
        let w0 = TAU * stage.center_hz as f64 / sample_rate as f64;
        let (sin_w0, cos_w0) = w0.sin_cos();

        let (b0, b1, b2, a0, a1, a2) = match stage.kind {
            FilterKind::LowShelf => {
                let alpha = sin_w0 / 2.0 * SQRT_2;
                let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;
                (
                    a * ((a + 1.0) - (a - 1.0) * cos_w0 + two_sqrt_a_alpha),
                    2.0 * a * ((a - 1.0) - (a + 1.0) * cos_w0),
                    a * ((a + 1.0) - (a - 1.0) * cos_w0 - two_sqrt_a_alpha),
                    (a + 1.0) + (a - 1.0) * cos_w0 + two_sqrt_a_alpha,
                    -2.0 * ((a - 1.0) + (a + 1.0) * cos_w0),
                    (a + 1.0) + (a - 1.0) * cos_w0 - two_sqrt_a_alpha,
                )
            }
            FilterKind::HighShelf => {
                let alpha = sin_w0 / 2.0 * SQRT_2;
                let two_sqrt_a_alpha = 2.0 * a.sqrt() * alpha;
                (
                    a * ((a + 1.0) + (a - 1.0) * cos_w0 + two_sqrt_a_alpha),
                    -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w0),
                    a * ((a + 1.0) + (a - 1.0) * cos_w0 - two_sqrt_a_alpha),
                    (a + 1.0) - (a - 1.0) * cos_w0 + two_sqrt_a_alpha,
                    2.0 * ((a - 1.0) - (a + 1.0) * cos_w0),
                    (a + 1.0) - (a - 1.0) * cos_w0 - two_sqrt_a_alpha,
                )
            }
            FilterKind::Peaking => {
                let alpha = sin_w0 / (2.0 * PEAKING_Q);
                (
                    1.0 + alpha * a,
                    -2.0 * cos_w0,
                    1.0 - alpha * a,
                    1.0 + alpha / a,
                    -2.0 * cos_w0,
                    1.0 - alpha / a,
                )
            }
        };

        Self {
            b0: (b0 / a0) as f32,
            b1: (b1 / a0) as f32,
            b2: (b2 / a0) as f32,
            a1: (a1 / a0) as f32,
            a2: (a2 / a0) as f32,
        }
    }
}

/// Direct form I biquad with its own two-sample input/output history.
pub struct Biquad {
    stage: FilterStage,
    coeffs: BiquadCoeffs,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    pub fn new(stage: FilterStage, sample_rate: f32) -> Result<Self, ConfigError> {
        stage.validate(sample_rate)?;
        Ok(Self {
            stage,
            coeffs: BiquadCoeffs::design(&stage, sample_rate),
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        })
    }

    pub fn stage(&self) -> &FilterStage {
        &self.stage
    }

    pub fn coeffs(&self) -> &BiquadCoeffs {
        &self.coeffs
    }

    #[inline]
    pub fn next_sample(&mut self, x: f32) -> f32 {
        let c = &self.coeffs;
        let y = c.b0 * x + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;

        y
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

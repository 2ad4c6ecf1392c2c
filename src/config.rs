//! Typed configuration for voices and the assembled engine.
//!
//! Defaults reproduce the classic setup: 0.995 loop gain, one pluck per
//! second, a half-millisecond noise burst and the three-stage balancing EQ.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::filter::FilterStage,
    error::{check_sample_rate, ConfigError},
    DEFAULT_SAMPLE_RATE,
};

/// Per-voice synthesis parameters shared by every voice of a chord.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceConfig {
    /// Loop gain applied after the two-tap average. Must be in (0, 1).
    pub decay_gain: f32,
    /// Time between automatic re-excitations.
    pub pluck_period_ms: u64,
    /// Length of the noise burst injected by each pluck.
    pub impulse_duration_secs: f32,
    /// Bound of the uniform excitation noise.
    pub max_amplitude: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            decay_gain: 0.995,
            pluck_period_ms: 1000,
            impulse_duration_secs: 0.0005,
            max_amplitude: 1.0,
        }
    }
}

impl VoiceConfig {
    pub fn with_max_amplitude(mut self, max_amplitude: f32) -> Self {
        self.max_amplitude = max_amplitude;
        self
    }

    pub fn with_decay_gain(mut self, decay_gain: f32) -> Self {
        self.decay_gain = decay_gain;
        self
    }

    pub fn with_pluck_period_ms(mut self, pluck_period_ms: u64) -> Self {
        self.pluck_period_ms = pluck_period_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.decay_gain > 0.0 && self.decay_gain < 1.0) {
            return Err(ConfigError::InvalidDecayGain {
                decay_gain: self.decay_gain,
            });
        }
        if self.pluck_period_ms == 0 {
            return Err(ConfigError::InvalidPluckPeriod);
        }
        if !(self.impulse_duration_secs.is_finite() && self.impulse_duration_secs >= 0.0) {
            return Err(ConfigError::InvalidImpulseDuration {
                seconds: self.impulse_duration_secs,
            });
        }
        if !(self.max_amplitude.is_finite() && self.max_amplitude >= 0.0) {
            return Err(ConfigError::InvalidAmplitude {
                max_amplitude: self.max_amplitude,
            });
        }
        Ok(())
    }

    /// Number of noisy samples emitted per pluck at `sample_rate`.
    pub fn impulse_duration_samples(&self, sample_rate: f32) -> u32 {
        (self.impulse_duration_secs * sample_rate).round() as u32
    }
}

/// Everything needed to assemble an [`Engine`](crate::engine::Engine).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    pub voice: VoiceConfig,
    /// Equalization stages, applied in this order after the voices are summed.
    pub filters: Vec<FilterStage>,
    /// Initial master volume, clamped to [0, 1] when applied.
    pub master_volume: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            voice: VoiceConfig::default(),
            filters: FilterStage::default_chain().to_vec(),
            master_volume: 1.0,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_master_volume(mut self, volume: f32) -> Self {
        self.master_volume = volume;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_sample_rate(self.sample_rate)?;
        self.voice.validate()?;
        for stage in &self.filters {
            stage.validate(self.sample_rate)?;
        }
        Ok(())
    }
}

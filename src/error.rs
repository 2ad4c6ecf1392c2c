//! Construction-time errors.
//!
//! Everything here is raised while voices, chords or filter stages are being
//! built. Once an engine is running, rendering cannot fail.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("frequency must be positive and finite, got {frequency_hz} Hz")]
    InvalidFrequency { frequency_hz: f32 },

    #[error(
        "frequency {frequency_hz} Hz is too high for {sample_rate} Hz: delay line would be empty"
    )]
    EmptyDelayLine { frequency_hz: f32, sample_rate: f32 },

    #[error("sample rate must be positive and finite, got {sample_rate} Hz")]
    InvalidSampleRate { sample_rate: f32 },

    #[error("decay gain must lie strictly between 0 and 1, got {decay_gain}")]
    InvalidDecayGain { decay_gain: f32 },

    #[error("max amplitude must be finite and non-negative, got {max_amplitude}")]
    InvalidAmplitude { max_amplitude: f32 },

    #[error("impulse duration must be finite and non-negative, got {seconds} s")]
    InvalidImpulseDuration { seconds: f32 },

    #[error("pluck period must be at least 1 ms")]
    InvalidPluckPeriod,

    #[error("filter stage at {center_hz} Hz is outside (0, {nyquist}) Hz")]
    InvalidFilterFrequency { center_hz: f32, nyquist: f32 },

    #[error("filter gain must be finite, got {gain_db} dB")]
    InvalidFilterGain { gain_db: f32 },

    #[error("waveshaper curve needs at least 2 points, got {len}")]
    CurveTooShort { len: usize },
}

/// Shared sample-rate guard used by every constructor that depends on it.
pub(crate) fn check_sample_rate(sample_rate: f32) -> Result<(), ConfigError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSampleRate { sample_rate })
    }
}

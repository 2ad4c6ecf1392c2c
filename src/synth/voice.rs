use crate::{
    config::VoiceConfig,
    dsp::{
        delay::DelayLine,
        noise::{Excitation, WhiteNoise},
    },
    error::{check_sample_rate, ConfigError},
};

/*
Karplus-Strong Plucked String
=============================

A burst of noise is written into a delay line whose length is one period
of the target pitch. Every sample, the two oldest cells are averaged,
scaled by a loop gain just below 1, and written back:

  y[n] = excitation[n] + g * (y[n - N] + y[n - N + 1]) / 2

  N = round(sample_rate / frequency)

The averaging is a gentle lowpass inside the loop, so upper harmonics lose
energy on every trip around while the fundamental rings on. That uneven
decay is what makes the noise sound like a plucked string.

Plucking:
---------
The voice re-excites itself every `pluck_period_ms`. The check is a level
comparison against the clock, done at the top of each tick:

  now >= next_pluck_at  →  next_pluck_at = now + period, restart burst

If the clock jumps over several periods at once, only one pluck fires.
A fresh voice starts with its first burst already armed and schedules the
next pluck one period after its construction time.

  delay line (N cells)            burst (impulse_duration samples)
  ┌──┬──┬──┬──┬──┬──┐               │
  │  │  │  │  │  │  │ ←── avg·g ←───+──── output
  └──┴──┴──┴──┴──┴──┘
     ↑ write_pos
*/

pub struct Voice<X: Excitation = WhiteNoise> {
    frequency_hz: f32,
    delay: DelayLine,
    excitation: X,
    decay_gain: f32,
    max_amplitude: f32,
    pluck_period_ms: u64,
    next_pluck_at_ms: u64,
    impulse_duration_samples: u32,
    impulse_remaining: u32,
    plucks: u64,
}

impl Voice<WhiteNoise> {
    /// Voice excited by fresh white noise, first pluck armed at `now_ms`.
    pub fn new(
        frequency_hz: f32,
        config: &VoiceConfig,
        sample_rate: f32,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        Self::with_excitation(frequency_hz, config, sample_rate, now_ms, WhiteNoise::new())
    }
}

impl<X: Excitation> Voice<X> {
    pub fn with_excitation(
        frequency_hz: f32,
        config: &VoiceConfig,
        sample_rate: f32,
        now_ms: u64,
        excitation: X,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let delay_len = delay_length(frequency_hz, sample_rate)?;
        let impulse_duration_samples = config.impulse_duration_samples(sample_rate);

        tracing::debug!(
            frequency_hz,
            delay_len,
            impulse_duration_samples,
            "karplus-strong voice constructed"
        );

        Ok(Self {
            frequency_hz,
            delay: DelayLine::new(delay_len),
            excitation,
            decay_gain: config.decay_gain,
            max_amplitude: config.max_amplitude,
            pluck_period_ms: config.pluck_period_ms,
            next_pluck_at_ms: now_ms.saturating_add(config.pluck_period_ms),
            impulse_duration_samples,
            impulse_remaining: impulse_duration_samples,
            plucks: 1,
        })
    }

    /// Produce one output sample at wall-clock time `now_ms`.
    #[inline]
    pub fn tick(&mut self, now_ms: u64) -> f32 {
        if now_ms >= self.next_pluck_at_ms {
            self.next_pluck_at_ms = now_ms.saturating_add(self.pluck_period_ms);
            self.impulse_remaining = self.impulse_duration_samples;
            self.plucks += 1;
        }

        let excitation = if self.impulse_remaining > 0 {
            self.impulse_remaining -= 1;
            self.excitation.next_sample(self.max_amplitude)
        } else {
            0.0
        };

        let (current, next) = self.delay.current_pair();
        let filtered = self.decay_gain * (current + next) / 2.0;
        let sample = excitation + filtered;
        self.delay.write_and_advance(sample);

        sample
    }

    /// Fill `out` with consecutive samples, all stamped with the same time.
    pub fn render_block(&mut self, out: &mut [f32], now_ms: u64) {
        for sample in out.iter_mut() {
            *sample = self.tick(now_ms);
        }
    }

    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    pub fn delay_len(&self) -> usize {
        self.delay.len()
    }

    pub fn impulse_duration_samples(&self) -> u32 {
        self.impulse_duration_samples
    }

    pub fn next_pluck_at_ms(&self) -> u64 {
        self.next_pluck_at_ms
    }

    /// Number of excitations so far, including the one armed at construction.
    pub fn plucks(&self) -> u64 {
        self.plucks
    }

    /// Whether the current sample window still injects noise.
    pub fn is_exciting(&self) -> bool {
        self.impulse_remaining > 0
    }
}

/// `round(sample_rate / frequency_hz)`, rejecting anything that would leave
/// the waveguide without a single cell.
pub fn delay_length(frequency_hz: f32, sample_rate: f32) -> Result<usize, ConfigError> {
    check_sample_rate(sample_rate)?;
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return Err(ConfigError::InvalidFrequency { frequency_hz });
    }

    let len = (sample_rate / frequency_hz).round();
    if len < 1.0 {
        return Err(ConfigError::EmptyDelayLine {
            frequency_hz,
            sample_rate,
        });
    }
    Ok(len as usize)
}

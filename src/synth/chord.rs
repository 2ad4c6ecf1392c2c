use crate::{
    config::VoiceConfig,
    dsp::noise::{Excitation, WhiteNoise},
    engine::clock::Clock,
    error::ConfigError,
    synth::voice::Voice,
};

/// Open G, as strummed on six strings.
pub const G_MAJOR: &[f32] = &[98.0, 123.0, 147.0, 196.0, 294.0, 392.0];
/// Open A, five strings.
pub const A_MAJOR: &[f32] = &[110.0, 165.0, 220.0, 277.0, 329.0];
/// Open D, four strings.
pub const D_MAJOR: &[f32] = &[147.0, 220.0, 294.0, 370.0];

/// Look up one of the preset chords by name (`"G"`, `"A"` or `"D"`).
pub fn preset(name: &str) -> Option<&'static [f32]> {
    match name {
        "G" | "g" => Some(G_MAJOR),
        "A" | "a" => Some(A_MAJOR),
        "D" | "d" => Some(D_MAJOR),
        _ => None,
    }
}

/// Voices sharing a pluck period, one per frequency, summed without
/// normalisation: more strings sound louder.
pub struct Chord<X: Excitation = WhiteNoise> {
    voices: Vec<Voice<X>>,
}

impl Chord<WhiteNoise> {
    /// Build one noise-excited voice per frequency.
    ///
    /// Each voice reads the clock as it is constructed, so the voices of a
    /// chord pluck near-simultaneously rather than in exact lockstep.
    pub fn build(
        frequencies: &[f32],
        config: &VoiceConfig,
        sample_rate: f32,
        clock: &dyn Clock,
    ) -> Result<Self, ConfigError> {
        Self::build_with(frequencies, config, sample_rate, clock, |_| WhiteNoise::new())
    }
}

impl<X: Excitation> Chord<X> {
    /// Like [`Chord::build`], with the excitation for voice `i` supplied by
    /// `excitation(i)`.
    pub fn build_with(
        frequencies: &[f32],
        config: &VoiceConfig,
        sample_rate: f32,
        clock: &dyn Clock,
        mut excitation: impl FnMut(usize) -> X,
    ) -> Result<Self, ConfigError> {
        let voices = frequencies
            .iter()
            .enumerate()
            .map(|(i, &frequency_hz)| {
                Voice::with_excitation(
                    frequency_hz,
                    config,
                    sample_rate,
                    clock.now_ms(),
                    excitation(i),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(voices = voices.len(), ?frequencies, "chord built");

        Ok(Self { voices })
    }

    pub fn from_voices(voices: Vec<Voice<X>>) -> Self {
        Self { voices }
    }

    #[inline]
    pub fn tick(&mut self, now_ms: u64) -> f32 {
        self.voices.iter_mut().map(|voice| voice.tick(now_ms)).sum()
    }

    /// Overwrite `out` with the summed voices.
    pub fn render_block(&mut self, out: &mut [f32], now_ms: u64) {
        for sample in out.iter_mut() {
            *sample = self.tick(now_ms);
        }
    }

    pub fn voices(&self) -> &[Voice<X>] {
        &self.voices
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

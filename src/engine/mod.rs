//! The assembled signal path and the block loop that drives it.
//!
//!   chords (parallel voices) ──Σ──→ filter chain ──→ master gain ──→ sink
//!                                                          └──→ analyzer tap
//!
//! Everything is allocated when the engine is built. Rendering a block only
//! touches preallocated buffers, never locks and never fails.

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SampleClock, SystemClock};
pub use scheduler::BlockScheduler;

#[cfg(feature = "rtrb")]
use crate::graph::tap::AnalyzerTap;
use crate::{
    config::EngineConfig,
    error::ConfigError,
    graph::{chain::FilterChain, mixer::Mixer, mixer::VolumeHandle},
    synth::chord::Chord,
    MAX_BLOCK_SIZE,
};

pub struct Engine {
    sample_rate: f32,
    chords: Vec<Chord>,
    chain: FilterChain,
    mixer: Mixer,
    #[cfg(feature = "rtrb")]
    tap: Option<AnalyzerTap>,
    chord_buf: Vec<f32>,
}

impl Engine {
    /// Assemble an engine around already-built chords.
    pub fn new(config: &EngineConfig, chords: Vec<Chord>) -> Result<Self, ConfigError> {
        config.validate()?;
        let chain = FilterChain::new(&config.filters, config.sample_rate)?;

        tracing::info!(
            sample_rate = config.sample_rate,
            chords = chords.len(),
            voices = chords.iter().map(Chord::len).sum::<usize>(),
            stages = chain.len(),
            "engine assembled"
        );

        Ok(Self {
            sample_rate: config.sample_rate,
            chords,
            chain,
            mixer: Mixer::new(config.master_volume),
            #[cfg(feature = "rtrb")]
            tap: None,
            chord_buf: vec![0.0; MAX_BLOCK_SIZE],
        })
    }

    /// Build a single chord from `frequencies`, reading `clock` for each
    /// voice, and assemble an engine around it.
    pub fn with_chord(
        config: &EngineConfig,
        frequencies: &[f32],
        clock: &dyn clock::Clock,
    ) -> Result<Self, ConfigError> {
        let chord = Chord::build(frequencies, &config.voice, config.sample_rate, clock)?;
        Self::new(config, vec![chord])
    }

    /// Replace the filter chain, e.g. to append a waveshaper.
    pub fn with_chain(mut self, chain: FilterChain) -> Self {
        self.chain = chain;
        self
    }

    #[cfg(feature = "rtrb")]
    pub fn with_tap(mut self, tap: AnalyzerTap) -> Self {
        self.tap = Some(tap);
        self
    }

    pub fn volume_handle(&self) -> VolumeHandle {
        self.mixer.volume_handle()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    /// Overwrite `out` with the next samples, all stamped with `now_ms`.
    pub fn render_block(&mut self, out: &mut [f32], now_ms: u64) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            block.fill(0.0);

            for chord in &mut self.chords {
                let scratch = &mut self.chord_buf[..block.len()];
                chord.render_block(scratch, now_ms);
                for (o, &s) in block.iter_mut().zip(scratch.iter()) {
                    *o += s;
                }
            }

            self.chain.render(block);
            self.mixer.apply(block);

            #[cfg(feature = "rtrb")]
            if let Some(tap) = &mut self.tap {
                tap.push_block(block);
            }
        }
    }
}

//! KarplusApp - builder and audio setup

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use karplus::{
    analysis::FFT_SIZE,
    dsp::distortion::WaveShaper,
    engine::{BlockScheduler, Engine, SystemClock},
    graph::{analyzer_tap, FilterChain},
    synth::chord::D_MAJOR,
    EngineConfig,
};

use super::ui::UiApp;

/// Room for a few display frames of audio before the tap starts dropping.
const TAP_CAPACITY: usize = FFT_SIZE * 8;

pub struct KarplusApp {
    frequencies: Vec<f32>,
    volume: f32,
    shaper: Option<WaveShaper>,
}

impl KarplusApp {
    pub fn new() -> Self {
        Self {
            frequencies: D_MAJOR.to_vec(),
            volume: 1.0,
            shaper: None,
        }
    }

    /// Set the string frequencies to pluck, in Hz.
    pub fn chord(mut self, frequencies: &[f32]) -> Self {
        self.frequencies = frequencies.to_vec();
        self
    }

    /// Initial master volume in `[0, 1]`.
    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Append a waveshaper after the EQ stages.
    pub fn shaper(mut self, shaper: WaveShaper) -> Self {
        self.shaper = Some(shaper);
        self
    }

    /// Open the default output device and run the UI until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        tracing::info!(sample_rate, channels, "output device ready");

        let engine_config = EngineConfig::default()
            .with_sample_rate(sample_rate)
            .with_master_volume(self.volume);

        let clock = SystemClock::new();
        let mut engine = Engine::with_chord(&engine_config, &self.frequencies, &clock)
            .wrap_err("failed to build the chord")?;
        if let Some(shaper) = self.shaper {
            let chain = FilterChain::new(&engine_config.filters, sample_rate)?.with_shaper(shaper);
            engine = engine.with_chain(chain);
        }

        let (tap, reader) = analyzer_tap(TAP_CAPACITY, FFT_SIZE);
        let engine = engine.with_tap(tap);
        let volume = engine.volume_handle();
        let mut scheduler = BlockScheduler::new(engine, clock, channels);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| scheduler.fill_interleaved(data),
                |err| tracing::error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(reader, volume, sample_rate).run(&mut terminal);
        ratatui::restore();
        result
    }
}

impl Default for KarplusApp {
    fn default() -> Self {
        Self::new()
    }
}

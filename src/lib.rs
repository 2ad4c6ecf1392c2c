pub mod analysis; // Spectrum analysis for the display tap
pub mod config;
pub mod dsp;
pub mod engine; // Block scheduling, clocks and the assembled signal path
pub mod error;
pub mod graph; // Filter chain, master gain and analyzer tap
pub mod synth; // Karplus-Strong voices and chords

pub use config::{EngineConfig, VoiceConfig};
pub use error::ConfigError;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

//! Post-voice signal path.
//!
//! Voices are summed in parallel by their chords; everything after that is a
//! strictly linear path: the filter chain, the master gain, and a read-only
//! tap feeding the display.

/// Ordered equalization (and optional waveshaping) stages.
pub mod chain;
/// Master volume with a lock-free control handle.
pub mod mixer;
/// Non-blocking post-mix tap for the spectrum display.
#[cfg(feature = "rtrb")]
pub mod tap;

pub use chain::{ChainStage, FilterChain};
pub use mixer::{Mixer, VolumeHandle};
#[cfg(feature = "rtrb")]
pub use tap::{analyzer_tap, AnalyzerTap, TapReader};

//! Low-level DSP primitives used by voices and the filter chain.
//!
//! These components allocate only at construction and are realtime-safe
//! afterwards, so they can live directly inside voice structs and chain
//! stages.

/// Fixed-length circular buffer for waveguide state.
pub mod delay;
/// Waveshaping transfer curves.
pub mod distortion;
/// Shelf and peaking biquads.
pub mod filter;
/// Pluck excitation sources.
pub mod noise;

pub use filter::{FilterKind, FilterStage};
pub use noise::{Excitation, WhiteNoise};

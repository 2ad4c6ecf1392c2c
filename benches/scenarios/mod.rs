//! Real-world scenario benchmarks.
//!
//! These model what the output callback actually does: chords of plucked
//! strings, summed and run through the EQ chain and master gain.

mod chord;
mod engine;

pub use chord::bench_chord;
pub use engine::bench_engine;

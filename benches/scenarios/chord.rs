//! Benchmarks for single voices and preset chords.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus::{
    dsp::noise::WhiteNoise,
    engine::ManualClock,
    synth::{
        chord::{Chord, D_MAJOR, G_MAJOR},
        voice::Voice,
    },
    VoiceConfig,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_chord(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/chord");
    let config = VoiceConfig::default();
    let clock = ManualClock::new(0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // === SINGLE STRING ===
        let Ok(mut voice) = Voice::with_excitation(220.0, &config, SAMPLE_RATE, 0, WhiteNoise::seeded(1))
        else {
            continue;
        };
        group.bench_with_input(BenchmarkId::new("voice", size), &size, |b, _| {
            b.iter(|| voice.render_block(black_box(&mut buffer), black_box(0)))
        });

        // === PRESET CHORDS ===
        for (name, frequencies) in [("d_major", D_MAJOR), ("g_major", G_MAJOR)] {
            let Ok(mut chord) = Chord::build_with(frequencies, &config, SAMPLE_RATE, &clock, |i| {
                WhiteNoise::seeded(i as u64)
            }) else {
                continue;
            };
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| chord.render_block(black_box(&mut buffer), black_box(0)))
            });
        }

        // === RETRIGGER ===
        // every block crosses a pluck deadline, so the burst is always armed
        let Ok(mut chord) = Chord::build(D_MAJOR, &config, SAMPLE_RATE, &clock) else {
            continue;
        };
        let mut now = 0u64;
        group.bench_with_input(BenchmarkId::new("d_major_retrigger", size), &size, |b, _| {
            b.iter(|| {
                now += 1000;
                chord.render_block(black_box(&mut buffer), black_box(now));
            })
        });
    }

    group.finish();
}

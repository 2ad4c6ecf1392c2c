//! Benchmarks for the full output path.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus::{
    analysis::{SpectrumAnalyzer, FFT_SIZE},
    engine::{BlockScheduler, Engine, SampleClock},
    graph::analyzer_tap,
    synth::chord::D_MAJOR,
    EngineConfig,
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let config = EngineConfig::default().with_sample_rate(SAMPLE_RATE);

    for &size in BLOCK_SIZES {
        // chord -> EQ -> gain -> tap, stereo interleaved like the device callback
        let clock = SampleClock::new(SAMPLE_RATE);
        let Ok(engine) = Engine::with_chord(&config, D_MAJOR, &clock) else {
            continue;
        };
        let (tap, mut reader) = analyzer_tap(FFT_SIZE * 8, FFT_SIZE);
        let mut scheduler = BlockScheduler::new(engine.with_tap(tap), clock, 2);
        let mut data = vec![0.0f32; size * 2];

        group.bench_with_input(BenchmarkId::new("callback_stereo", size), &size, |b, _| {
            b.iter(|| {
                scheduler.fill_interleaved(black_box(&mut data));
                reader.poll();
            })
        });
    }

    // One display frame of analysis, off the audio thread
    let mut analyzer = SpectrumAnalyzer::new(FFT_SIZE, SAMPLE_RATE);
    let window: Vec<f32> = (0..FFT_SIZE)
        .map(|n| (2.0 * std::f32::consts::PI * 220.0 * n as f32 / SAMPLE_RATE).sin())
        .collect();
    group.bench_function("spectrum_update", |b| {
        b.iter(|| analyzer.update(black_box(&window)))
    });

    group.finish();
}

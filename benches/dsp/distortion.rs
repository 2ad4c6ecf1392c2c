//! Benchmarks for the curve waveshapers.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus::dsp::distortion::WaveShaper;

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    let classic = WaveShaper::classic();
    let asymmetric = WaveShaper::asymmetric();

    for &size in BLOCK_SIZES {
        // Signal driven past full scale to hit the clamped ends too
        let input: Vec<f32> = (0..size)
            .map(|i| ((i as f32 / size as f32) * 2.0 - 1.0) * 1.5)
            .collect();

        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("classic", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                classic.render(black_box(&mut buffer));
            })
        });

        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("asymmetric", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                asymmetric.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

//! Benchmarks for the shelving/peaking biquads.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus::dsp::filter::{Biquad, FilterStage};
use karplus::graph::FilterChain;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        let stages = [
            ("low_shelf", FilterStage::low_shelf(440.0, 15.0)),
            ("peaking", FilterStage::peaking(1000.0, 5.0)),
            ("high_shelf", FilterStage::high_shelf(2000.0, -15.0)),
        ];
        for (name, stage) in stages {
            let Ok(mut biquad) = Biquad::new(stage, SAMPLE_RATE) else {
                continue;
            };
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    biquad.render(black_box(&mut buffer));
                })
            });
        }

        // The three default stages in series
        let Ok(mut chain) = FilterChain::default_chain(SAMPLE_RATE) else {
            continue;
        };
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("default_chain", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                chain.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

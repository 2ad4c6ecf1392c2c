//! Benchmarks for the string delay line.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use karplus::dsp::delay::DelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    for &size in BLOCK_SIZES {
        // 44.1kHz / 147Hz, the lowest D chord string
        let mut line = DelayLine::new(300);
        group.bench_with_input(BenchmarkId::new("average_and_write", size), &size, |b, &n| {
            b.iter(|| {
                for _ in 0..n {
                    let (x, y) = line.current_pair();
                    line.write_and_advance(black_box(0.995 * 0.5 * (x + y)));
                }
            })
        });
    }

    group.finish();
}

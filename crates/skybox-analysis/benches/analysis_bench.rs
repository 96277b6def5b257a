//! Criterion benchmarks for skybox-analysis components
//!
//! Run with: cargo bench -p skybox-analysis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use skybox_analysis::{
    Fft, ResamplePolicy, Signal, bin_average, estimate_shift, linear_resample, spectrum,
    xcorr_full,
};
use std::f64::consts::PI;

const SAMPLE_RATE: f64 = 200.0;

/// Wave-gauge-like test signal: swell plus a short chop component
fn generate_waves(size: usize, rate: f64, delay: f64) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let t = i as f64 / rate - delay;
            0.8 * (2.0 * PI * 0.6 * t).sin() + 0.2 * (2.0 * PI * 2.3 * t).sin()
        })
        .collect()
}

fn time_axis(size: usize, rate: f64) -> Vec<f64> {
    (0..size).map(|i| i as f64 / rate).collect()
}

// ============================================================================
// Spectrum benchmarks
// ============================================================================

fn bench_fft_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT_Forward");

    for &size in &[1024, 4096, 16384] {
        let fft = Fft::new(size);
        let input = generate_waves(size, SAMPLE_RATE, 0.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(fft.forward(black_box(&input))));
        });
    }

    group.finish();
}

fn bench_spectrum(c: &mut Criterion) {
    let mut group = c.benchmark_group("Spectrum");

    for &size in &[1000, 12000, 72000] {
        let input = generate_waves(size, SAMPLE_RATE, 0.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(spectrum(black_box(&input), SAMPLE_RATE)));
        });
    }

    group.finish();
}

// ============================================================================
// Resampling and correlation benchmarks
// ============================================================================

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resample");
    let size = 24000;
    let input = generate_waves(size, SAMPLE_RATE, 0.0);
    let time = time_axis(size, SAMPLE_RATE);

    group.bench_function("bin_average_200_to_50", |b| {
        b.iter(|| black_box(bin_average(black_box(&input), SAMPLE_RATE, 50.0)));
    });
    group.bench_function("linear_200_to_800", |b| {
        b.iter(|| black_box(linear_resample(black_box(&input), &time, 800.0)));
    });

    group.finish();
}

fn bench_xcorr(c: &mut Criterion) {
    let mut group = c.benchmark_group("XCorr_Full");

    for &size in &[1024, 8192, 32768] {
        let x = generate_waves(size, SAMPLE_RATE, 0.0);
        let y = generate_waves(size, SAMPLE_RATE, 0.35);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(xcorr_full(black_box(&x), black_box(&y))));
        });
    }

    group.finish();
}

fn bench_estimate_shift(c: &mut Criterion) {
    let mut group = c.benchmark_group("Estimate_Shift");

    let fast_rate = SAMPLE_RATE;
    let slow_rate = SAMPLE_RATE / 4.0;
    let fast = generate_waves(12000, fast_rate, 0.0);
    let slow = generate_waves(3000, slow_rate, 0.35);
    let fast_time = time_axis(fast.len(), fast_rate);
    let slow_time = time_axis(slow.len(), slow_rate);

    for policy in [ResamplePolicy::Downsample, ResamplePolicy::Upsample] {
        group.bench_function(format!("{policy:?}"), |b| {
            b.iter(|| {
                black_box(estimate_shift(
                    &Signal::new(&fast, &fast_time, fast_rate),
                    &Signal::new(&slow, &slow_time, slow_rate),
                    policy,
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fft_forward,
    bench_spectrum,
    bench_resample,
    bench_xcorr,
    bench_estimate_shift,
);

criterion_main!(benches);

use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pitch_tuner::{
    detector::{
        autocorrelation::{AutocorrelationDetector, DetectorConfig, Method},
        internals::autocorrelation,
        PitchDetector,
    },
    note::Tuning,
    utils::buffer::new_real_buffer,
};

pub fn utils_benchmark(c: &mut Criterion) {
    let v = (0..1024)
        .map(|v| ((v as f64) / PI / 30.).sin())
        .collect::<Vec<f64>>();
    let vv = v.as_slice();
    let mut result: Vec<f64> = new_real_buffer(vv.len());

    c.bench_function("autocorrelation", |b| {
        b.iter(|| autocorrelation(black_box(vv), &mut result[..]))
    });

    let tuning = Tuning::<f64>::default();
    c.bench_function("note_and_cents", |b| {
        b.iter(|| tuning.note_and_cents(black_box(431.7)).unwrap())
    });
}

pub fn pitch_detect_benchmark(c: &mut Criterion) {
    const SAMPLE_RATE: usize = 44100;
    const SIZE: usize = 2048;

    // Signal coming from some source (microphone, generated, etc...)
    let dt = 1.0 / SAMPLE_RATE as f64;
    let freq = 300.0;
    let signal: Vec<f64> = (0..SIZE)
        .map(|x| (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
        .collect();

    let mut direct_detector = AutocorrelationDetector::new(SIZE);
    let mut fft_detector = AutocorrelationDetector::with_config(
        SIZE,
        DetectorConfig {
            method: Method::Fft,
            ..DetectorConfig::default()
        },
    );

    c.bench_function("Direct get_pitch", |b| {
        b.iter(|| {
            direct_detector
                .get_pitch(black_box(&signal), SAMPLE_RATE)
                .unwrap()
        });
    });

    c.bench_function("FFT get_pitch", |b| {
        b.iter(|| {
            fft_detector
                .get_pitch(black_box(&signal), SAMPLE_RATE)
                .unwrap()
        });
    });
}

criterion_group!(benches, pitch_detect_benchmark, utils_benchmark);
criterion_main!(benches);

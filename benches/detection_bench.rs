//! Performance benchmarks for redaction detection

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use redaction_dsp::features::stft::compute_stft;
use redaction_dsp::{analyze_redactions, DetectionConfig};

fn synthetic_recording(seconds: usize, sample_rate: usize) -> Vec<f32> {
    // Broadband noise with a low-pass filtered stretch in the middle
    let n = seconds * sample_rate;
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut samples: Vec<f32> = (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 40) as f32 / (1u64 << 24) as f32 - 0.5
        })
        .collect();

    let mut y = 0.0f32;
    for s in &mut samples[n / 3..n / 2] {
        y += 0.1 * (*s - y);
        *s = y;
    }
    samples
}

fn bench_analyze_redactions(c: &mut Criterion) {
    let samples = synthetic_recording(60, 16000);
    let config = DetectionConfig::default();

    c.bench_function("analyze_redactions_60s", |b| {
        b.iter(|| {
            let _ = analyze_redactions(black_box(&samples), black_box(16000), black_box(&config));
        });
    });
}

fn bench_stft(c: &mut Criterion) {
    let samples = synthetic_recording(60, 16000);

    c.bench_function("compute_stft_60s", |b| {
        b.iter(|| {
            let _ = compute_stft(black_box(&samples), black_box(16000), 512, 256);
        });
    });
}

criterion_group!(benches, bench_analyze_redactions, bench_stft);
criterion_main!(benches);

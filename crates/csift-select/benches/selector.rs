use criterion::{black_box, criterion_group, criterion_main, Criterion};

use csift_models::FrameMetric;
use csift_select::{analyze_asset, SelectConfig};

/// One hour of 1fps footage with a deterministic quality texture.
fn synthetic_frames(count: usize) -> Vec<FrameMetric> {
    (0..count)
        .map(|i| {
            let blur = if i % 97 == 0 {
                40.0
            } else {
                120.0 + (i % 13) as f64 * 10.0
            };
            let brightness = 90.0 + (i % 29) as f64 * 3.0;
            let motion = 1.0 + (i % 17) as f64 * 2.0;
            FrameMetric::new(i as f64, blur, brightness, 40.0, motion)
        })
        .collect()
}

fn bench_analyze_asset(c: &mut Criterion) {
    let frames = synthetic_frames(3600);
    let boundaries: Vec<f64> = (1..12).map(|i| i as f64 * 300.0).collect();
    let config = SelectConfig::default();

    c.bench_function("analyze_asset_1h_1fps", |b| {
        b.iter(|| analyze_asset(black_box(&frames), black_box(&boundaries), &config))
    });
}

criterion_group!(benches, bench_analyze_asset);
criterion_main!(benches);

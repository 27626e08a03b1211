//! Benchmarks for filter performance

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eye_blink_detection::filters::{
    exponential::ExponentialFilter, median::MedianFilter, moving_average::MovingAverageFilter,
    AngleFilter, NoFilter,
};

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    // Test data - simulating noisy yaw/roll measurements
    let test_data: Vec<(f32, f32)> = (0..100)
        .map(|i| {
            let t = i as f32 * 0.1;
            let yaw = 45.0 * t.sin() + 0.5 * rand::random::<f32>();
            let roll = 10.0 * t.cos() + 0.5 * rand::random::<f32>();
            (yaw, roll)
        })
        .collect();

    let filter_configs: Vec<(&str, Box<dyn AngleFilter>)> = vec![
        ("no_filter", Box::new(NoFilter)),
        ("moving_average_5", Box::new(MovingAverageFilter::new(5))),
        ("moving_average_15", Box::new(MovingAverageFilter::new(15))),
        ("exponential_0.5", Box::new(ExponentialFilter::new(0.5))),
        ("median_5", Box::new(MedianFilter::new(5))),
        ("median_9", Box::new(MedianFilter::new(9))),
    ];

    for (name, mut filter) in filter_configs {
        group.bench_function(name, |b| {
            b.iter(|| {
                for &(yaw, roll) in &test_data {
                    black_box(filter.apply(black_box(yaw), black_box(roll)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_filters);
criterion_main!(benches);

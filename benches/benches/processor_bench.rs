//! # Processor Benchmarks
//!
//! Measures the per-sample cost of the processing entry point with the
//! reference fusion backend.
//!
//! Run: `cargo bench --bench processor_bench`

use binsense_air::{
    AirConfig, AirQualityProcessor, BmeSample, EchoFusion, FusionOutput, MemoryStateStore,
    process_bme_data,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn sample(timestamp: i64) -> BmeSample {
    BmeSample {
        timestamp,
        temperature: 24.5,
        pressure: 101_325.0,
        humidity: 48.0,
        gas_resistance: 12_000.0,
    }
}

/// Benchmark processing with saves at different cadences
fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("processor");

    for interval in [1u64, 100, 10_000] {
        let config = AirConfig {
            save_interval: interval,
            ..AirConfig::default()
        };
        let fusion = EchoFusion::with_save_interval(interval);
        let Ok(mut processor) = AirQualityProcessor::new(fusion, MemoryStateStore::new(), config)
        else {
            continue;
        };

        let mut timestamp = 0i64;
        group.bench_function(format!("process_save_every_{interval}"), |b| {
            b.iter(|| {
                timestamp += 3_000_000_000;
                black_box(processor.process(&sample(timestamp)))
            })
        });
    }

    group.finish();
}

/// Benchmark the status-code entry point
fn bench_entry_point(c: &mut Criterion) {
    let Ok(mut processor) = AirQualityProcessor::new(
        EchoFusion::new(),
        MemoryStateStore::new(),
        AirConfig::default(),
    ) else {
        return;
    };
    let mut output = FusionOutput::default();
    let mut timestamp = 0i64;

    c.bench_function("process_bme_data", |b| {
        b.iter(|| {
            timestamp += 3_000_000_000;
            black_box(process_bme_data(&mut processor, &sample(timestamp), &mut output))
        })
    });
}

criterion_group!(benches, bench_process, bench_entry_point);
criterion_main!(benches);

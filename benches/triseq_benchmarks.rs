//! Triseq Benchmarks
//!
//! Benchmarks for the sequence dictionary, implemented with the Criterion
//! framework for statistical analysis and regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BatchSize, BenchmarkId,
    Criterion, SamplingMode, Throughput,
};
use std::time::Duration;

use triseq_lib::data_structures::seq_trie::{SequenceDictionary, SharedSequenceDictionary};

/// The `i`-th path of exactly `width` digits, most significant digit first.
fn ternary(mut i: usize, width: usize) -> String {
    let mut digits = vec![b'0'; width];
    for slot in digits.iter_mut().rev() {
        *slot = b'0' + (i % 3) as u8;
        i /= 3;
    }
    String::from_utf8(digits).unwrap_or_default()
}

/// A dictionary holding `count` paths of `width` digits.
fn populated(count: usize, width: usize) -> (SequenceDictionary, Vec<String>) {
    let mut dict = SequenceDictionary::new();
    let paths: Vec<String> = (0..count).map(|i| ternary(i, width)).collect();
    for path in &paths {
        dict.add(path).unwrap();
    }
    (dict, paths)
}

/// Benchmark insertion and lookup
fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq_trie_paths");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    // Bulk insertion with different path lengths
    for width in [8, 16, 32].iter() {
        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(BenchmarkId::new("add", width), width, |b, &width| {
            let paths: Vec<String> = (0..1000).map(|i| ternary(i * 7919, width)).collect();
            b.iter(|| {
                let mut dict = SequenceDictionary::new();
                for path in &paths {
                    black_box(dict.add(path).unwrap());
                }
            });
        });
    }

    // Lookup benchmark
    group.bench_function("exists", |b| {
        let (dict, paths) = populated(1000, 12);
        let mut index = 0;
        b.iter(|| {
            // Cycle through paths for lookups
            let path = &paths[index % paths.len()];
            index += 1;
            black_box(dict.exists(path).unwrap());
        });
    });

    group.finish();
}

/// Benchmark class merges and subtree deletion
fn bench_classes(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq_trie_classes");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));

    // Chain every path into one class
    for count in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("union_chain", count), count, |b, &count| {
            b.iter_batched(
                || populated(count, 10),
                |(mut dict, paths)| {
                    for pair in paths.windows(2) {
                        black_box(dict.union(&pair[0], &pair[1]).unwrap());
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    // Remove a subtree whose members share classes with the surviving half
    group.bench_function("remove_merged_subtree", |b| {
        b.iter_batched(
            || {
                let (mut dict, paths) = populated(1000, 10);
                let half = paths.len() / 2;
                for i in 0..half {
                    dict.union(&paths[i], &paths[i + half]).unwrap();
                }
                dict
            },
            |mut dict| black_box(dict.remove("0").unwrap()),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark the lock-protected handle
fn bench_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq_trie_shared");
    group.sampling_mode(SamplingMode::Flat);

    group.bench_function("add_and_union", |b| {
        let dict = SharedSequenceDictionary::new();
        dict.add("2").unwrap();
        let paths: Vec<String> = (0..1000).map(|i| ternary(i, 9)).collect();
        let mut index = 0;
        b.iter(|| {
            let path = &paths[index % paths.len()];
            index += 1;
            dict.add(path).unwrap();
            black_box(dict.union("2", path).unwrap());
        });
    });

    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_paths, bench_classes, bench_shared
}

criterion_main!(benches);

//! # Gas Benchmarks
//!
//! Measures diffusion (O(1)) and modulation (O(N) in node count).
//!
//! Run: `cargo bench --bench gas_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gasnet_core::*;

/// Ring of nodes with alternating gas channels, every third node silent
fn ring_network(n: usize) -> GasNetwork {
    let phenotypes = (0..n)
        .map(|i| match i % 3 {
            0 => NodePhenotype::emitter(GasChannel::Primary, 3.0, 6.0, 7),
            1 => NodePhenotype::emitter(GasChannel::Secondary, 2.0, 4.0, 7),
            _ => NodePhenotype::silent(7),
        })
        .collect();
    let emissions = (0..n)
        .map(|i| match i % 4 {
            0 => EmissionRecord::emitting_since(0),
            1 => EmissionRecord::stopped(0, 5),
            _ => EmissionRecord::dormant(),
        })
        .collect();
    let distances = (0..n)
        .map(|a| {
            (0..n)
                .map(|b| {
                    let d = a.abs_diff(b);
                    d.min(n - d) as f64
                })
                .collect()
        })
        .collect();

    GasNetwork { phenotypes, emissions, distances }
}

fn bench_diffusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("diffusion");

    let inside = DiffusionInput {
        emission: EmissionRecord::emitting_since(0),
        decay_rate: 3.0,
        t: 2,
        global_c: 1.0,
        distance: 2.5,
        gas_radius: 6.0,
    };
    let outside = DiffusionInput { distance: 7.0, ..inside };
    let decaying = DiffusionInput {
        emission: EmissionRecord::stopped(0, 5),
        t: 6,
        ..inside
    };

    group.bench_function("inside_radius", |b| {
        b.iter(|| black_box(diffusion(black_box(&inside))))
    });

    group.bench_function("outside_radius", |b| {
        b.iter(|| black_box(diffusion(black_box(&outside))))
    });

    group.bench_function("decaying", |b| {
        b.iter(|| black_box(diffusion(black_box(&decaying))))
    });

    group.finish();
}

fn bench_modulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("modulation");
    let constants = GasConstants::default();

    for size in [8, 64, 512] {
        let network = ring_network(size);

        group.bench_with_input(BenchmarkId::new("single_node", size), &network, |b, net| {
            b.iter(|| black_box(net.modulate_node(black_box(0), 6, &constants)))
        });

        group.bench_with_input(BenchmarkId::new("all_nodes", size), &network, |b, net| {
            b.iter(|| black_box(net.modulate_all(6, &constants)))
        });
    }

    group.finish();
}

fn bench_transfer_index(c: &mut Criterion) {
    c.bench_function("transfer_index_sweep", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for step in -20..=160 {
                total += transfer_index(black_box(step as f64 * 0.1), TRANSFER_TABLE_SIZE);
            }
            black_box(total)
        })
    });
}

criterion_group!(benches, bench_diffusion, bench_modulation, bench_transfer_index);

criterion_main!(benches);

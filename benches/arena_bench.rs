//! Benchmarks for arenars.
//!
//! Run with:
//!     cargo bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use arenars::{Arena, ArenaConfig};

fn bench_alloc_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc_release");

    // Different request sizes against a 1 MiB buffer
    for size in [16usize, 256, 4096] {
        let mut buf = vec![0u8; 1024 * 1024];

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("single", size), &size, |b, &size| {
            let mut arena = Arena::new(&mut buf).unwrap();
            b.iter(|| {
                let a = arena.alloc(black_box(size)).unwrap();
                arena.release(a.offset()).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_fill_and_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_and_drain");
    let count = 256;

    group.throughput(Throughput::Elements(count as u64));
    for (name, config) in [
        ("growable", ArenaConfig::default()),
        ("fixed", ArenaConfig::fixed_for(256 * 1024)),
    ] {
        let mut buf = vec![0u8; 256 * 1024];

        // Release in allocation order: each release merges with the previously freed chunk
        group.bench_function(BenchmarkId::new("fifo", name), |b| {
            let mut arena = Arena::with_config(&mut buf, config).unwrap();
            let mut live = Vec::with_capacity(count);
            b.iter(|| {
                for i in 0..count {
                    live.push(arena.alloc(64 + i % 7 * 16).unwrap());
                }
                for a in live.drain(..) {
                    arena.release(a.offset()).unwrap();
                }
            });
        });
    }

    group.finish();
}

fn bench_fragmented(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragmented");
    let mut buf = vec![0u8; 256 * 1024];

    // Every other chunk freed: first-fit has to walk past 64-byte holes to
    // reach the one 192-byte hole at the end of the buffer
    group.bench_function("first_fit_walk", |b| {
        let mut arena = Arena::new(&mut buf).unwrap();
        let allocs: Vec<_> = (0..512).map(|_| arena.alloc(64).unwrap()).collect();
        let rest = arena.free_size();
        arena.alloc(rest).unwrap();
        arena.release(allocs[1].offset()).unwrap();
        for a in allocs.iter().step_by(2) {
            arena.release(a.offset()).unwrap();
        }

        b.iter(|| {
            let a = arena.alloc(black_box(128)).unwrap();
            arena.release(a.offset()).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_alloc_release, bench_fill_and_drain, bench_fragmented);
criterion_main!(benches);

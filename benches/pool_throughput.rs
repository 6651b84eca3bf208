// Pool throughput benchmarks.
//
// Measures raw acquire/release overhead with diagnostics discarded, so the
// numbers reflect mutex handoff and bookkeeping only.

use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use slotpool::{NoopSink, PoolConfig, SlotPool};

fn quiet_pool(capacity: usize, object_size: usize) -> SlotPool {
    SlotPool::with_sink(PoolConfig::new(capacity, object_size), Arc::new(NoopSink)).unwrap()
}

fn bench_acquire_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("acquire_release");
    group.throughput(Throughput::Elements(1));

    group.bench_function("uncontended", |b| {
        let pool = quiet_pool(64, 256);
        b.iter(|| {
            let slot = pool.acquire().unwrap();
            black_box(slot);
            pool.release(slot).unwrap();
        });
    });

    group.bench_function("write_cycle", |b| {
        let pool = quiet_pool(64, 256);
        b.iter(|| {
            let slot = pool.acquire().unwrap();
            pool.with_slot_mut(slot, |bytes| bytes.fill(0x42)).unwrap();
            pool.release(slot).unwrap();
        });
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    group.throughput(Throughput::Elements(1));

    // 4 background threads churn the pool while the measured thread cycles
    group.bench_function("4_churning_threads", |b| {
        let pool = Arc::new(quiet_pool(256, 128));
        let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));

        let churners: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                let stop = Arc::clone(&stop);
                thread::spawn(move || {
                    while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                        if let Some(slot) = pool.acquire() {
                            pool.release(slot).unwrap();
                        }
                    }
                })
            })
            .collect();

        b.iter(|| {
            let slot = loop {
                match pool.acquire() {
                    Some(slot) => break slot,
                    None => thread::yield_now(),
                }
            };
            pool.release(slot).unwrap();
        });

        stop.store(true, std::sync::atomic::Ordering::Relaxed);
        for t in churners {
            t.join().unwrap();
        }
    });

    group.finish();
}

criterion_group!(benches, bench_acquire_release, bench_contended);
criterion_main!(benches);

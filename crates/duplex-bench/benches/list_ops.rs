//! Criterion micro-benchmarks for container-list ownership transfer.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use duplex_bench::filled_list;
use duplex_test_utils::ramp;
use duplex_wrap::{Vector, VectorList};

fn bench_push_pop(c: &mut Criterion) {
    c.bench_function("list_push_pop_owning_1k", |b| {
        b.iter(|| {
            let mut list = VectorList::new();
            for n in 0..1_000 {
                list.push_back(ramp(n % 8)).unwrap();
            }
            while let Some(v) = list.pop_back() {
                black_box(v.len());
            }
        });
    });

    c.bench_function("list_push_aliased_copy_1k", |b| {
        let mut source = ramp(64);
        b.iter(|| {
            let mut list = VectorList::new();
            for _ in 0..1_000 {
                let alias = Vector::alias(source.handle_mut().unwrap());
                list.push_back(alias).unwrap();
            }
            black_box(list.len())
        });
    });
}

fn bench_iter_mut(c: &mut Criterion) {
    let mut list = filled_list(256, 256).unwrap();
    c.bench_function("list_iter_mut_scale_256x256", |b| {
        b.iter(|| {
            for mut v in list.iter_mut() {
                for x in &mut v {
                    *x *= 1.000_001;
                }
            }
        });
    });
}

fn bench_remove_front(c: &mut Criterion) {
    c.bench_function("list_remove_front_256", |b| {
        b.iter(|| {
            let mut list = filled_list(256, 16).unwrap();
            while !list.is_empty() {
                black_box(list.remove(0));
            }
        });
    });
}

criterion_group!(benches, bench_push_pop, bench_iter_mut, bench_remove_front);
criterion_main!(benches);

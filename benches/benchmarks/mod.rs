use criterion::{black_box, Criterion};

pub fn work(x: u64) -> u64 {
    (0..64).fold(x, |acc, i| acc.wrapping_mul(31).wrapping_add(i))
}

/// 1000 calls with the same argument: one miss, then hits.
pub fn hit_1000(c: &mut Criterion, name: &str, call: impl Fn(u64) -> u64) {
    c.bench_function(&format!("{}/hit_1000", name), |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(call(black_box(42)));
            }
        })
    });
}

/// 1000 calls with a new argument each time: every call misses.
pub fn miss_1000(c: &mut Criterion, name: &str, call: impl Fn(u64) -> u64) {
    c.bench_function(&format!("{}/miss_1000", name), |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(call(black_box(i)));
            }
        })
    });
}

use criterion::{criterion_group, criterion_main, Criterion};
use lazy_eval::SyncCachedFunction;

mod benchmarks;

use benchmarks::{hit_1000, miss_1000, work};

fn sync_cached_function(c: &mut Criterion) {
    let f = SyncCachedFunction::new(work);

    hit_1000(c, "sync_cached_function", |x| f.call(x));
    miss_1000(c, "sync_cached_function", |x| f.call(x));
}

criterion_group!(benches, sync_cached_function);
criterion_main!(benches);

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;

use gcpolicy::memory_manager::*;
use gcpolicy::util::conversions::m;
use gcpolicy::GCPolicyBuilder;

// The decision is taken on every collection, so it should stay cheap.
pub fn bench_main(c: &mut Criterion) {
    let mut builder = GCPolicyBuilder::new_no_env_vars();
    builder.options.max_heap_size = 1 << 30;
    let gcpolicy = gcpolicy_init(&builder).unwrap();
    update_heap_occupancy(&gcpolicy, m(10), m(100), m(512));
    report_collection(&gcpolicy, false, 1000);

    c.bench_function("collect_completely", |b| {
        b.iter(|| collect_completely(std::hint::black_box(&gcpolicy)))
    });
    c.bench_function("heap_budget", |b| {
        b.iter(|| heap_budget(std::hint::black_box(&gcpolicy)))
    });
}

criterion_group!(benches, bench_main);
criterion_main!(benches);

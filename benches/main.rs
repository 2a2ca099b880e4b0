//! Benchmarks for the skiplist and the bloom filter.

#[macro_use]
extern crate criterion;


criterion_group!(
    benches,
    crate::skiplist::benchmark,
    crate::bloom_filter::benchmark
);
criterion_main!(benches);

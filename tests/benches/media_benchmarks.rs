//! # Media-Core Benchmarks
//!
//! | Component | Operation | Expectation |
//! |-----------|-----------|-------------|
//! | mf-01 Attribute Store | get/set | linear in attribute count |
//! | mf-01 Attribute Store | copy/compare | one lock per store |
//! | mf-02 Event Queue | enqueue/pop | constant per event |
//! | mf-02 Event Queue | begin/end | one notification per registration |

use criterion::{criterion_group, criterion_main, Criterion};
use std::time::Duration;

fn attribute_benchmarks(c: &mut Criterion) {
    mf_tests::benchmarks::mf_01_attributes::register_benchmarks(c);
}

fn event_queue_benchmarks(c: &mut Criterion) {
    mf_tests::benchmarks::mf_02_event_queue::register_benchmarks(c);
}

criterion_group!(
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(5));
    targets = attribute_benchmarks, event_queue_benchmarks
);
criterion_main!(benches);

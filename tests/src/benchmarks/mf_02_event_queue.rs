//! # MF-02 Event Queue Benchmarks
//!
//! - Enqueue/pop round trip with no subscriber
//! - Begin/end cycle through an inline scheduler
//! - Contended producers against one blocking consumer

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use mf_02_event_queue::{
    AsyncCallback, AsyncResult, EventQueue, EventType, InlineScheduler, MediaEvent,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

fn event() -> Arc<MediaEvent> {
    MediaEvent::of_type(EventType::MediaSample).into_shared()
}

pub fn bench_enqueue_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("mf-02-enqueue-pop");
    let queue = EventQueue::new(Arc::new(InlineScheduler));
    let shared = event();

    group.bench_function("single", |b| {
        b.iter(|| {
            queue.enqueue(Arc::clone(&shared)).unwrap_or(());
            black_box(queue.pop_blocking(true).is_ok())
        })
    });

    for batch in [16usize, 256] {
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(BenchmarkId::new("batch", batch), &batch, |b, &batch| {
            b.iter(|| {
                for _ in 0..batch {
                    queue.enqueue(Arc::clone(&shared)).unwrap_or(());
                }
                for _ in 0..batch {
                    black_box(queue.pop_blocking(true).is_ok());
                }
            })
        });
    }
    group.finish();
}

/// Keeps the last token handed to it.
#[derive(Default)]
struct LastToken(Mutex<Option<AsyncResult>>);

impl AsyncCallback for LastToken {
    fn invoke(&self, result: &AsyncResult) {
        *self.0.lock() = Some(result.clone());
    }
}

pub fn bench_begin_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("mf-02-begin-end");
    let queue = EventQueue::new(Arc::new(InlineScheduler));
    let callback = Arc::new(LastToken::default());
    let shared = event();

    group.bench_function("subscribe_enqueue_end", |b| {
        b.iter(|| {
            let _ = queue.begin_async(callback.clone(), None);
            queue.enqueue(Arc::clone(&shared)).unwrap_or(());
            if let Some(token) = callback.0.lock().take() {
                black_box(queue.end_async(&token).is_ok());
            }
        })
    });
    group.finish();
}

pub fn bench_contended_producers(c: &mut Criterion) {
    let mut group = c.benchmark_group("mf-02-contended");
    group.sample_size(20);

    for producers in [2usize, 4, 8] {
        const PER_PRODUCER: usize = 500;
        group.throughput(Throughput::Elements((producers * PER_PRODUCER) as u64));
        group.bench_with_input(
            BenchmarkId::new("producers", producers),
            &producers,
            |b, &producers| {
                b.iter(|| {
                    let queue = Arc::new(EventQueue::new(Arc::new(InlineScheduler)));
                    let handles: Vec<_> = (0..producers)
                        .map(|_| {
                            let queue = Arc::clone(&queue);
                            thread::spawn(move || {
                                for _ in 0..PER_PRODUCER {
                                    queue.enqueue(event()).unwrap_or(());
                                }
                            })
                        })
                        .collect();
                    for _ in 0..producers * PER_PRODUCER {
                        black_box(queue.pop_blocking(false).is_ok());
                    }
                    for handle in handles {
                        let _ = handle.join();
                    }
                })
            },
        );
    }
    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_enqueue_pop(c);
    bench_begin_end(c);
    bench_contended_producers(c);
}

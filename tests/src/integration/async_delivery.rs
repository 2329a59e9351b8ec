//! # Async Delivery
//!
//! The begin/end protocol running on the platform's standard work queue:
//!
//! 1. **Self-resubscribing consumer**: a callback that ends the request and
//!    immediately begins the next one sees every event exactly once
//! 2. **Burst coalescing**: many enqueues behind one registration produce
//!    one notification
//! 3. **Work queue teardown**: scheduling failures are counted, not returned

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::mpsc;
    use std::sync::{Arc, Weak};
    use std::thread;
    use std::time::Duration;

    use mf_02_event_queue::{
        next_event, AsyncCallback, AsyncResult, BeginStatus, DeferredScheduler, EventQueue,
        EventType, MediaEvent,
    };
    use mf_03_platform::{Platform, PlatformConfig, VERSION};
    use parking_lot::Mutex;
    use rand::seq::SliceRandom;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn started_platform() -> Platform {
        let platform = Platform::new(
            PlatformConfig::default()
                .with_worker_threads(2)
                .with_thread_name("async-delivery"),
        );
        platform.startup(VERSION).unwrap();
        platform
    }

    fn event(code: u32) -> Arc<MediaEvent> {
        MediaEvent::of_type(EventType::Custom(code)).into_shared()
    }

    /// Ends each request and begins the next one from inside the callback.
    struct ChainedConsumer {
        queue: Arc<EventQueue>,
        this: Weak<ChainedConsumer>,
        received: Mutex<Vec<u32>>,
        expected: usize,
        done: Mutex<mpsc::Sender<()>>,
    }

    impl ChainedConsumer {
        fn new(queue: Arc<EventQueue>, expected: usize, done: mpsc::Sender<()>) -> Arc<Self> {
            Arc::new_cyclic(|this| Self {
                queue,
                this: this.clone(),
                received: Mutex::new(Vec::new()),
                expected,
                done: Mutex::new(done),
            })
        }

        fn subscribe(&self) {
            if let Some(this) = self.this.upgrade() {
                self.queue.begin_async(this, None).unwrap();
            }
        }
    }

    impl AsyncCallback for ChainedConsumer {
        fn invoke(&self, result: &AsyncResult) {
            let event = self.queue.end_async(result).unwrap();
            let count = {
                let mut received = self.received.lock();
                received.push(event.event_type().code());
                received.len()
            };
            if count == self.expected {
                let _ = self.done.lock().send(());
            } else {
                self.subscribe();
            }
        }
    }

    // =============================================================================
    // SELF-RESUBSCRIBING CONSUMER
    // =============================================================================

    #[test]
    fn test_chained_consumer_receives_every_event_once() {
        let platform = started_platform();
        let queue = Arc::new(platform.create_event_queue().unwrap());
        let (done_tx, done_rx) = mpsc::channel();

        const PRODUCERS: u32 = 4;
        const PER_PRODUCER: u32 = 250;
        let consumer = ChainedConsumer::new(
            Arc::clone(&queue),
            (PRODUCERS * PER_PRODUCER) as usize,
            done_tx,
        );
        consumer.subscribe();

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut codes: Vec<u32> = (0..PER_PRODUCER)
                        .map(|seq| 10_000 + producer * PER_PRODUCER + seq)
                        .collect();
                    codes.shuffle(&mut rand::thread_rng());
                    for code in codes {
                        queue.enqueue(event(code)).unwrap();
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.join().unwrap();
        }

        done_rx.recv_timeout(Duration::from_secs(10)).unwrap();
        let received = consumer.received.lock().clone();
        let unique: HashSet<u32> = received.iter().copied().collect();
        assert_eq!(received.len(), 1000);
        assert_eq!(unique.len(), 1000);

        let metrics = queue.metrics().snapshot();
        assert_eq!(metrics.events_dequeued, 1000);
        assert!(metrics.notifications_scheduled <= 1000);
        assert_eq!(metrics.scheduling_failures, 0);

        queue.shutdown();
        platform.shutdown();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_next_event_on_platform_queue() {
        let platform = started_platform();
        let queue = Arc::new(platform.create_event_queue().unwrap());

        let producer = {
            let queue = Arc::clone(&queue);
            tokio::task::spawn_blocking(move || {
                for code in 0..50 {
                    queue.enqueue(event(20_000 + code)).unwrap();
                }
            })
        };

        let mut codes = Vec::new();
        for _ in 0..50 {
            let event = next_event(&queue).await.unwrap();
            codes.push(event.event_type().code());
        }
        producer.await.unwrap();

        let expected: Vec<u32> = (0..50).map(|code| 20_000 + code).collect();
        assert_eq!(codes, expected);

        queue.shutdown();
        platform.shutdown();
    }

    // =============================================================================
    // BURST COALESCING
    // =============================================================================

    struct Recorder(Mutex<Vec<AsyncResult>>);

    impl AsyncCallback for Recorder {
        fn invoke(&self, result: &AsyncResult) {
            self.0.lock().push(result.clone());
        }
    }

    #[test]
    fn test_burst_issues_single_notification() {
        let scheduler = Arc::new(DeferredScheduler::new());
        let queue = EventQueue::new(scheduler.clone());
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));

        assert_eq!(
            queue.begin_async(recorder.clone(), None).unwrap(),
            BeginStatus::Registered
        );
        for code in 0..10 {
            queue.enqueue(event(code)).unwrap();
        }
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.run_pending(), 1);

        let token = recorder.0.lock().pop().unwrap();
        let head = queue.end_async(&token).unwrap();
        assert_eq!(head.event_type(), EventType::Custom(0));
        assert_eq!(queue.len(), 9);
        assert!(!queue.has_subscriber());
    }

    // =============================================================================
    // WORK QUEUE TEARDOWN
    // =============================================================================

    #[test]
    fn test_enqueue_after_platform_shutdown_counts_failure() {
        let platform = started_platform();
        let queue = platform.create_event_queue().unwrap();
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        queue.begin_async(recorder.clone(), None).unwrap();

        platform.shutdown();
        assert!(!platform.is_locked());

        queue.enqueue(event(1)).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.metrics().snapshot().scheduling_failures, 1);
        assert!(recorder.0.lock().is_empty());
    }

    #[test]
    fn test_queues_share_one_work_queue() {
        let platform = started_platform();
        let work_queue = platform.work_queue().unwrap();
        let first = platform.create_event_queue().unwrap();
        let second = platform.create_event_queue().unwrap();
        let (tx, rx) = mpsc::channel();

        struct Forward(Mutex<mpsc::Sender<AsyncResult>>);
        impl AsyncCallback for Forward {
            fn invoke(&self, result: &AsyncResult) {
                let _ = self.0.lock().send(result.clone());
            }
        }
        let forward = Arc::new(Forward(Mutex::new(tx)));

        first.begin_async(forward.clone(), None).unwrap();
        second.begin_async(forward, None).unwrap();
        first.enqueue(event(1)).unwrap();
        second.enqueue(event(2)).unwrap();

        let mut tokens = vec![
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
            rx.recv_timeout(Duration::from_secs(5)).unwrap(),
        ];
        assert_eq!(work_queue.items_dispatched(), 2);

        // Each token only completes on the queue that issued it.
        let mut codes = Vec::new();
        for token in tokens.drain(..) {
            let event = first
                .end_async(&token)
                .or_else(|_| second.end_async(&token))
                .unwrap();
            codes.push(event.event_type().code());
        }
        codes.sort_unstable();
        assert_eq!(codes, vec![1, 2]);

        platform.shutdown();
    }
}

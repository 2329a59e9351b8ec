//! # Integration Test Flows
//!
//! Media objects built from the attribute store and the event queue:
//!
//! 1. **Source → consumer**: events produced by a source carry attributes
//!    that survive the trip through the queue
//! 2. **Object → object**: attribute copy between media objects
//! 3. **Buffers and collections**: sample memory and stream lists carried as
//!    event payloads
//! 4. **Shutdown**: every blocked consumer is released

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    use media_runtime::{keys, MediaSource, SourceState};
    use mf_01_attributes::{
        AttributeError, AttributeHost, AttributeStore, AttributeValue, Collection, MatchType,
        PropValue,
    };
    use mf_02_event_queue::{
        EventGenerator, EventQueue, EventType, InlineScheduler, MediaEvent, QueueError,
        ThreadScheduler,
    };
    use mf_04_media_buffer::{BufferError, MemoryBuffer};
    use proptest::prelude::*;
    use shared_types::{Guid, MediaError, ObjectHandle, StatusCode};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const MIME_TYPE: Guid = Guid::from_u128(0x4d49_4d45_0000_0000_0000_0000_0000_0001);
    const FRAME_RATE: Guid = Guid::from_u128(0x4d49_4d45_0000_0000_0000_0000_0000_0002);
    const DURATION: Guid = Guid::from_u128(0x4d49_4d45_0000_0000_0000_0000_0000_0003);
    const STREAMS: Guid = Guid::from_u128(0x4d49_4d45_0000_0000_0000_0000_0000_0004);

    fn descriptor() -> AttributeStore {
        let store = AttributeStore::new();
        store.set_string(MIME_TYPE, "video/h264").unwrap();
        store.set_u64(FRAME_RATE, (30 << 32) | 1).unwrap();
        store.set_double(DURATION, 12.5).unwrap();
        store
    }

    // =============================================================================
    // SOURCE → CONSUMER
    // =============================================================================

    #[test]
    fn test_blocking_consumer_sees_events_in_production_order() {
        let source = Arc::new(MediaSource::new("flows", 2, Arc::new(ThreadScheduler::new())).unwrap());

        let consumer = {
            let source = Arc::clone(&source);
            thread::spawn(move || {
                let mut seen = Vec::new();
                loop {
                    let event = source.get_event(false).unwrap();
                    seen.push(event.event_type());
                    if event.event_type() == EventType::EndOfPresentation {
                        return seen;
                    }
                }
            })
        };

        source.start().unwrap();
        source.deliver_sample(0, b"a").unwrap();
        source.deliver_sample(1, b"b").unwrap();
        source.end_of_presentation().unwrap();

        let seen = consumer.join().unwrap();
        assert_eq!(
            seen,
            vec![
                EventType::SourceStarted,
                EventType::StreamStarted,
                EventType::StreamStarted,
                EventType::MediaSample,
                EventType::MediaSample,
                EventType::EndOfStream,
                EventType::EndOfStream,
                EventType::EndOfPresentation,
            ]
        );
    }

    #[test]
    fn test_event_attributes_survive_queue() {
        let queue = EventQueue::new(Arc::new(InlineScheduler));
        let event = MediaEvent::of_type(EventType::NewStream);
        descriptor().copy_all_items(event.attributes()).unwrap();
        queue.enqueue(event.into_shared()).unwrap();

        let received = queue.get_event(true).unwrap();
        assert_eq!(received.attributes().get_string(&MIME_TYPE).unwrap(), "video/h264");
        assert!(received.attributes().compare(&descriptor(), MatchType::AllItems));
    }

    #[test]
    fn test_event_value_keeps_object_alive() {
        let queue = EventQueue::new(Arc::new(InlineScheduler));
        let stream = ObjectHandle::new(String::from("stream-0"));
        queue
            .queue_event_with_object(EventType::NewStream, Guid::NIL, StatusCode::OK, stream.clone())
            .unwrap();
        assert_eq!(stream.strong_count(), 2);

        let event = queue.get_event(true).unwrap();
        let held = event.value().as_object().unwrap();
        assert_eq!(held.downcast_ref::<String>().map(String::as_str), Some("stream-0"));

        drop(event);
        assert_eq!(stream.strong_count(), 1);
    }

    #[test]
    fn test_error_status_carried_in_event() {
        let queue = EventQueue::new(Arc::new(InlineScheduler));
        let err: MediaError = AttributeError::OutOfMemory.into();
        let status = StatusCode::from(&err);
        queue
            .queue_event(EventType::NonFatalError, Guid::NIL, status, PropValue::Empty)
            .unwrap();

        let event = queue.get_event(true).unwrap();
        assert!(event.status().is_failure());
        assert_eq!(event.status(), StatusCode::OUT_OF_MEMORY);
    }

    // =============================================================================
    // OBJECT → OBJECT
    // =============================================================================

    #[test]
    fn test_copy_into_source_attributes() {
        let source = MediaSource::new("copy", 1, Arc::new(InlineScheduler)).unwrap();
        descriptor().copy_all_items(source.attributes()).unwrap();

        // STREAM_COUNT, SOURCE_NAME plus three copied keys
        assert_eq!(source.attribute_count(), 5);
        assert!(source.attributes().compare(&descriptor(), MatchType::TheirItems));
        assert!(!source.attributes().compare(&descriptor(), MatchType::OurItems));
        assert_eq!(
            source.get_item(&keys::STREAM_COUNT).unwrap(),
            AttributeValue::U32(1)
        );
    }

    #[test]
    fn test_concurrent_copies_between_objects() {
        let a = Arc::new(descriptor());
        let b = Arc::new(AttributeStore::new());
        b.set_u32(Guid::from_u128(0xb), 11).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let (from, to) = if i % 2 == 0 {
                    (Arc::clone(&a), Arc::clone(&b))
                } else {
                    (Arc::clone(&b), Arc::clone(&a))
                };
                thread::spawn(move || {
                    for _ in 0..100 {
                        from.copy_all_items(&to).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(a.count(), 4);
        assert_eq!(b.count(), 4);
        assert!(a.compare(&b, MatchType::AllItems));
    }

    // =============================================================================
    // SHUTDOWN
    // =============================================================================

    #[test]
    fn test_source_shutdown_releases_blocked_consumers() {
        let source = Arc::new(MediaSource::new("shutdown", 1, Arc::new(InlineScheduler)).unwrap());
        let barrier = Arc::new(Barrier::new(4));

        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let source = Arc::clone(&source);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    source.get_event(false).map(|_| ())
                })
            })
            .collect();

        barrier.wait();
        thread::sleep(Duration::from_millis(50));
        source.shutdown();

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), Err(QueueError::ShutDown));
        }
        assert_eq!(source.state(), SourceState::ShutDown);
    }

    // =============================================================================
    // BUFFERS AND COLLECTIONS
    // =============================================================================

    #[test]
    fn test_sample_buffer_travels_as_event_object() {
        let queue = EventQueue::new(Arc::new(InlineScheduler));
        let buffer = MemoryBuffer::new(16).unwrap();
        buffer.lock()[..4].copy_from_slice(b"nal0");
        buffer.set_current_length(4).unwrap();
        assert_eq!(
            buffer.set_current_length(17),
            Err(BufferError::LengthExceedsMax { length: 17, max: 16 })
        );

        queue
            .queue_event_with_object(
                EventType::MediaSample,
                Guid::NIL,
                StatusCode::OK,
                ObjectHandle::new(buffer),
            )
            .unwrap();

        let event = queue.get_event(true).unwrap();
        let handle = event.value().as_object().unwrap();
        let received = handle.downcast_ref::<MemoryBuffer>().unwrap();
        assert_eq!(received.max_length(), 16);
        assert_eq!(received.to_vec(), b"nal0");
    }

    #[test]
    fn test_stream_collection_in_attributes() {
        let streams = Collection::new();
        let video = ObjectHandle::new(String::from("video"));
        let audio = ObjectHandle::new(String::from("audio"));
        streams.add_element(audio.clone()).unwrap();
        streams.insert_element_at(0, video.clone()).unwrap();

        let descriptor = descriptor();
        descriptor.set_object(STREAMS, ObjectHandle::new(streams)).unwrap();

        let copy = AttributeStore::new();
        descriptor.copy_all_items(&copy).unwrap();
        let held = copy.get_object(&STREAMS).unwrap();
        let streams = held.downcast_ref::<Collection>().unwrap();

        assert_eq!(streams.element_count(), 2);
        assert_eq!(streams.get_element(0).unwrap(), video);
        assert_eq!(streams.remove_element(0).unwrap(), Some(video));
        assert_eq!(streams.get_element(0).unwrap(), audio);
        assert_eq!(
            streams.get_element(1),
            Err(AttributeError::InvalidIndex { index: 1, count: 1 })
        );
    }

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    proptest! {
        #[test]
        fn prop_queue_preserves_enqueue_order(codes in proptest::collection::vec(1000u32..5000, 0..64)) {
            let queue = EventQueue::new(Arc::new(InlineScheduler));
            for &code in &codes {
                queue.enqueue(MediaEvent::of_type(EventType::Custom(code)).into_shared()).unwrap();
            }

            let mut popped = Vec::new();
            while let Ok(event) = queue.get_event(true) {
                popped.push(event.event_type().code());
            }
            prop_assert_eq!(popped, codes);
        }

        #[test]
        fn prop_copied_store_matches_source(values in proptest::collection::vec(any::<u32>(), 0..32)) {
            let source = AttributeStore::new();
            for (i, value) in values.iter().enumerate() {
                source.set_u32(Guid::from_u128(i as u128 + 1), *value).unwrap();
            }
            let event = MediaEvent::of_type(EventType::MediaSample);
            source.copy_all_items(event.attributes()).unwrap();

            prop_assert!(event.attributes().compare(&source, MatchType::AllItems));
            prop_assert_eq!(event.attribute_count(), values.len());
        }
    }
}

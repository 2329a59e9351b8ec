//! # Media-Core Benchmarks
//!
//! Criterion benchmarks per component, registered from
//! `benches/media_benchmarks.rs`.

pub mod mf_01_attributes;
pub mod mf_02_event_queue;

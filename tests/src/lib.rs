//! # Media-Core Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks per component
//! │   ├── mf_01_attributes.rs
//! │   └── mf_02_event_queue.rs
//! │
//! └── integration/      # Cross-crate scenarios
//!     ├── async_delivery.rs
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mf-tests
//!
//! # By category
//! cargo test -p mf-tests integration::
//!
//! # Benchmarks
//! cargo bench -p mf-tests
//! ```

pub mod benchmarks;
pub mod integration;

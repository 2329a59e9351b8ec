//! # Integration Scenarios
//!
//! Behaviour that only shows up when the store, the queue and the platform
//! work together on real threads.

pub mod async_delivery;
pub mod flows;

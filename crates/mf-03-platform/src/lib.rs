//! # Media Platform
//!
//! Process-wide lifetime for media-platform services. A [`Platform`] is a
//! counted resource: the first `startup` creates the [`StandardWorkQueue`]
//! that event queues use to deliver async notifications, and the release of
//! the last reference tears it down.
//!
//! ```no_run
//! use mf_03_platform::{Platform, PlatformConfig, VERSION};
//!
//! let platform = Platform::new(PlatformConfig::from_env());
//! platform.startup(VERSION).unwrap();
//! let queue = platform.create_event_queue().unwrap();
//! # drop(queue);
//! platform.shutdown();
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod work_queue;

pub use config::PlatformConfig;
pub use error::PlatformError;
pub use platform::{Platform, VERSION, VERSION_1, VERSION_2};
pub use work_queue::StandardWorkQueue;

//! Domain Layer - the store, the object collection, values and growth policy
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - One mutex per store; no operation holds two store locks at once

pub mod collection;
pub mod compare;
pub mod growth;
pub mod store;
pub mod typed;
pub mod value;

pub use collection::Collection;
pub use compare::MatchType;
pub use growth::{grown_capacity, reserve, MIN_CAPACITY};
pub use store::{Attribute, AttributeStore, LockedAttributes};
pub use value::{AttributeType, AttributeValue, PropValue};

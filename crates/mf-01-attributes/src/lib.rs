//! # MF-01 Attributes
//!
//! Keyed attribute store embedded by every media-platform object.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): the store itself
//!   - `AttributeStore`: ordered, key-unique, mutex-protected storage
//!   - `PropValue` / `AttributeValue`: tagged values (general / storable)
//!   - `Collection`: indexed list of object handles
//!   - `growth`: geometric capacity policy shared by the store and the collection
//!   - `MatchType`: whole-store comparison rules
//!
//! - **Ports Layer** (`ports/`): capability traits
//!   - `AttributeHost`: delegation for objects that embed a store
//!
//! ## Invariants
//!
//! - **count <= capacity** at all times
//! - **Unique keys**: setting an existing key overwrites in place
//! - **Owned payloads**: strings and blobs are copied in, object handles are
//!   reference-counted; the store releases them on overwrite, delete and drop
//! - **Newest first**: `get_item_by_index(0)` is the latest appended entry
//!
//! ## Usage Example
//!
//! ```
//! use mf_01_attributes::{AttributeStore, AttributeError, PropValue};
//! use shared_types::Guid;
//!
//! let store = AttributeStore::new();
//! let key = Guid::from_u128(7);
//!
//! store.set_item(key, "video/h264").unwrap();
//! assert_eq!(store.get_string(&key).unwrap(), "video/h264");
//!
//! // Unstorable tags are rejected and clear the existing entry.
//! assert_eq!(store.set_item(key, PropValue::Bool(true)), Err(AttributeError::InvalidType));
//! assert!(!store.contains(&key));
//! ```

pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use domain::{
    Attribute, AttributeStore, AttributeType, AttributeValue, Collection, LockedAttributes,
    MatchType, PropValue,
};
pub use error::AttributeError;
pub use ports::AttributeHost;

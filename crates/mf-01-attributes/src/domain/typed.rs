//! Typed accessors
//!
//! Convenience getters and setters for each storable tag. Getters fail with
//! `NotFound` when the key is absent and `TypeMismatch` when it holds a
//! different tag.

use crate::domain::store::AttributeStore;
use crate::domain::value::{AttributeType, AttributeValue};
use crate::error::AttributeError;
use shared_types::{Guid, ObjectHandle};

macro_rules! typed_getter {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $ty:ty, |$v:ident| $extract:expr) => {
        $(#[$meta])*
        pub fn $name(&self, key: &Guid) -> Result<$ty, AttributeError> {
            self.with_table(|table| match table.find(key) {
                Some(AttributeValue::$variant($v)) => Ok($extract),
                Some(other) => Err(AttributeError::TypeMismatch {
                    key: *key,
                    expected: AttributeType::$variant,
                    found: other.attribute_type(),
                }),
                None => Err(AttributeError::NotFound { key: *key }),
            })
        }
    };
}

impl AttributeStore {
    typed_getter!(get_u32, U32, u32, |v| *v);
    typed_getter!(get_u64, U64, u64, |v| *v);
    typed_getter!(get_double, Double, f64, |v| *v);
    typed_getter!(get_guid, Guid, Guid, |v| *v);
    typed_getter!(get_string, String, String, |v| v.clone());
    typed_getter!(
        /// Length in characters of a string attribute.
        get_string_length, String, usize, |v| v.chars().count()
    );
    typed_getter!(get_blob, Blob, Vec<u8>, |v| v.clone());
    typed_getter!(get_blob_size, Blob, usize, |v| v.len());
    typed_getter!(
        /// Another reference to a stored object handle.
        get_object, Object, ObjectHandle, |v| v.clone()
    );

    pub fn set_u32(&self, key: Guid, value: u32) -> Result<(), AttributeError> {
        self.set(key, AttributeValue::U32(value))
    }

    pub fn set_u64(&self, key: Guid, value: u64) -> Result<(), AttributeError> {
        self.set(key, AttributeValue::U64(value))
    }

    pub fn set_double(&self, key: Guid, value: f64) -> Result<(), AttributeError> {
        self.set(key, AttributeValue::Double(value))
    }

    pub fn set_guid(&self, key: Guid, value: Guid) -> Result<(), AttributeError> {
        self.set(key, AttributeValue::Guid(value))
    }

    /// Store a copy of `value`.
    pub fn set_string(&self, key: Guid, value: &str) -> Result<(), AttributeError> {
        self.set(key, AttributeValue::String(value.to_owned()))
    }

    /// Store a copy of `value`.
    pub fn set_blob(&self, key: Guid, value: &[u8]) -> Result<(), AttributeError> {
        self.set(key, AttributeValue::Blob(value.to_vec()))
    }

    pub fn set_object(&self, key: Guid, value: ObjectHandle) -> Result<(), AttributeError> {
        self.set(key, AttributeValue::Object(value))
    }
}

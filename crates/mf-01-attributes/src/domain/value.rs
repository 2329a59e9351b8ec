//! Attribute values
//!
//! [`PropValue`] is the general tagged value callers hand to the store and
//! that events carry as their scalar payload. Only the variants that map to
//! an [`AttributeType`] can be stored; the rest are rejected by
//! `set_item` with `InvalidType`.

use crate::error::AttributeError;
use serde::{Deserialize, Serialize};
use shared_types::{Guid, ObjectHandle};

/// The tags an attribute value may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    U32,
    U64,
    Double,
    Guid,
    String,
    Blob,
    Object,
}

/// A value that can live in an attribute store.
///
/// Every variant owns its payload. Cloning duplicates strings and blobs and
/// takes another reference on object handles.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    U32(u32),
    U64(u64),
    Double(f64),
    Guid(Guid),
    String(String),
    Blob(Vec<u8>),
    Object(ObjectHandle),
}

impl AttributeValue {
    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::U32(_) => AttributeType::U32,
            AttributeValue::U64(_) => AttributeType::U64,
            AttributeValue::Double(_) => AttributeType::Double,
            AttributeValue::Guid(_) => AttributeType::Guid,
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Blob(_) => AttributeType::Blob,
            AttributeValue::Object(_) => AttributeType::Object,
        }
    }
}

/// General tagged value.
///
/// A superset of [`AttributeValue`]: `Empty`, `Bool`, `I32`, `I64` and `F32`
/// are valid event payloads but not storable attribute values.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropValue {
    #[default]
    Empty,
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    U32(u32),
    U64(u64),
    Double(f64),
    Guid(Guid),
    String(String),
    Blob(Vec<u8>),
    Object(ObjectHandle),
}

impl PropValue {
    /// The attribute tag for this value, or `None` if it cannot be stored.
    #[must_use]
    pub fn attribute_type(&self) -> Option<AttributeType> {
        match self {
            PropValue::U32(_) => Some(AttributeType::U32),
            PropValue::U64(_) => Some(AttributeType::U64),
            PropValue::Double(_) => Some(AttributeType::Double),
            PropValue::Guid(_) => Some(AttributeType::Guid),
            PropValue::String(_) => Some(AttributeType::String),
            PropValue::Blob(_) => Some(AttributeType::Blob),
            PropValue::Object(_) => Some(AttributeType::Object),
            PropValue::Empty
            | PropValue::Bool(_)
            | PropValue::I32(_)
            | PropValue::I64(_)
            | PropValue::F32(_) => None,
        }
    }

    #[must_use]
    pub fn is_storable(&self) -> bool {
        self.attribute_type().is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, PropValue::Empty)
    }

    /// The object handle carried by this value, if any.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectHandle> {
        match self {
            PropValue::Object(handle) => Some(handle),
            _ => None,
        }
    }
}

impl TryFrom<PropValue> for AttributeValue {
    type Error = AttributeError;

    fn try_from(value: PropValue) -> Result<Self, Self::Error> {
        match value {
            PropValue::U32(v) => Ok(AttributeValue::U32(v)),
            PropValue::U64(v) => Ok(AttributeValue::U64(v)),
            PropValue::Double(v) => Ok(AttributeValue::Double(v)),
            PropValue::Guid(v) => Ok(AttributeValue::Guid(v)),
            PropValue::String(v) => Ok(AttributeValue::String(v)),
            PropValue::Blob(v) => Ok(AttributeValue::Blob(v)),
            PropValue::Object(v) => Ok(AttributeValue::Object(v)),
            PropValue::Empty
            | PropValue::Bool(_)
            | PropValue::I32(_)
            | PropValue::I64(_)
            | PropValue::F32(_) => Err(AttributeError::InvalidType),
        }
    }
}

impl From<AttributeValue> for PropValue {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::U32(v) => PropValue::U32(v),
            AttributeValue::U64(v) => PropValue::U64(v),
            AttributeValue::Double(v) => PropValue::Double(v),
            AttributeValue::Guid(v) => PropValue::Guid(v),
            AttributeValue::String(v) => PropValue::String(v),
            AttributeValue::Blob(v) => PropValue::Blob(v),
            AttributeValue::Object(v) => PropValue::Object(v),
        }
    }
}

macro_rules! impl_value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for AttributeValue {
                fn from(value: $source) -> Self {
                    AttributeValue::$variant(value.into())
                }
            }

            impl From<$source> for PropValue {
                fn from(value: $source) -> Self {
                    PropValue::$variant(value.into())
                }
            }
        )*
    };
}

impl_value_from! {
    u32 => U32,
    u64 => U64,
    f64 => Double,
    Guid => Guid,
    String => String,
    &str => String,
    Vec<u8> => Blob,
    &[u8] => Blob,
    ObjectHandle => Object,
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::I32(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::I64(value)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::F32(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storable_tags() {
        assert!(PropValue::from(1u32).is_storable());
        assert!(PropValue::from("x").is_storable());
        assert!(PropValue::from(vec![1u8, 2]).is_storable());
        assert!(!PropValue::Empty.is_storable());
        assert!(!PropValue::from(true).is_storable());
        assert!(!PropValue::from(-1i32).is_storable());
        assert!(!PropValue::from(1.5f32).is_storable());
    }

    #[test]
    fn test_try_from_rejects_non_storable() {
        assert_eq!(
            AttributeValue::try_from(PropValue::I64(3)),
            Err(AttributeError::InvalidType)
        );
        assert_eq!(
            AttributeValue::try_from(PropValue::U64(3)),
            Ok(AttributeValue::U64(3))
        );
    }

    #[test]
    fn test_attribute_type_agrees() {
        let value = AttributeValue::from(Guid::from_u128(9));
        assert_eq!(value.attribute_type(), AttributeType::Guid);
        assert_eq!(
            PropValue::from(value).attribute_type(),
            Some(AttributeType::Guid)
        );
    }

    #[test]
    fn test_clone_duplicates_buffers() {
        let original = AttributeValue::from("payload");
        let copy = original.clone();
        assert_eq!(original, copy);
        if let (AttributeValue::String(a), AttributeValue::String(b)) = (&original, &copy) {
            assert_ne!(a.as_ptr(), b.as_ptr());
        }
    }

    #[test]
    fn test_clone_retains_object() {
        let handle = ObjectHandle::new(5u8);
        let value = AttributeValue::from(handle.clone());
        let copy = value.clone();
        assert_eq!(handle.strong_count(), 3);
        drop(value);
        drop(copy);
        assert_eq!(handle.strong_count(), 1);
    }

    #[test]
    fn test_attribute_type_serde() {
        let json = serde_json::to_string(&AttributeType::Blob).unwrap();
        assert_eq!(json, "\"Blob\"");
    }
}

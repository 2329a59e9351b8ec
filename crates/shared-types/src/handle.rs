//! # External Object Handles
//!
//! Attribute values and event payloads may reference objects owned elsewhere.
//! A handle is a shared reference: cloning it bumps the reference count and
//! dropping it releases one.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Reference-counted handle to an arbitrary thread-safe object.
///
/// Equality is identity: two handles are equal when they point at the same
/// allocation.
#[derive(Clone)]
pub struct ObjectHandle(Arc<dyn Any + Send + Sync>);

impl ObjectHandle {
    /// Wrap a value in a new handle.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Adopt an existing shared allocation.
    pub fn from_arc(inner: Arc<dyn Any + Send + Sync>) -> Self {
        Self(inner)
    }

    /// Borrow the object as `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Get a typed shared reference to the object, if it is a `T`.
    #[must_use]
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.0).downcast::<T>().ok()
    }

    /// Whether both handles reference the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &ObjectHandle) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    /// Number of live handles (and other strong references) to the object.
    #[must_use]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl PartialEq for ObjectHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ObjectHandle {}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHandle({:p})", Arc::as_ptr(&self.0))
    }
}

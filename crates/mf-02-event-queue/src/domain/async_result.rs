//! # Async Completion Tokens
//!
//! The begin/end protocol pairs a caller-supplied callback with an optional
//! caller-supplied state object. `begin_async` wraps the pair in an
//! [`AsyncResult`]; the work scheduler later hands that token to the
//! callback, which passes it back to `end_async` to collect the event.
//!
//! Identity matters more than value here: a callback or state is "the same"
//! only if it is the same allocation.

use shared_types::ObjectHandle;
use std::fmt;
use std::sync::Arc;

/// Receiver of async completions.
///
/// Invoked exactly once per scheduled notification, on a scheduler thread.
pub trait AsyncCallback: Send + Sync {
    fn invoke(&self, result: &AsyncResult);
}

struct AsyncResultInner {
    callback: Arc<dyn AsyncCallback>,
    state: Option<ObjectHandle>,
}

/// Token for one pending async request.
///
/// Cheap to clone; clones compare equal by identity.
#[derive(Clone)]
pub struct AsyncResult {
    inner: Arc<AsyncResultInner>,
}

impl AsyncResult {
    #[must_use]
    pub fn new(callback: Arc<dyn AsyncCallback>, state: Option<ObjectHandle>) -> Self {
        Self {
            inner: Arc::new(AsyncResultInner { callback, state }),
        }
    }

    /// The caller-supplied state, if any.
    #[must_use]
    pub fn state(&self) -> Option<&ObjectHandle> {
        self.inner.state.as_ref()
    }

    #[must_use]
    pub fn callback(&self) -> &Arc<dyn AsyncCallback> {
        &self.inner.callback
    }

    /// Run the callback with this token.
    pub fn invoke(&self) {
        self.inner.callback.invoke(self);
    }

    /// Whether `callback` is the callback this token was created with.
    #[must_use]
    pub fn has_callback(&self, callback: &Arc<dyn AsyncCallback>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner.callback), Arc::as_ptr(callback))
    }

    /// Whether `state` is the state this token was created with.
    #[must_use]
    pub fn has_state(&self, state: Option<&ObjectHandle>) -> bool {
        match (self.inner.state.as_ref(), state) {
            (None, None) => true,
            (Some(ours), Some(theirs)) => ours.ptr_eq(theirs),
            _ => false,
        }
    }

    /// Whether both tokens are the same request.
    #[must_use]
    pub fn ptr_eq(&self, other: &AsyncResult) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for AsyncResult {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for AsyncResult {}

impl fmt::Debug for AsyncResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncResult")
            .field("token", &Arc::as_ptr(&self.inner))
            .field("state", &self.inner.state)
            .finish()
    }
}

/// Outcome of a successful `begin_async`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginStatus {
    /// A new subscription was registered.
    Registered,
    /// The same callback and state were already registered and have not been
    /// consumed yet. Nothing changed.
    AlreadyRegistered,
}

//! # 128-bit Identifiers
//!
//! Attribute keys, event extended types and well-known constants are all
//! 128-bit identifiers. Textual encoding is plain UUID formatting; the
//! registry-style encoding belongs to the registration layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A 128-bit identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Guid(Uuid);

impl Guid {
    /// The all-zero identifier.
    pub const NIL: Guid = Guid(Uuid::nil());

    /// Create an identifier from its 128-bit integer form.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Create a random identifier.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// The 128-bit integer form.
    #[must_use]
    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    /// Whether this is [`Guid::NIL`].
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for Guid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for Guid {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.braced())
    }
}

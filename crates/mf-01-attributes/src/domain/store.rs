//! Attribute store
//!
//! An ordered, key-unique sequence of attributes behind one mutex.
//!
//! ## Ordering
//!
//! Entries are kept in insertion order. Overwriting a key keeps its slot.
//! Deleting compacts the sequence without reordering the rest. Indexed
//! access counts from the newest entry: index 0 is the most recently
//! appended attribute.
//!
//! ## Locking
//!
//! Every operation takes the store's own lock for its whole duration.
//! Operations that involve a second store (`copy_all_items`, `compare`)
//! snapshot one side first so two store locks are never held together.

use crate::domain::compare::{self, MatchType};
use crate::domain::growth;
use crate::domain::value::{AttributeType, AttributeValue, PropValue};
use crate::error::AttributeError;
use parking_lot::{Mutex, MutexGuard};
use shared_types::Guid;
use std::fmt;
use tracing::trace;

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: Guid,
    pub value: AttributeValue,
}

/// The unlocked storage. All store operations funnel through here.
#[derive(Debug, Default)]
pub(crate) struct AttributeTable {
    items: Vec<Attribute>,
}

impl AttributeTable {
    fn with_capacity(size: usize) -> Result<Self, AttributeError> {
        let mut items = Vec::new();
        growth::reserve(&mut items, size.saturating_add(1))?;
        Ok(Self { items })
    }

    fn position(&self, key: &Guid) -> Option<usize> {
        self.items.iter().position(|a| a.key == *key)
    }

    pub(crate) fn find(&self, key: &Guid) -> Option<&AttributeValue> {
        self.items.iter().find(|a| a.key == *key).map(|a| &a.value)
    }

    fn get(&self, key: &Guid) -> Result<AttributeValue, AttributeError> {
        self.find(key)
            .cloned()
            .ok_or(AttributeError::NotFound { key: *key })
    }

    fn set(&mut self, key: Guid, value: AttributeValue) -> Result<(), AttributeError> {
        match self.position(&key) {
            Some(index) => {
                // Old payload is released by the assignment.
                self.items[index].value = value;
            }
            None => {
                let needed = self.items.len() + 1;
                growth::reserve(&mut self.items, needed)?;
                self.items.push(Attribute { key, value });
            }
        }
        trace!(key = %key, count = self.items.len(), "Attribute set");
        Ok(())
    }

    fn set_item(&mut self, key: Guid, value: PropValue) -> Result<(), AttributeError> {
        match AttributeValue::try_from(value) {
            Ok(value) => self.set(key, value),
            Err(err) => {
                // A rejected value still clears whatever the key held.
                self.delete(&key);
                trace!(key = %key, "Attribute cleared by invalid type");
                Err(err)
            }
        }
    }

    fn delete(&mut self, key: &Guid) -> Option<AttributeValue> {
        let index = self.position(key)?;
        let removed = self.items.remove(index);
        trace!(key = %key, count = self.items.len(), "Attribute deleted");
        Some(removed.value)
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn capacity(&self) -> usize {
        self.items.capacity()
    }

    fn by_index(&self, index: usize) -> Result<Attribute, AttributeError> {
        let count = self.items.len();
        if index >= count {
            return Err(AttributeError::InvalidIndex { index, count });
        }
        Ok(self.items[count - 1 - index].clone())
    }

    fn snapshot(&self) -> Vec<Attribute> {
        self.items.clone()
    }
}

/// Thread-safe attribute store.
///
/// # Example
///
/// ```
/// use mf_01_attributes::{AttributeStore, AttributeValue};
/// use shared_types::Guid;
///
/// let store = AttributeStore::new();
/// let key = Guid::from_u128(1);
/// store.set_item(key, 42u32).unwrap();
/// assert_eq!(store.get_item(&key).unwrap(), AttributeValue::U32(42));
/// ```
#[derive(Default)]
pub struct AttributeStore {
    table: Mutex<AttributeTable>,
}

impl AttributeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with room for `size` attributes.
    pub fn with_capacity(size: usize) -> Result<Self, AttributeError> {
        Ok(Self {
            table: Mutex::new(AttributeTable::with_capacity(size)?),
        })
    }

    /// Copy of the value stored under `key`.
    pub fn get_item(&self, key: &Guid) -> Result<AttributeValue, AttributeError> {
        self.table.lock().get(key)
    }

    /// Tag of the value stored under `key`.
    pub fn get_item_type(&self, key: &Guid) -> Result<AttributeType, AttributeError> {
        self.table
            .lock()
            .find(key)
            .map(AttributeValue::attribute_type)
            .ok_or(AttributeError::NotFound { key: *key })
    }

    #[must_use]
    pub fn contains(&self, key: &Guid) -> bool {
        self.table.lock().find(key).is_some()
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// Values whose tag cannot be stored fail with `InvalidType` and clear
    /// the existing entry for `key`. Callers rely on that clearing, so it is
    /// part of the contract.
    pub fn set_item(&self, key: Guid, value: impl Into<PropValue>) -> Result<(), AttributeError> {
        self.table.lock().set_item(key, value.into())
    }

    /// Store an already-validated value.
    pub fn set(&self, key: Guid, value: AttributeValue) -> Result<(), AttributeError> {
        self.table.lock().set(key, value)
    }

    /// Remove `key` if present. Absent keys are not an error.
    pub fn delete_item(&self, key: &Guid) {
        self.table.lock().delete(key);
    }

    /// Remove every attribute.
    pub fn delete_all_items(&self) {
        self.table.lock().clear();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.table.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.lock().capacity()
    }

    /// The `index`-th most recently appended attribute (0 = newest).
    pub fn get_item_by_index(&self, index: usize) -> Result<Attribute, AttributeError> {
        self.table.lock().by_index(index)
    }

    /// All attributes, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Attribute> {
        self.table.lock().snapshot()
    }

    /// Copy every attribute into `dest`, as if by repeated `set_item`.
    pub fn copy_all_items(&self, dest: &AttributeStore) -> Result<(), AttributeError> {
        if std::ptr::eq(self, dest) {
            return Ok(());
        }
        let items = self.snapshot();
        let mut table = dest.table.lock();
        for attribute in items {
            table.set(attribute.key, attribute.value)?;
        }
        Ok(())
    }

    /// Whether `key` is present with a value equal to `value`.
    #[must_use]
    pub fn compare_item(&self, key: &Guid, value: &PropValue) -> bool {
        let Ok(expected) = AttributeValue::try_from(value.clone()) else {
            return false;
        };
        self.table.lock().find(key) == Some(&expected)
    }

    /// Compare this store with `theirs` under the given match rule.
    #[must_use]
    pub fn compare(&self, theirs: &AttributeStore, match_type: MatchType) -> bool {
        if std::ptr::eq(self, theirs) {
            return true;
        }
        let their_items = theirs.snapshot();
        let ours = self.table.lock();
        compare::matches(&ours.items, &their_items, match_type)
    }

    /// Hold the store lock across several operations.
    ///
    /// Other threads block on this store until the guard is dropped.
    pub fn lock_store(&self) -> LockedAttributes<'_> {
        LockedAttributes {
            table: self.table.lock(),
        }
    }

    pub(crate) fn with_table<R>(&self, f: impl FnOnce(&AttributeTable) -> R) -> R {
        f(&self.table.lock())
    }
}

impl Clone for AttributeStore {
    fn clone(&self) -> Self {
        let items = self.snapshot();
        Self {
            table: Mutex::new(AttributeTable { items }),
        }
    }
}

impl fmt::Debug for AttributeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeStore")
            .field("items", &self.table.lock().items)
            .finish()
    }
}

/// Exclusive view of a store, returned by [`AttributeStore::lock_store`].
pub struct LockedAttributes<'a> {
    table: MutexGuard<'a, AttributeTable>,
}

impl LockedAttributes<'_> {
    pub fn get_item(&self, key: &Guid) -> Result<AttributeValue, AttributeError> {
        self.table.get(key)
    }

    pub fn set_item(
        &mut self,
        key: Guid,
        value: impl Into<PropValue>,
    ) -> Result<(), AttributeError> {
        self.table.set_item(key, value.into())
    }

    pub fn delete_item(&mut self, key: &Guid) {
        self.table.delete(key);
    }

    pub fn delete_all_items(&mut self) {
        self.table.clear();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.table.len()
    }

    pub fn get_item_by_index(&self, index: usize) -> Result<Attribute, AttributeError> {
        self.table.by_index(index)
    }
}

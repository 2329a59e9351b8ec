//! Object collection
//!
//! An indexed list of object handles behind one mutex. It shares the growth
//! policy of the attribute store.
//!
//! Inserting past the end pads the gap with empty slots. An empty slot can
//! be removed or overwritten by a later insert, but reading it fails with
//! `EmptySlot`.

use crate::domain::growth;
use crate::error::AttributeError;
use parking_lot::Mutex;
use shared_types::ObjectHandle;
use std::fmt;
use tracing::trace;

/// Thread-safe list of object handles.
#[derive(Default)]
pub struct Collection {
    elements: Mutex<Vec<Option<ObjectHandle>>>,
}

impl Collection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots, empty ones included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.lock().len()
    }

    /// Handle stored at `index`.
    pub fn get_element(&self, index: usize) -> Result<ObjectHandle, AttributeError> {
        let elements = self.elements.lock();
        match elements.get(index) {
            Some(Some(element)) => Ok(element.clone()),
            Some(None) => Err(AttributeError::EmptySlot { index }),
            None => Err(AttributeError::InvalidIndex {
                index,
                count: elements.len(),
            }),
        }
    }

    /// Append `element`.
    pub fn add_element(&self, element: ObjectHandle) -> Result<(), AttributeError> {
        let mut elements = self.elements.lock();
        let needed = elements.len() + 1;
        growth::reserve(&mut *elements, needed)?;
        elements.push(Some(element));
        trace!(count = elements.len(), "Collection element added");
        Ok(())
    }

    /// Remove the slot at `index` and shift the tail down by one.
    ///
    /// Returns the removed handle, or `None` if the slot was empty.
    pub fn remove_element(&self, index: usize) -> Result<Option<ObjectHandle>, AttributeError> {
        let mut elements = self.elements.lock();
        if index >= elements.len() {
            return Err(AttributeError::InvalidIndex {
                index,
                count: elements.len(),
            });
        }
        Ok(elements.remove(index))
    }

    /// Insert `element` at `index`.
    ///
    /// Within bounds the tail shifts up by one. Past the end the collection
    /// is padded with empty slots so `element` lands at `index`.
    pub fn insert_element_at(
        &self,
        index: usize,
        element: ObjectHandle,
    ) -> Result<(), AttributeError> {
        let mut elements = self.elements.lock();
        let count = elements.len();
        let needed = if index < count {
            count + 1
        } else {
            index.checked_add(1).ok_or(AttributeError::OutOfMemory)?
        };
        growth::reserve(&mut *elements, needed)?;

        if index < count {
            elements.insert(index, Some(element));
        } else {
            elements.resize(index, None);
            elements.push(Some(element));
        }
        trace!(index, count = elements.len(), "Collection element inserted");
        Ok(())
    }

    /// Release every handle and empty the collection.
    pub fn remove_all_elements(&self) {
        let drained = std::mem::take(&mut *self.elements.lock());
        drop(drained);
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("count", &self.element_count())
            .finish()
    }
}

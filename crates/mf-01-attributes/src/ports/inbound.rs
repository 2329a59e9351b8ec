//! Inbound Ports (Driving Ports)
//!
//! Samples, stream descriptors, events and sources all expose attribute
//! access. Instead of forwarding each call by hand, such an object implements
//! [`AttributeHost`] and inherits the accessors by delegation.

use crate::domain::{Attribute, AttributeStore, AttributeValue, MatchType, PropValue};
use crate::error::AttributeError;
use shared_types::Guid;

/// An object that owns an [`AttributeStore`].
pub trait AttributeHost {
    /// The embedded store.
    fn attributes(&self) -> &AttributeStore;

    fn get_item(&self, key: &Guid) -> Result<AttributeValue, AttributeError> {
        self.attributes().get_item(key)
    }

    fn set_item(&self, key: Guid, value: PropValue) -> Result<(), AttributeError> {
        self.attributes().set_item(key, value)
    }

    fn delete_item(&self, key: &Guid) {
        self.attributes().delete_item(key);
    }

    fn delete_all_items(&self) {
        self.attributes().delete_all_items();
    }

    fn attribute_count(&self) -> usize {
        self.attributes().count()
    }

    fn get_item_by_index(&self, index: usize) -> Result<Attribute, AttributeError> {
        self.attributes().get_item_by_index(index)
    }

    /// Copy every attribute into another host's store.
    fn copy_all_items(&self, dest: &dyn AttributeHost) -> Result<(), AttributeError> {
        self.attributes().copy_all_items(dest.attributes())
    }

    fn compare(&self, theirs: &dyn AttributeHost, match_type: MatchType) -> bool {
        self.attributes().compare(theirs.attributes(), match_type)
    }
}

impl AttributeHost for AttributeStore {
    fn attributes(&self) -> &AttributeStore {
        self
    }
}

//! Whole-store comparison rules

use crate::domain::store::Attribute;
use serde::{Deserialize, Serialize};

/// How two stores are compared by `AttributeStore::compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// Every attribute of ours is in theirs with an equal value.
    OurItems,
    /// Every attribute of theirs is in ours with an equal value.
    TheirItems,
    /// Both stores hold exactly the same attributes.
    AllItems,
    /// Attributes present in both stores have equal values.
    Intersection,
    /// Every attribute of the smaller store is in the larger one.
    Smaller,
}

fn contained_in(subset: &[Attribute], superset: &[Attribute]) -> bool {
    subset.iter().all(|ours| {
        superset
            .iter()
            .any(|theirs| theirs.key == ours.key && theirs.value == ours.value)
    })
}

/// Apply `match_type` to two attribute sequences.
#[must_use]
pub fn matches(ours: &[Attribute], theirs: &[Attribute], match_type: MatchType) -> bool {
    match match_type {
        MatchType::OurItems => contained_in(ours, theirs),
        MatchType::TheirItems => contained_in(theirs, ours),
        MatchType::AllItems => ours.len() == theirs.len() && contained_in(ours, theirs),
        MatchType::Intersection => ours.iter().all(|a| {
            theirs
                .iter()
                .find(|b| b.key == a.key)
                .map_or(true, |b| b.value == a.value)
        }),
        MatchType::Smaller => {
            if ours.len() <= theirs.len() {
                contained_in(ours, theirs)
            } else {
                contained_in(theirs, ours)
            }
        }
    }
}

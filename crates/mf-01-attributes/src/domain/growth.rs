//! Storage growth policy
//!
//! Capacity doubles from a floor of [`MIN_CAPACITY`] until it covers the
//! requested count, so appends are amortised O(1). Growth is capped at the
//! largest element count an allocation can describe; past that the request
//! fails with `OutOfMemory` instead of aborting.

use crate::error::AttributeError;
use std::mem;
use tracing::debug;

/// Smallest non-zero capacity handed out.
pub const MIN_CAPACITY: usize = 4;

/// Largest element count a `Vec<T>` can hold.
#[must_use]
pub fn max_elements<T>() -> usize {
    match mem::size_of::<T>() {
        0 => usize::MAX,
        size => isize::MAX as usize / size,
    }
}

/// Capacity needed to hold `count` elements starting from `current`.
///
/// Returns `None` when `count` exceeds `max`.
#[must_use]
pub fn grown_capacity(current: usize, count: usize, max: usize) -> Option<usize> {
    if count <= current {
        return Some(current);
    }
    if count > max {
        return None;
    }

    let mut capacity = current.max(MIN_CAPACITY);
    while capacity < count && capacity <= max / 2 {
        capacity *= 2;
    }
    if capacity < count {
        capacity = max;
    }
    Some(capacity)
}

/// Make room for `count` elements in `items`.
///
/// On failure `items` is untouched.
pub fn reserve<T>(items: &mut Vec<T>, count: usize) -> Result<(), AttributeError> {
    let current = items.capacity();
    let target = grown_capacity(current, count, max_elements::<T>())
        .ok_or(AttributeError::OutOfMemory)?;

    if target > current {
        items
            .try_reserve_exact(target - items.len())
            .map_err(|_| AttributeError::OutOfMemory)?;
        debug!(from = current, to = items.capacity(), "Attribute storage grown");
    }
    Ok(())
}

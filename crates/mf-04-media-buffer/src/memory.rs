//! Memory buffer
//!
//! A zero-initialised byte region of fixed capacity plus a current length
//! marking how much of it holds valid data. The current length never
//! exceeds the capacity.

use crate::error::BufferError;
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::ops::{Deref, DerefMut};
use tracing::trace;

struct BufferState {
    bytes: Vec<u8>,
    current: usize,
}

/// Fixed-capacity memory buffer.
pub struct MemoryBuffer {
    max_length: usize,
    state: Mutex<BufferState>,
}

impl MemoryBuffer {
    /// Allocate a buffer of `max_length` bytes with a current length of 0.
    pub fn new(max_length: usize) -> Result<Self, BufferError> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(max_length)
            .map_err(|_| BufferError::OutOfMemory { size: max_length })?;
        bytes.resize(max_length, 0);

        Ok(Self {
            max_length,
            state: Mutex::new(BufferState { bytes, current: 0 }),
        })
    }

    /// Allocate a buffer sized to `data` and fill it.
    pub fn from_slice(data: &[u8]) -> Result<Self, BufferError> {
        let buffer = Self::new(data.len())?;
        {
            let mut lock = buffer.lock();
            lock.copy_from_slice(data);
        }
        buffer.set_current_length(data.len())?;
        Ok(buffer)
    }

    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    #[must_use]
    pub fn current_length(&self) -> usize {
        self.state.lock().current
    }

    /// Mark the first `length` bytes as valid.
    pub fn set_current_length(&self, length: usize) -> Result<(), BufferError> {
        if length > self.max_length {
            return Err(BufferError::LengthExceedsMax {
                length,
                max: self.max_length,
            });
        }
        self.state.lock().current = length;
        trace!(length, max = self.max_length, "Buffer length set");
        Ok(())
    }

    /// Lock the buffer for direct access to the whole capacity.
    ///
    /// The guard dereferences to all `max_length` bytes; the buffer is
    /// unlocked when it drops.
    pub fn lock(&self) -> BufferLock<'_> {
        BufferLock {
            max_length: self.max_length,
            state: self.state.lock(),
        }
    }

    /// Copy of the valid bytes.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let state = self.state.lock();
        state.bytes[..state.current].to_vec()
    }
}

impl fmt::Debug for MemoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBuffer")
            .field("max_length", &self.max_length)
            .field("current_length", &self.current_length())
            .finish()
    }
}

/// Exclusive access to a locked [`MemoryBuffer`].
pub struct BufferLock<'a> {
    max_length: usize,
    state: MutexGuard<'a, BufferState>,
}

impl BufferLock<'_> {
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    #[must_use]
    pub fn current_length(&self) -> usize {
        self.state.current
    }

    /// Valid bytes only.
    #[must_use]
    pub fn valid(&self) -> &[u8] {
        &self.state.bytes[..self.state.current]
    }
}

impl Deref for BufferLock<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.state.bytes
    }
}

impl DerefMut for BufferLock<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.state.bytes
    }
}

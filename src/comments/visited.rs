//! Reusable backing buffers for the per-call visited set.
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Capacity of a freshly allocated buffer when the request is smaller.
const DEFAULT_CAPACITY: usize = 5000;

/// Free-list of `Vec<bool>` buffers shared by concurrent extractions.
///
/// Any free buffer may go to any caller. Contents are reset to `false` on
/// every acquire, so pooling never changes extraction output.
#[derive(Debug, Default)]
pub struct VisitedPool {
    free: Mutex<Vec<Vec<bool>>>,
}

impl VisitedPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a buffer of exactly `len` unclaimed slots.
    ///
    /// A pooled buffer too small for `len` is dropped and replaced.
    pub fn acquire(&self, len: usize) -> VisitedGuard<'_> {
        let pooled = self.lock().pop();
        let buf = match pooled {
            Some(mut buf) if buf.capacity() >= len => {
                buf.clear();
                buf.resize(len, false);
                buf
            }
            _ => {
                let mut buf = Vec::with_capacity(len.max(DEFAULT_CAPACITY));
                buf.resize(len, false);
                buf
            }
        };
        VisitedGuard { pool: self, buf }
    }

    /// Buffers currently waiting in the pool.
    pub fn available(&self) -> usize {
        self.lock().len()
    }

    fn release(&self, buf: Vec<bool>) {
        self.lock().push(buf);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Vec<bool>>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A pooled buffer, returned to its pool on drop.
#[derive(Debug)]
pub struct VisitedGuard<'p> {
    pool: &'p VisitedPool,
    buf: Vec<bool>,
}

impl Deref for VisitedGuard<'_> {
    type Target = [bool];

    fn deref(&self) -> &[bool] {
        &self.buf
    }
}

impl DerefMut for VisitedGuard<'_> {
    fn deref_mut(&mut self) -> &mut [bool] {
        &mut self.buf
    }
}

impl Drop for VisitedGuard<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

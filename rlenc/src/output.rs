//! Buffers produced by the codec.

use crate::Allocator;
use std::{fmt, mem::ManuallyDrop, ops::Deref};

/// An encoded or decoded byte sequence, owned together with the [Allocator] that produced it.
///
/// The buffer is returned to its allocator exactly once, when the [Output] is dropped (or
/// [Output::release]d). Failed operations never construct an [Output], so there is nothing to
/// release on error.
///
/// The underlying allocation may be larger than [Output::len] (the encoder reserves its
/// worst case up front); only the first [Output::len] bytes are exposed.
pub struct Output<'a, A: Allocator + ?Sized> {
    allocator: &'a A,
    buffer: ManuallyDrop<A::Buffer>,
    len: usize,
}

impl<'a, A: Allocator + ?Sized> Output<'a, A> {
    /// Allocates `capacity` bytes from `allocator`, with nothing written yet.
    pub(crate) fn allocate(allocator: &'a A, capacity: usize) -> Self {
        Self {
            allocator,
            buffer: ManuallyDrop::new(allocator.allocate(capacity)),
            len: 0,
        }
    }

    /// Returns the whole allocation, including bytes past [Output::len].
    pub(crate) fn spare_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut()
    }

    /// Marks the first `len` bytes of the allocation as written.
    pub(crate) fn set_len(&mut self, len: usize) {
        assert!(len <= self.buffer.as_ref().len(), "length exceeds allocation");
        self.len = len;
    }

    /// Returns the number of bytes produced.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the allocator that owns the buffer.
    pub fn allocator(&self) -> &'a A {
        self.allocator
    }

    /// Returns the buffer to its allocator.
    pub fn release(self) {
        drop(self);
    }
}

impl<A: Allocator + ?Sized> Deref for Output<'_, A> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.len]
    }
}

impl<A: Allocator + ?Sized> AsRef<[u8]> for Output<'_, A> {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl<A: Allocator + ?Sized> fmt::Debug for Output<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("len", &self.len)
            .field("data", &self.deref())
            .finish()
    }
}

impl<A: Allocator + ?Sized> Drop for Output<'_, A> {
    fn drop(&mut self) {
        // SAFETY: `buffer` is not touched again after being taken here.
        let buffer = unsafe { ManuallyDrop::take(&mut self.buffer) };
        self.allocator.deallocate(buffer);
    }
}

//! Allocators used for all codec memory traffic.
//!
//! The codec never allocates on its own. Every buffer handed to the caller is obtained
//! from an [Allocator] and returned to the same [Allocator] when the owning
//! [crate::Output] is dropped.

use crossbeam_queue::ArrayQueue;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A source of byte buffers.
///
/// `&self` is the allocator's context: implementations that keep state (free lists,
/// counters, arenas) use interior mutability. Concurrent codec calls sharing one allocator
/// are safe exactly when the allocator is [Sync].
pub trait Allocator {
    /// The buffer type handed out by this allocator.
    ///
    /// A buffer knows its own length, so it is returned to [Allocator::deallocate] with the
    /// same size it was allocated with.
    type Buffer: AsRef<[u8]> + AsMut<[u8]>;

    /// Allocates a buffer of exactly `len` bytes.
    ///
    /// The contents are unspecified. Allocation failure is handled according to the
    /// implementation's own contract (e.g. [System] aborts).
    fn allocate(&self, len: usize) -> Self::Buffer;

    /// Releases a buffer previously returned by [Allocator::allocate] on this allocator.
    fn deallocate(&self, buffer: Self::Buffer);
}

/// The global heap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct System;

impl Allocator for System {
    type Buffer = Box<[u8]>;

    fn allocate(&self, len: usize) -> Self::Buffer {
        vec![0; len].into_boxed_slice()
    }

    fn deallocate(&self, buffer: Self::Buffer) {
        drop(buffer);
    }
}

/// Configuration for a [Pool].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Smallest size class. Must be a power of two.
    pub min_size: usize,
    /// Largest size class. Must be a power of two and >= `min_size`.
    ///
    /// Larger requests are served by [System] and never retained.
    pub max_size: usize,
    /// Maximum number of idle buffers retained per size class. Must be non-zero.
    pub max_per_class: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_size: 64,
            max_size: 1 << 20,
            max_per_class: 16,
        }
    }
}

impl PoolConfig {
    /// Panics if the configuration is invalid.
    fn validate(&self) {
        assert!(
            self.min_size.is_power_of_two(),
            "min_size must be a power of two"
        );
        assert!(
            self.max_size.is_power_of_two(),
            "max_size must be a power of two"
        );
        assert!(self.min_size <= self.max_size, "min_size exceeds max_size");
        assert!(self.max_per_class > 0, "max_per_class must be non-zero");
    }

    /// Classes are: min_size, min_size*2, min_size*4, ..., max_size
    fn num_classes(&self) -> usize {
        (self.max_size / self.min_size).trailing_zeros() as usize + 1
    }

    /// Returns the smallest class that fits `size`, or `None` if `size > max_size`.
    fn class_index(&self, size: usize) -> Option<usize> {
        if size > self.max_size {
            return None;
        }
        if size <= self.min_size {
            return Some(0);
        }
        Some((size.next_power_of_two() / self.min_size).trailing_zeros() as usize)
    }

    const fn class_size(&self, index: usize) -> usize {
        self.min_size << index
    }
}

/// A buffer handed out by a [Pool].
///
/// The backing allocation is a whole size class; only the requested length is exposed.
#[derive(Debug)]
pub struct PoolBuf {
    buffer: Box<[u8]>,
    len: usize,
}

impl AsRef<[u8]> for PoolBuf {
    fn as_ref(&self) -> &[u8] {
        &self.buffer[..self.len]
    }
}

impl AsMut<[u8]> for PoolBuf {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.buffer[..self.len]
    }
}

/// An allocator that keeps released buffers for reuse.
///
/// Buffers are organized into power-of-two size classes between `min_size` and `max_size`.
/// A request is served from the smallest class that fits, falling back to [System] when that
/// class has no idle buffer. Each class retains at most `max_per_class` idle buffers, and
/// requests above `max_size` are never retained, so the memory held by an idle pool is
/// bounded by [Pool::max_retained_bytes].
#[derive(Debug)]
pub struct Pool {
    config: PoolConfig,
    classes: Vec<ArrayQueue<Box<[u8]>>>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl Pool {
    /// Creates an empty pool.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn new(config: PoolConfig) -> Self {
        config.validate();
        let classes = (0..config.num_classes())
            .map(|_| ArrayQueue::new(config.max_per_class))
            .collect();
        Self { config, classes }
    }

    /// Returns the pool's configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the number of idle buffers that could serve a request for `len` bytes.
    pub fn available(&self, len: usize) -> usize {
        self.config
            .class_index(len)
            .map_or(0, |index| self.classes[index].len())
    }

    /// Returns the number of bytes held by idle buffers.
    pub fn retained_bytes(&self) -> usize {
        self.classes
            .iter()
            .enumerate()
            .map(|(index, class)| class.len() * self.config.class_size(index))
            .sum()
    }

    /// Returns the most bytes idle buffers can ever hold.
    pub fn max_retained_bytes(&self) -> usize {
        (0..self.classes.len())
            .map(|index| self.config.max_per_class * self.config.class_size(index))
            .sum()
    }
}

impl Allocator for Pool {
    type Buffer = PoolBuf;

    fn allocate(&self, len: usize) -> Self::Buffer {
        let buffer = match self.config.class_index(len) {
            Some(index) => self.classes[index]
                .pop()
                .unwrap_or_else(|| System.allocate(self.config.class_size(index))),
            None => System.allocate(len),
        };
        PoolBuf { buffer, len }
    }

    fn deallocate(&self, buffer: Self::Buffer) {
        let buffer = buffer.buffer;
        let Some(index) = self.config.class_index(buffer.len()) else {
            // Oversized
            return;
        };
        if self.config.class_size(index) == buffer.len() {
            // Dropped if the class is already full
            let _ = self.classes[index].push(buffer);
        }
    }
}

/// Wraps an [Allocator] and counts the traffic flowing through it.
///
/// Useful to check that every buffer produced by the codec is released exactly once, and
/// that rejected input never allocates.
#[derive(Debug, Default)]
pub struct Tracking<A: Allocator> {
    inner: A,
    allocations: AtomicUsize,
    deallocations: AtomicUsize,
    live: AtomicUsize,
    outstanding: AtomicUsize,
}

impl<A: Allocator> Tracking<A> {
    /// Wraps `inner`.
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            allocations: AtomicUsize::new(0),
            deallocations: AtomicUsize::new(0),
            live: AtomicUsize::new(0),
            outstanding: AtomicUsize::new(0),
        }
    }

    /// Returns the wrapped allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Total number of calls to [Allocator::allocate].
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Relaxed)
    }

    /// Total number of calls to [Allocator::deallocate].
    pub fn deallocations(&self) -> usize {
        self.deallocations.load(Ordering::Relaxed)
    }

    /// Number of buffers allocated but not yet released.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// Number of bytes allocated but not yet released.
    pub fn outstanding_bytes(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }
}

impl<A: Allocator> Allocator for Tracking<A> {
    type Buffer = A::Buffer;

    fn allocate(&self, len: usize) -> Self::Buffer {
        let buffer = self.inner.allocate(len);
        self.allocations.fetch_add(1, Ordering::Relaxed);
        self.live.fetch_add(1, Ordering::Relaxed);
        self.outstanding.fetch_add(len, Ordering::Relaxed);
        buffer
    }

    fn deallocate(&self, buffer: Self::Buffer) {
        let len = buffer.as_ref().len();
        self.deallocations.fetch_add(1, Ordering::Relaxed);
        self.live.fetch_sub(1, Ordering::Relaxed);
        self.outstanding.fetch_sub(len, Ordering::Relaxed);
        self.inner.deallocate(buffer);
    }
}

//! Memory interfaces for reinforcement learning.
//!
//! A memory stores experiences collected by an agent and gives them back,
//! one at a time or in batches, for training. The interfaces are split in the
//! same way as the experience/replay buffer interfaces of most RL libraries:
//! [`Memory`] covers storage and single-item access, while [`BatchMemory`]
//! adds batch sampling on top of it.
use crate::error::MemoryError;

/// Interface for fixed-capacity memories.
///
/// # Examples
///
/// ```ignore
/// struct Stack<T> {
///     items: Vec<T>,
///     capacity: usize,
/// }
///
/// impl<T: Clone> Memory for Stack<T> {
///     type Item = T;
///
///     fn push(&mut self, item: T, _overwrite: bool) -> Result<(), MemoryError> {
///         if self.items.len() == self.capacity {
///             return Err(MemoryError::CapacityExceeded { capacity: self.capacity });
///         }
///         self.items.push(item);
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait Memory {
    /// The type of items stored in the memory.
    type Item;

    /// Pushes an item into the memory.
    ///
    /// If the memory is full, the item replaces the oldest one when
    /// `overwrite` is `true`; otherwise [`MemoryError::CapacityExceeded`]
    /// is returned and the memory is left untouched.
    fn push(&mut self, item: Self::Item, overwrite: bool) -> Result<(), MemoryError>;

    /// Removes and returns the last stored item.
    ///
    /// Returns [`MemoryError::EmptyBuffer`] if the memory has no items.
    fn pop(&mut self) -> Result<Self::Item, MemoryError>;

    /// Returns a uniformly sampled item without removing it.
    ///
    /// Returns [`MemoryError::EmptyBuffer`] if the memory has no items.
    fn sample_one(&mut self) -> Result<Self::Item, MemoryError>;

    /// Returns the total capacity of the memory.
    fn capacity(&self) -> usize;

    /// Returns the number of stored items.
    fn used(&self) -> usize;

    /// Returns the remaining capacity of the memory.
    fn available(&self) -> usize {
        self.capacity() - self.used()
    }
}

/// Interface for memories that generate batches for training.
pub trait BatchMemory: Memory {
    /// The type of batch generated for training.
    type Batch;

    /// Samples `size` distinct items uniformly at random, without replacement.
    ///
    /// Returns [`MemoryError::SampleSizeExceeded`] if `size` is larger than
    /// the number of stored items.
    fn sample_batch(&mut self, size: usize) -> Result<Self::Batch, MemoryError>;
}

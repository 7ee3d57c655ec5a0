//! Fixed-capacity replay memory.
use super::ReplayMemoryConfig;
use crate::{error::MemoryError, BatchMemory, Memory};
use log::{debug, trace};
use rand::{rngs::StdRng, seq::index, Rng, SeedableRng};
use std::slice::Iter;

/// A fixed-capacity circular replay memory.
///
/// Items are appended while the memory has room. Once it is full, a push
/// with `overwrite = true` replaces the item under the write cursor and
/// advances the cursor, so the oldest items are evicted first. Sampling,
/// single or batched, never removes items.
///
/// # Examples
///
/// ```rust
/// use rlblocks_core::{replay_memory::ReplayMemory, Memory};
///
/// let mut memory = ReplayMemory::<i32>::new(2)?;
/// memory.push(1, false)?;
/// memory.push(2, false)?;
/// assert!(memory.push(3, false).is_err());
///
/// memory.push(3, true)?;
/// assert_eq!(memory.as_slice(), &[3, 2]);
/// # Ok::<(), rlblocks_core::error::MemoryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReplayMemory<T> {
    capacity: usize,

    /// Write cursor, the next slot to overwrite once the memory is full.
    i: usize,

    items: Vec<T>,
    rng: StdRng,
}

impl<T> ReplayMemory<T> {
    /// Creates an empty memory with the given capacity and the default seed.
    pub fn new(capacity: usize) -> Result<Self, MemoryError> {
        Self::build(&ReplayMemoryConfig::default().capacity(capacity))
    }

    /// Creates an empty memory from a configuration.
    pub fn build(config: &ReplayMemoryConfig) -> Result<Self, MemoryError> {
        Self::from_sequence(Vec::new(), config)
    }

    /// Creates a memory prefilled with `items`, stored in the given order.
    ///
    /// The write cursor starts at `config.position`.
    pub fn from_sequence(items: Vec<T>, config: &ReplayMemoryConfig) -> Result<Self, MemoryError> {
        let capacity = config.capacity;
        if capacity == 0 {
            return Err(MemoryError::InvalidCapacity);
        }
        if config.position >= capacity {
            return Err(MemoryError::InvalidPosition {
                position: config.position,
                capacity,
            });
        }
        if items.len() > capacity {
            return Err(MemoryError::CapacityExceeded { capacity });
        }

        let mut items = items;
        items
            .try_reserve_exact(capacity - items.len())
            .map_err(|_| MemoryError::AllocationFailed { capacity })?;
        debug!(
            "Built replay memory: capacity = {}, len = {}, position = {}",
            capacity,
            items.len(),
            config.position
        );

        Ok(Self {
            capacity,
            i: config.position,
            items,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Creates a memory prefilled with the items of an iterator.
    pub fn from_iter_with_config(
        iter: impl IntoIterator<Item = T>,
        config: &ReplayMemoryConfig,
    ) -> Result<Self, MemoryError> {
        Self::from_sequence(iter.into_iter().collect(), config)
    }

    /// Returns the number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the memory has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the memory holds `capacity` items.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Returns the position of the write cursor.
    pub fn position(&self) -> usize {
        self.i
    }

    /// Returns the stored items in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the stored items in storage order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.items.iter()
    }

    /// Removes all items and resets the write cursor.
    pub fn clear(&mut self) {
        self.items.clear();
        self.i = 0;
    }

    /// Draws `size` distinct slot indices.
    fn sample_indices(&mut self, size: usize) -> Result<Vec<usize>, MemoryError> {
        let len = self.items.len();
        if size > len {
            return Err(MemoryError::SampleSizeExceeded {
                requested: size,
                available: len,
            });
        }
        Ok(index::sample(&mut self.rng, len, size).into_vec())
    }
}

impl<T: Clone> Memory for ReplayMemory<T> {
    type Item = T;

    fn push(&mut self, item: T, overwrite: bool) -> Result<(), MemoryError> {
        if self.items.len() < self.capacity {
            self.items.push(item);
        } else if overwrite {
            trace!("Overwrites slot {} of the replay memory", self.i);
            self.items[self.i] = item;
            self.i = (self.i + 1) % self.capacity;
        } else {
            return Err(MemoryError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn pop(&mut self) -> Result<T, MemoryError> {
        let item = self.items.pop().ok_or(MemoryError::EmptyBuffer)?;
        self.i = if self.i == 0 {
            self.capacity - 1
        } else {
            self.i - 1
        };
        Ok(item)
    }

    fn sample_one(&mut self) -> Result<T, MemoryError> {
        if self.items.is_empty() {
            return Err(MemoryError::EmptyBuffer);
        }
        let ix = self.rng.gen_range(0..self.items.len());
        Ok(self.items[ix].clone())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn used(&self) -> usize {
        self.items.len()
    }
}

impl<T: Clone> BatchMemory for ReplayMemory<T> {
    type Batch = Vec<T>;

    fn sample_batch(&mut self, size: usize) -> Result<Vec<T>, MemoryError> {
        let ixs = self.sample_indices(size)?;
        Ok(ixs.into_iter().map(|ix| self.items[ix].clone()).collect())
    }
}

impl<'a, T> IntoIterator for &'a ReplayMemory<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

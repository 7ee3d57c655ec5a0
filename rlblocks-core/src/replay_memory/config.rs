//! Configuration of [`ReplayMemory`](super::ReplayMemory).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ReplayMemory`](super::ReplayMemory).
///
/// # Examples
///
/// ```rust
/// use rlblocks_core::replay_memory::ReplayMemoryConfig;
///
/// let config = ReplayMemoryConfig::default()
///     .capacity(1000)
///     .seed(7);
/// assert_eq!(config.capacity, 1000);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone)]
pub struct ReplayMemoryConfig {
    /// Maximum number of items held by the memory.
    pub capacity: usize,

    /// Seed of the random number generator used for sampling.
    pub seed: u64,

    /// Initial position of the write cursor.
    ///
    /// Only matters for memories built from an initial sequence of items;
    /// the cursor is used once the memory is full and items are overwritten.
    #[serde(default)]
    pub position: usize,
}

impl Default for ReplayMemoryConfig {
    fn default() -> Self {
        Self {
            capacity: 10000,
            seed: 42,
            position: 0,
        }
    }
}

impl ReplayMemoryConfig {
    /// Sets the capacity of the memory.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the random seed for sampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the initial position of the write cursor.
    pub fn position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

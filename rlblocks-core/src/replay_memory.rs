//! Fixed-capacity replay memory with overwrite and sampling.
//!
//! [`ReplayMemory`] stores up to `capacity` items. Once full, pushes either
//! fail or, when overwriting is allowed, replace the oldest item in circular
//! order. Items are sampled uniformly at random, one at a time or as a batch
//! of distinct items.
//!
//! ```rust
//! use rlblocks_core::{
//!     replay_memory::{ReplayMemory, ReplayMemoryConfig},
//!     BatchMemory, Memory,
//! };
//!
//! let config = ReplayMemoryConfig::default().capacity(100).seed(1);
//! let mut memory = ReplayMemory::from_iter_with_config(0..50, &config)?;
//! memory.push(50, false)?;
//!
//! let batch = memory.sample_batch(8)?;
//! assert_eq!(batch.len(), 8);
//! # Ok::<(), rlblocks_core::error::MemoryError>(())
//! ```
mod base;
mod config;
mod transition;
pub use base::ReplayMemory;
pub use config::ReplayMemoryConfig;
pub use transition::{Transition, TransitionBatch};

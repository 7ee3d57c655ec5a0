//! Building blocks for reinforcement learning experiments.
//!
//! This crate is just a collection of examples; the blocks themselves live in
//! [rlblocks-core](rlblocks_core) and are re-exported here.
//!
//! * [`replay_memory`] - fixed-capacity replay memory with overwrite and
//!   uniform sampling.
//! * [`explorer`] - softmax and epsilon-greedy action selection.
//!
//! Run the random walk example with
//!
//! ```bash
//! RUST_LOG=info cargo run --example random_walk_replay -- --capacity 500 --steps 5000
//! ```
pub use rlblocks_core::{error, explorer, replay_memory, BatchMemory, Memory};

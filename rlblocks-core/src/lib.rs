#![warn(missing_docs)]
//! Building blocks for reinforcement learning experiments.
//!
//! * [`replay_memory`] - a fixed-capacity replay memory with overwrite and
//!   uniform sampling, and the [`Transition`](replay_memory::Transition)
//!   records usually stored in it.
//! * [`explorer`] - softmax and epsilon-greedy action selection.
//! * [`Memory`] and [`BatchMemory`] - the interfaces a memory implements.
pub mod error;
pub mod explorer;
pub mod replay_memory;

mod base;
pub use base::{BatchMemory, Memory};

//! Core interfaces.
mod memory;
pub use memory::{BatchMemory, Memory};

//! Persistence adapters.
//!
//! The shipped adapter keeps everything in process memory behind the driven
//! ports. Swapping in a database later means implementing the same traits.

pub mod memory;

pub use memory::InMemoryStore;

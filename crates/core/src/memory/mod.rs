//! Simulated main memory.
//!
//! Provides the fixed-partition table and its best-fit allocator.

/// Fixed-partition memory allocator.
pub mod partition;

pub use partition::{MemoryTable, Partition};

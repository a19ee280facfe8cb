//! Interrupt handling.
//!
//! This module provides:
//! 1. **Tables:** The vector table (ISR addresses) and the device delay table (ISR durations).
//! 2. **Dispatch:** The canonical kernel entry sequence shared by all trapping activities.

/// Interrupt entry sequence.
pub mod dispatch;

/// Vector and delay tables.
pub mod tables;

pub use dispatch::dispatch;
pub use tables::{DelayTable, VectorTable};

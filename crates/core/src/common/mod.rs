//! Common types shared by every simulator component.
//!
//! This module provides:
//! 1. **Constants:** Fixed event timings, labels and output file names.
//! 2. **Error Handling:** The [`SimError`] type and the [`SimResult`] alias.

/// Fixed timings, labels and file names.
pub mod constants;

/// Error type for all fatal simulator conditions.
pub mod error;

pub use error::{SimError, SimResult};

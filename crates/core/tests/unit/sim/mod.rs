//! # Trace Interpretation Tests

/// Same inputs and seed give identical logs; clock invariants hold.
pub mod determinism;

/// EXEC: program replacement, timing and failures.
pub mod exec;

/// FORK: child creation, block skipping and nesting.
pub mod fork;

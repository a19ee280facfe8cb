//! # Unit Components
//!
//! Tests for each simulator component, grouped the way the crate is laid out.

/// Configuration defaults, JSON overrides and validation.
pub mod config;


/// Trace interpretation: activities, FORK, EXEC, loading and determinism.
pub mod sim;

//! Trace decoding.
//!
//! Provides the trace line decoder and the FORK block extractor used by the interpreter.

/// FORK branch block extraction.
pub mod block;

/// Trace line decoding.
pub mod parser;

pub use block::{ChildBlock, extract_child_block};
pub use parser::{Activity, TraceLine, parse_trace};

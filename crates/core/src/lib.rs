//! Interrupt-driven process executor simulator library.
//!
//! This crate replays a trace of process activities and reports what an operating system kernel
//! would do to carry it out:
//! 1. **Trace:** Decoding of trace lines and FORK branch blocks.
//! 2. **Interrupts:** Vector and delay tables and the kernel entry sequence.
//! 3. **Memory:** A fixed-partition table with a best-fit allocator.
//! 4. **Processes:** PCBs, the wait queue, and status snapshots.
//! 5. **Simulation:** The recursive trace interpreter, input loading, output writing, and
//!    configuration and statistics.
//!
//! ```
//! use trapsim_core::config::Config;
//! use trapsim_core::interrupt::{DelayTable, VectorTable};
//! use trapsim_core::sim::{MachineTables, Simulation, StaticSource};
//! use trapsim_core::trace::parse_trace;
//!
//! let tables = MachineTables {
//!     vectors: VectorTable::new((0..=10).map(|_| "0x1000".to_string()).collect()),
//!     delays: DelayTable::new(vec![20]),
//!     ..MachineTables::default()
//! };
//! let mut sim = Simulation::new(Config::default(), tables, Box::new(StaticSource::new()));
//! let trace = parse_trace(["CPU, 5", "SYSCALL, 0"]).unwrap();
//! let outcome = sim.run(&trace).unwrap();
//! assert_eq!(outcome.time, 39);
//! ```

/// Shared constants and error types.
pub mod common;
/// Simulator configuration (defaults, sections, validation).
pub mod config;
/// Execution event log.
pub mod events;
/// Interrupt tables and kernel entry.
pub mod interrupt;
/// Fixed-partition memory.
pub mod memory;
/// Process records, wait queue and status snapshots.
pub mod process;
/// Simulation context, interpreter, loader and output.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;
/// Trace decoding and FORK block extraction.
pub mod trace;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Error type for every fatal condition.
pub use crate::common::{SimError, SimResult};
/// Simulation context; construct with `Simulation::new`.
pub use crate::sim::Simulation;

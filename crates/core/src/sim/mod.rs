//! Simulation driver.
//!
//! Provides the simulation context and trace interpreter, the program catalog, the EXEC
//! micro-step sources, and the loaders and writers for run inputs and outputs.

/// External program catalog and program trace sources.
pub mod catalog;

/// Input file loading.
pub mod loader;

/// Output file writing.
pub mod output;

/// Simulation context and trace interpreter.
pub mod simulator;

/// EXEC micro-step duration sources.
pub mod steps;

pub use catalog::{DirectorySource, ProgramCatalog, ProgramDescriptor, StaticSource, TraceSource};
pub use loader::{InputPaths, Inputs};
pub use output::write_outputs;
pub use simulator::{MachineTables, Simulation, TraceOutcome};
pub use steps::{ScriptedSteps, SeededSteps, StepSource};

//! Input loading.
//!
//! This module reads the four run inputs from disk. It performs:
//! 1. **Trace loading:** Reads a trace file and decodes every non-blank line.
//! 2. **Table loading:** Reads the vector table and the device delay table.
//! 3. **Catalog loading:** Reads the `name, size` program catalog.
//!
//! All inputs are loaded before simulation starts, so a missing or malformed file aborts the run
//! before any output is produced.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::catalog::{ProgramCatalog, ProgramDescriptor};
use super::simulator::MachineTables;
use crate::common::{SimError, SimResult};
use crate::interrupt::{DelayTable, VectorTable};
use crate::trace::{TraceLine, parse_trace};

/// Reads the non-blank lines of a text file.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read.
pub fn read_lines(path: &Path) -> SimResult<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Reads and decodes a trace file.
///
/// # Errors
///
/// Fails if the file cannot be read or a line cannot be decoded.
pub fn load_trace(path: &Path) -> SimResult<Vec<TraceLine>> {
    let lines = read_lines(path)?;
    let trace = parse_trace(lines.iter().map(String::as_str))?;
    debug!(path = %path.display(), lines = trace.len(), "trace loaded");
    Ok(trace)
}

/// Reads the interrupt vector table, one ISR address per line.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read.
pub fn load_vectors(path: &Path) -> SimResult<VectorTable> {
    let addresses = read_lines(path)?
        .into_iter()
        .map(|line| line.trim().to_string())
        .collect();
    Ok(VectorTable::new(addresses))
}

/// Reads the device delay table, one unsigned duration per line.
///
/// # Errors
///
/// Fails if the file cannot be read or a line is not an unsigned integer.
pub fn load_delays(path: &Path) -> SimResult<DelayTable> {
    let delays = read_lines(path)?
        .iter()
        .map(|line| {
            let field = line.trim();
            field
                .parse::<u64>()
                .map_err(|_| SimError::invalid_number(field, line))
        })
        .collect::<SimResult<Vec<_>>>()?;
    Ok(DelayTable::new(delays))
}

/// Reads the external program catalog.
///
/// # Errors
///
/// Fails if the file cannot be read or a line is not a valid `name, size` entry.
pub fn load_catalog(path: &Path) -> SimResult<ProgramCatalog> {
    let programs = read_lines(path)?
        .iter()
        .map(|line| ProgramDescriptor::parse(line))
        .collect::<SimResult<Vec<_>>>()?;
    Ok(ProgramCatalog::new(programs))
}

/// Paths of the four run inputs, in command-line order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputPaths {
    /// Top-level trace.
    pub trace: PathBuf,
    /// Interrupt vector table.
    pub vectors: PathBuf,
    /// Device delay table.
    pub delays: PathBuf,
    /// External program catalog.
    pub programs: PathBuf,
}

/// Everything a run reads from disk up front.
#[derive(Clone, Debug)]
pub struct Inputs {
    /// Decoded top-level trace.
    pub trace: Vec<TraceLine>,
    /// Interrupt vector table.
    pub vectors: VectorTable,
    /// Device delay table.
    pub delays: DelayTable,
    /// External program catalog.
    pub catalog: ProgramCatalog,
}

impl Inputs {
    /// Loads all four inputs.
    ///
    /// # Errors
    ///
    /// Propagates the first read or decode failure.
    pub fn load(paths: &InputPaths) -> SimResult<Self> {
        let trace = load_trace(&paths.trace)?;
        let vectors = load_vectors(&paths.vectors)?;
        let delays = load_delays(&paths.delays)?;
        let catalog = load_catalog(&paths.programs)?;
        debug!(
            vectors = vectors.len(),
            delays = delays.len(),
            programs = catalog.len(),
            "inputs loaded"
        );
        Ok(Self {
            trace,
            vectors,
            delays,
            catalog,
        })
    }

    /// Splits the inputs into the top-level trace and the lookup tables.
    pub fn into_parts(self) -> (Vec<TraceLine>, MachineTables) {
        let tables = MachineTables {
            vectors: self.vectors,
            delays: self.delays,
            catalog: self.catalog,
        };
        (self.trace, tables)
    }
}

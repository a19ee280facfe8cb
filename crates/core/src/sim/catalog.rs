//! External program catalog and program trace sources.
//!
//! EXEC needs two things about the program it loads: its declared size, from the catalog file,
//! and its own trace, from `<name>.txt`. The catalog is a plain table; traces come through the
//! [`TraceSource`] trait so tests can serve them from memory.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use super::loader;
use crate::common::constants::PROGRAM_TRACE_EXT;
use crate::common::{SimError, SimResult};
use crate::trace::{TraceLine, parse_trace};

/// Declared size of one external program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramDescriptor {
    /// Program name as used by EXEC lines.
    pub name: String,
    /// Declared size in Mb.
    pub size: u32,
}

impl ProgramDescriptor {
    /// Parses a `name, size` catalog line.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MalformedCatalogEntry`] when the line has no comma or no name, and
    /// [`SimError::InvalidNumber`] when the size is not an unsigned integer.
    pub fn parse(line: &str) -> SimResult<Self> {
        let mut fields = line.split(',');
        let name = fields.next().unwrap_or_default().trim();
        let size = fields
            .next()
            .ok_or_else(|| SimError::MalformedCatalogEntry(line.to_string()))?
            .trim();
        if name.is_empty() {
            return Err(SimError::MalformedCatalogEntry(line.to_string()));
        }
        let size = size
            .parse::<u32>()
            .map_err(|_| SimError::invalid_number(size, line))?;
        Ok(Self {
            name: name.to_string(),
            size,
        })
    }
}

/// Program name to declared size lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramCatalog {
    programs: Vec<ProgramDescriptor>,
}

impl ProgramCatalog {
    /// Wraps parsed descriptors. On duplicate names the first entry wins.
    pub const fn new(programs: Vec<ProgramDescriptor>) -> Self {
        Self { programs }
    }

    /// Declared size of `name`; 0 for programs the catalog does not list.
    pub fn size_of(&self, name: &str) -> u32 {
        self.programs
            .iter()
            .find(|p| p.name == name)
            .map_or(0, |p| p.size)
    }

    /// Listed programs in file order.
    pub fn programs(&self) -> &[ProgramDescriptor] {
        &self.programs
    }

    /// Number of listed programs.
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Returns true when no program is listed.
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

/// Provides the trace a program runs after EXEC.
pub trait TraceSource: fmt::Debug {
    /// Loads and decodes the trace of `program`.
    ///
    /// # Errors
    ///
    /// Fails if the trace cannot be read or contains a malformed line.
    fn load(&self, program: &str) -> SimResult<Vec<TraceLine>>;
}

/// Reads program traces from `<dir>/<program>.txt`.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Serves traces from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the trace file for `program`.
    pub fn path_for(&self, program: &str) -> PathBuf {
        self.dir.join(format!("{program}.{PROGRAM_TRACE_EXT}"))
    }

    /// Directory the traces are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TraceSource for DirectorySource {
    fn load(&self, program: &str) -> SimResult<Vec<TraceLine>> {
        loader::load_trace(&self.path_for(program))
    }
}

/// Program traces held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    traces: HashMap<String, Vec<String>>,
}

impl StaticSource {
    /// Creates a source with no programs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the trace lines of `program`, replacing any previous trace.
    #[must_use]
    pub fn with_program<I, S>(mut self, program: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let _ = self.traces.insert(
            program.to_string(),
            lines.into_iter().map(Into::into).collect(),
        );
        self
    }
}

impl TraceSource for StaticSource {
    fn load(&self, program: &str) -> SimResult<Vec<TraceLine>> {
        let lines = self.traces.get(program).ok_or_else(|| {
            SimError::io(
                format!("{program}.{PROGRAM_TRACE_EXT}"),
                io::Error::new(io::ErrorKind::NotFound, "program trace not registered"),
            )
        })?;
        parse_trace(lines.iter().map(String::as_str))
    }
}

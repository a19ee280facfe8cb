//! Simulation error definitions.
//!
//! Every fallible operation in the simulator reports a [`SimError`]. The variants follow the
//! four failure classes of a run:
//! 1. **Configuration:** Unreadable inputs, invalid JSON, inconsistent partition tables.
//! 2. **Parsing:** Malformed trace lines, delay entries, or catalog entries.
//! 3. **Resource exhaustion:** No empty partition large enough for a process.
//! 4. **Lookup:** Vector or delay index outside its table.
//! 5. **Limits:** Clock overflow, or FORK/EXEC nesting deeper than configured.
//!
//! None of these are recoverable; the CLI reports the error and exits.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions raised while loading inputs or interpreting a trace.
#[derive(Debug, Error)]
pub enum SimError {
    /// An input or output file could not be read or written.
    #[error("could not access '{path}': {source}")]
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The JSON configuration file is not valid.
    #[error("invalid configuration in '{path}': {source}")]
    ConfigParse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The configuration parsed but describes an impossible machine.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A trace line names an activity the simulator does not know.
    #[error("unknown activity '{activity}' in trace line '{line}'")]
    UnknownActivity {
        /// The activity keyword as written.
        activity: String,
        /// The full trace line.
        line: String,
    },

    /// A numeric field is missing, negative, or not a number.
    #[error("invalid numeric field '{field}' in line '{line}'")]
    InvalidNumber {
        /// The offending field text.
        field: String,
        /// The full input line.
        line: String,
    },

    /// An `EXEC` line does not name the program to load.
    #[error("EXEC without a program name in trace line '{0}'")]
    MissingProgramName(String),

    /// A catalog line is not of the form `name, size`.
    #[error("malformed program catalog entry '{0}'")]
    MalformedCatalogEntry(String),

    /// No empty partition can hold the process.
    #[error("no free memory partition can hold program '{program}' ({size} Mb)")]
    OutOfMemory {
        /// Program that needed memory.
        program: String,
        /// Declared size of the program.
        size: u32,
    },

    /// A step would advance the clock past the largest representable tick.
    #[error("clock overflow: '{step}' of {duration} ticks cannot start at time {time}")]
    ClockOverflow {
        /// Clock value when the step starts.
        time: u64,
        /// Ticks the step takes.
        duration: u64,
        /// Description of the step.
        step: String,
    },

    /// FORK and EXEC recursion went deeper than the configured limit.
    #[error("nesting depth limit of {limit} exceeded while running program '{program}'")]
    NestingTooDeep {
        /// Configured maximum depth.
        limit: usize,
        /// Program whose trace would have started the next level.
        program: String,
    },

    /// An interrupt vector index lies outside the vector table.
    #[error("interrupt vector {index} out of range (table has {len} entries)")]
    VectorOutOfRange {
        /// Requested vector index.
        index: usize,
        /// Number of entries in the table.
        len: usize,
    },

    /// A device delay index lies outside the delay table.
    #[error("device delay {index} out of range (table has {len} entries)")]
    DelayOutOfRange {
        /// Requested delay index.
        index: usize,
        /// Number of entries in the table.
        len: usize,
    },
}

impl SimError {
    /// Wraps an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds an [`SimError::InvalidNumber`] for `field` within `line`.
    pub fn invalid_number(field: &str, line: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_string(),
            line: line.to_string(),
        }
    }
}

/// Result alias used throughout the simulator.
pub type SimResult<T> = Result<T, SimError>;

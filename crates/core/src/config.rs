//! Configuration system for the trace simulator.
//!
//! This module defines the tunables of a simulation run. It provides:
//! 1. **Defaults:** The interrupt costs, vector numbers, partition table and EXEC timings of the
//!    reference machine.
//! 2. **Structures:** Hierarchical config for interrupts, memory, EXEC handling and the init
//!    process.
//! 3. **Validation:** Rejects partition tables and step ranges the allocator cannot work with.
//!
//! Configuration is read from JSON (`--config`) or built with `Config::default()`. Every field is
//! optional in JSON; missing fields take the default.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Ticks needed to save the interrupted context.
    pub const CONTEXT_SAVE_TIME: u64 = 10;

    /// Vector used for system calls.
    pub const SYSCALL_VECTOR: usize = 10;

    /// Vector used for I/O completion interrupts.
    pub const END_IO_VECTOR: usize = 10;

    /// Vector used for `fork`.
    pub const FORK_VECTOR: usize = 2;

    /// Vector used for `exec`.
    pub const EXEC_VECTOR: usize = 3;

    /// Partition capacities in Mb, ordered by slot number (slot 1 first).
    pub const PARTITIONS: [u32; 6] = [40, 25, 15, 10, 8, 2];

    /// Ticks needed to load one Mb of program image.
    pub const LOAD_TICKS_PER_MB: u64 = 15;

    /// Lower bound of the randomized EXEC micro-step duration.
    pub const STEP_MIN: u64 = 1;

    /// Upper bound (inclusive) of the randomized EXEC micro-step duration.
    pub const STEP_MAX: u64 = 10;

    /// Seed of the EXEC micro-step generator.
    pub const SEED: u64 = 12345;

    /// Program name of the initial process.
    pub const INIT_PROGRAM: &str = "init";

    /// Declared size of the initial process.
    pub const INIT_SIZE: u32 = 1;

    /// Deepest chain of nested FORK and EXEC traces a run may build.
    pub const MAX_NESTING_DEPTH: usize = 256;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use trapsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.interrupts.context_save_time, 10);
/// assert_eq!(config.memory.partitions, vec![40, 25, 15, 10, 8, 2]);
/// ```
///
/// Partial JSON keeps the defaults for everything it omits:
///
/// ```
/// use trapsim_core::config::Config;
///
/// let json = r#"{ "exec": { "seed": 7 }, "interrupts": { "context_save_time": 20 } }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.exec.seed, 7);
/// assert_eq!(config.exec.load_ticks_per_mb, 15);
/// assert_eq!(config.interrupts.context_save_time, 20);
/// assert_eq!(config.interrupts.fork_vector, 2);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Interrupt vectors and dispatch cost
    #[serde(default)]
    pub interrupts: InterruptConfig,
    /// Memory partition table
    #[serde(default)]
    pub memory: MemoryConfig,
    /// EXEC loading and micro-step timing
    #[serde(default)]
    pub exec: ExecConfig,
    /// Initial process identity
    #[serde(default)]
    pub process: ProcessConfig,
}

impl Config {
    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, [`SimError::ConfigParse`] if it is not
    /// valid JSON for this structure, and [`SimError::InvalidConfig`] if validation fails.
    pub fn from_json_file(path: &Path) -> SimResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        let config: Self = serde_json::from_str(&text).map_err(|source| SimError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] when the partition table is empty or not
    /// non-increasing, or when the EXEC step range is empty.
    pub fn validate(&self) -> SimResult<()> {
        let parts = &self.memory.partitions;
        if parts.is_empty() {
            return Err(SimError::InvalidConfig(
                "memory.partitions must not be empty".to_string(),
            ));
        }
        if parts.windows(2).any(|w| w[0] < w[1]) {
            return Err(SimError::InvalidConfig(format!(
                "memory.partitions must be non-increasing by slot, got {parts:?}"
            )));
        }
        if self.exec.step_min > self.exec.step_max {
            return Err(SimError::InvalidConfig(format!(
                "exec.step_min ({}) exceeds exec.step_max ({})",
                self.exec.step_min, self.exec.step_max
            )));
        }
        Ok(())
    }
}

/// Interrupt dispatch settings.
///
/// The vector numbers index into the vector table file; the context save time is charged on
/// every dispatch.
#[derive(Debug, Clone, Deserialize)]
pub struct InterruptConfig {
    /// Ticks spent saving context on each interrupt
    #[serde(default = "InterruptConfig::default_context_save_time")]
    pub context_save_time: u64,

    /// Vector for SYSCALL activities
    #[serde(default = "InterruptConfig::default_syscall_vector")]
    pub syscall_vector: usize,

    /// Vector for END_IO activities
    #[serde(default = "InterruptConfig::default_end_io_vector")]
    pub end_io_vector: usize,

    /// Vector for FORK activities
    #[serde(default = "InterruptConfig::default_fork_vector")]
    pub fork_vector: usize,

    /// Vector for EXEC activities
    #[serde(default = "InterruptConfig::default_exec_vector")]
    pub exec_vector: usize,
}

impl InterruptConfig {
    const fn default_context_save_time() -> u64 {
        defaults::CONTEXT_SAVE_TIME
    }

    const fn default_syscall_vector() -> usize {
        defaults::SYSCALL_VECTOR
    }

    const fn default_end_io_vector() -> usize {
        defaults::END_IO_VECTOR
    }

    const fn default_fork_vector() -> usize {
        defaults::FORK_VECTOR
    }

    const fn default_exec_vector() -> usize {
        defaults::EXEC_VECTOR
    }
}

impl Default for InterruptConfig {
    fn default() -> Self {
        Self {
            context_save_time: defaults::CONTEXT_SAVE_TIME,
            syscall_vector: defaults::SYSCALL_VECTOR,
            end_io_vector: defaults::END_IO_VECTOR,
            fork_vector: defaults::FORK_VECTOR,
            exec_vector: defaults::EXEC_VECTOR,
        }
    }
}

/// Fixed-partition memory layout.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Partition capacities in Mb; slot 1 first, non-increasing
    #[serde(default = "MemoryConfig::default_partitions")]
    pub partitions: Vec<u32>,
}

impl MemoryConfig {
    fn default_partitions() -> Vec<u32> {
        defaults::PARTITIONS.to_vec()
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            partitions: Self::default_partitions(),
        }
    }
}

/// Program loading parameters for EXEC.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecConfig {
    /// Load time per Mb of program image
    #[serde(default = "ExecConfig::default_load_ticks_per_mb")]
    pub load_ticks_per_mb: u64,

    /// Shortest randomized micro-step
    #[serde(default = "ExecConfig::default_step_min")]
    pub step_min: u64,

    /// Longest randomized micro-step (inclusive)
    #[serde(default = "ExecConfig::default_step_max")]
    pub step_max: u64,

    /// Seed for the micro-step generator; fixed so runs are reproducible
    #[serde(default = "ExecConfig::default_seed")]
    pub seed: u64,
}

impl ExecConfig {
    const fn default_load_ticks_per_mb() -> u64 {
        defaults::LOAD_TICKS_PER_MB
    }

    const fn default_step_min() -> u64 {
        defaults::STEP_MIN
    }

    const fn default_step_max() -> u64 {
        defaults::STEP_MAX
    }

    const fn default_seed() -> u64 {
        defaults::SEED
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            load_ticks_per_mb: defaults::LOAD_TICKS_PER_MB,
            step_min: defaults::STEP_MIN,
            step_max: defaults::STEP_MAX,
            seed: defaults::SEED,
        }
    }
}

/// Identity of the process that runs the top-level trace.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessConfig {
    /// Program name of PID 0
    #[serde(default = "ProcessConfig::default_init_program")]
    pub init_program: String,

    /// Declared size of PID 0 in Mb
    #[serde(default = "ProcessConfig::default_init_size")]
    pub init_size: u32,

    /// Limit on nested FORK/EXEC traces; deeper nesting is a fatal error
    #[serde(default = "ProcessConfig::default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

impl ProcessConfig {
    fn default_init_program() -> String {
        defaults::INIT_PROGRAM.to_string()
    }

    const fn default_init_size() -> u32 {
        defaults::INIT_SIZE
    }

    const fn default_max_nesting_depth() -> usize {
        defaults::MAX_NESTING_DEPTH
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            init_program: Self::default_init_program(),
            init_size: defaults::INIT_SIZE,
            max_nesting_depth: defaults::MAX_NESTING_DEPTH,
        }
    }
}

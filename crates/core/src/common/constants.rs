//! Fixed event descriptions and formatting constants.
//!
//! Tunable timings and table sizes live in [`crate::config`]; the values here are part of the
//! output format and never change between runs.

/// Label stored in a partition that holds no program.
pub const EMPTY_PARTITION: &str = "empty";

/// Printed in place of a missing parent PID or partition number.
pub const NONE_ID: i64 = -1;

/// Name of the execution log written by a run.
pub const EXECUTION_FILE: &str = "execution.txt";

/// Name of the status snapshot log written by a run.
pub const STATUS_FILE: &str = "system_status.txt";

/// Extension appended to a program name to find its trace file.
pub const PROGRAM_TRACE_EXT: &str = "txt";

/// Ticks spent switching into kernel mode.
pub const MODE_SWITCH_TICKS: u64 = 1;

/// Ticks spent locating the vector entry.
pub const VECTOR_LOOKUP_TICKS: u64 = 1;

/// Ticks spent loading the ISR address into the PC.
pub const PC_LOAD_TICKS: u64 = 1;

/// Ticks spent returning from an interrupt.
pub const IRET_TICKS: u64 = 1;

/// Ticks charged for invoking the scheduler.
pub const SCHEDULER_TICKS: u64 = 0;

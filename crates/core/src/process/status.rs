//! Status snapshot formatting.
//!
//! A snapshot records the running process and every blocked parent in a fixed-width table:
//!
//! ```text
//! time: 24; current trace: FORK, 10
//! +------------------------------------------------------+
//! | PID |program name |partition number | size |   state|
//! +------------------------------------------------------+
//! |   1 |        init |               5 |    1 | running|
//! |   0 |        init |               6 |    1 | waiting|
//! +------------------------------------------------------+
//! ```

use std::fmt::{self, Write};

use super::pcb::{Pcb, WaitQueue};

const BORDER_WIDTH: usize = 54;

/// Accumulated status snapshots of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusLog {
    text: String,
    snapshots: usize,
}

impl StatusLog {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            snapshots: 0,
        }
    }

    /// Appends a snapshot taken at `time` while executing `trace_line`.
    pub fn snapshot(&mut self, time: u64, trace_line: &str, running: &Pcb, waiting: &WaitQueue) {
        // Writing into a String cannot fail.
        let _ = writeln!(self.text, "time: {time}; current trace: {trace_line}");
        let _ = writeln!(self.text, "{}", ProcessTable { running, waiting });
        self.snapshots += 1;
    }

    /// Appends every snapshot of `other`, keeping order.
    pub fn extend(&mut self, other: Self) {
        self.text.push_str(&other.text);
        self.snapshots += other.snapshots;
    }

    /// Number of snapshots recorded.
    pub fn len(&self) -> usize {
        self.snapshots
    }

    /// Returns true when no snapshot was recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots == 0
    }

    /// The log as written to `system_status.txt`.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for StatusLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The process table of one snapshot.
#[derive(Debug)]
pub struct ProcessTable<'a> {
    /// Process on the CPU.
    pub running: &'a Pcb,
    /// Blocked parents, oldest first.
    pub waiting: &'a WaitQueue,
}

impl ProcessTable<'_> {
    fn border(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{}+", "-".repeat(BORDER_WIDTH))
    }

    fn row(f: &mut fmt::Formatter<'_>, pcb: &Pcb, state: &str) -> fmt::Result {
        writeln!(
            f,
            "|{:>4} |{:>12} |{:>16} |{:>5} |{:>8}|",
            pcb.pid,
            pcb.program,
            pcb.partition_display(),
            pcb.size,
            state
        )
    }
}

impl fmt::Display for ProcessTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::border(f)?;
        writeln!(
            f,
            "|{:>4} |{:>12} |{:>16} |{:>5} |{:>8}|",
            "PID", "program name", "partition number", "size", "state"
        )?;
        Self::border(f)?;
        Self::row(f, self.running, "running")?;
        for pcb in self.waiting.iter() {
            Self::row(f, pcb, "waiting")?;
        }
        Self::border(f)
    }
}

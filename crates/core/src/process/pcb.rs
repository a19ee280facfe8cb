//! Process control blocks and the wait queue.

use crate::common::constants::NONE_ID;

/// Process identifier.
pub type Pid = u32;

/// Process control block: the identity and memory binding of one simulated process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pcb {
    /// Process identifier.
    pub pid: Pid,
    /// Parent process identifier; `None` for the init process.
    pub ppid: Option<Pid>,
    /// Name of the program currently bound to the process.
    pub program: String,
    /// Declared memory size in Mb.
    pub size: u32,
    /// Slot number of the partition holding the process, if any.
    pub partition: Option<usize>,
}

impl Pcb {
    /// Creates an unallocated process record.
    pub fn new(pid: Pid, ppid: Option<Pid>, program: impl Into<String>, size: u32) -> Self {
        Self {
            pid,
            ppid,
            program: program.into(),
            size,
            partition: None,
        }
    }

    /// Creates the record of a forked child: a copy of `self` with a new identity and no memory.
    pub fn fork_child(&self, pid: Pid) -> Self {
        Self::new(pid, Some(self.pid), self.program.clone(), self.size)
    }

    /// Parent PID as printed in status tables (`-1` for none).
    pub fn ppid_display(&self) -> i64 {
        self.ppid.map_or(NONE_ID, i64::from)
    }

    /// Partition slot as printed in status tables (`-1` for none).
    pub fn partition_display(&self) -> i64 {
        self.partition.map_or(NONE_ID, |slot| slot as i64)
    }
}

/// Parents blocked on a forked child, most recent last.
///
/// Entries are pushed when a FORK starts and popped when the child's trace ends, so the queue
/// behaves as a stack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WaitQueue {
    entries: Vec<Pcb>,
}

impl WaitQueue {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Blocks `pcb` until its child finishes.
    pub fn push(&mut self, pcb: Pcb) {
        self.entries.push(pcb);
    }

    /// Releases the most recently blocked parent.
    pub fn pop(&mut self) -> Option<Pcb> {
        self.entries.pop()
    }

    /// Number of blocked processes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no process is blocked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Blocked processes, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Pcb> {
        self.entries.iter()
    }
}

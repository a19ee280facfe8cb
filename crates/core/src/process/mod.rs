//! Process record store.
//!
//! This module provides:
//! 1. **PCB:** The identity and memory binding of a simulated process.
//! 2. **Wait Queue:** Parents blocked on an in-flight forked child.
//! 3. **Status Snapshots:** The fixed-width tables written to `system_status.txt`.

/// Process control blocks and the wait queue.
pub mod pcb;

/// Status snapshot formatting.
pub mod status;

pub use pcb::{Pcb, Pid, WaitQueue};
pub use status::{ProcessTable, StatusLog};

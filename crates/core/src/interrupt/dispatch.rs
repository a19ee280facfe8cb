//! Interrupt entry sequence.
//!
//! Every trapping activity enters the kernel the same way: switch mode, save context, find the
//! vector, load the ISR address. Only the vector number differs between SYSCALL, END_IO, FORK and
//! EXEC.

use super::tables::VectorTable;
use crate::common::SimResult;
use crate::common::constants::{MODE_SWITCH_TICKS, PC_LOAD_TICKS, VECTOR_LOOKUP_TICKS};
use crate::events::EventLog;

/// Emits the four-step interrupt entry for `vector` starting at `time`.
///
/// Returns the entry events and the clock after the ISR address is loaded. The vector address is
/// looked up before anything is recorded, so a bad vector produces no partial output.
///
/// # Errors
///
/// Returns [`crate::common::SimError::VectorOutOfRange`] if `vector` is not in `vectors`, and
/// [`crate::common::SimError::ClockOverflow`] if the sequence would run past the last tick.
///
/// # Examples
///
/// ```
/// use trapsim_core::interrupt::{VectorTable, dispatch};
///
/// let vectors = VectorTable::new(vec!["0x0000".into(), "0x0AF4".into()]);
/// let (log, end) = dispatch(100, 1, 10, &vectors).unwrap();
/// assert_eq!(end, 113);
/// assert_eq!(log.events()[3].description, "load address 0x0AF4 into the PC");
/// ```
pub fn dispatch(
    time: u64,
    vector: usize,
    context_save_time: u64,
    vectors: &VectorTable,
) -> SimResult<(EventLog, u64)> {
    let address = vectors.address(vector)?;

    let mut log = EventLog::new();
    let mut now = log.record(time, MODE_SWITCH_TICKS, "switch to kernel mode")?;
    now = log.record(now, context_save_time, "context saved")?;
    now = log.record(now, VECTOR_LOOKUP_TICKS, format!("find vector {vector}"))?;
    now = log.record(now, PC_LOAD_TICKS, format!("load address {address} into the PC"))?;
    Ok((log, now))
}

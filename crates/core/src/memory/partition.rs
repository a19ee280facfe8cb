//! Fixed-partition memory allocator.
//!
//! Memory is a fixed list of partitions ordered by slot number, with capacities that never
//! increase from one slot to the next. Allocation scans from the highest slot (smallest capacity)
//! down to slot 1 and takes the first empty partition that is large enough, which yields the
//! smallest sufficient partition.

use tracing::trace;

use crate::common::constants::EMPTY_PARTITION;
use crate::process::Pcb;

/// One fixed-capacity memory partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    /// Slot number, starting at 1.
    pub number: usize,
    /// Capacity in Mb.
    pub size: u32,
    /// Program occupying the partition; `None` when empty.
    pub occupant: Option<String>,
}

impl Partition {
    /// Returns true when no program occupies the partition.
    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Occupant label as shown in memory dumps (`empty` when free).
    pub fn label(&self) -> &str {
        self.occupant.as_deref().unwrap_or(EMPTY_PARTITION)
    }
}

/// The partition table of the simulated machine.
#[derive(Clone, Debug)]
pub struct MemoryTable {
    partitions: Vec<Partition>,
}

impl MemoryTable {
    /// Creates an empty table from capacities ordered by slot number.
    ///
    /// The capacities are expected to be non-increasing; [`crate::config::Config::validate`]
    /// enforces this for configured tables.
    pub fn new(capacities: &[u32]) -> Self {
        let partitions = capacities
            .iter()
            .enumerate()
            .map(|(i, &size)| Partition {
                number: i + 1,
                size,
                occupant: None,
            })
            .collect();
        Self { partitions }
    }

    /// Assigns the smallest sufficient empty partition to `pcb`.
    ///
    /// Returns false, leaving `pcb` untouched, when no empty partition can hold it.
    pub fn allocate(&mut self, pcb: &mut Pcb) -> bool {
        let Some(partition) = self
            .partitions
            .iter_mut()
            .rev()
            .find(|p| p.is_empty() && p.size >= pcb.size)
        else {
            trace!(pid = pcb.pid, size = pcb.size, "no partition large enough");
            return false;
        };

        partition.occupant = Some(pcb.program.clone());
        pcb.partition = Some(partition.number);
        trace!(
            pid = pcb.pid,
            program = %pcb.program,
            partition = partition.number,
            "partition allocated"
        );
        true
    }

    /// Releases the partition held by `pcb`, if any, and marks `pcb` unallocated.
    ///
    /// Calling this on an already unallocated process is a no-op.
    pub fn free(&mut self, pcb: &mut Pcb) {
        if let Some(number) = pcb.partition.take() {
            if let Some(partition) = number
                .checked_sub(1)
                .and_then(|index| self.partitions.get_mut(index))
            {
                partition.occupant = None;
                trace!(pid = pcb.pid, partition = number, "partition freed");
            }
        }
    }

    /// All partitions in slot order.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// The partition with slot `number`.
    pub fn get(&self, number: usize) -> Option<&Partition> {
        number.checked_sub(1).and_then(|i| self.partitions.get(i))
    }

    /// Number of partitions with no occupant.
    pub fn free_count(&self) -> usize {
        self.partitions.iter().filter(|p| p.is_empty()).count()
    }
}

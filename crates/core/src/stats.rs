//! Run statistics collection and reporting.
//!
//! This module tracks what a simulation run did. It provides:
//! 1. **Activity mix:** Counts of CPU bursts, system calls, I/O completions, forks and execs.
//! 2. **Kernel overhead:** Interrupts dispatched and ticks spent outside CPU bursts.
//! 3. **Process bookkeeping:** Processes created and the deepest wait queue observed.

use std::fmt::Write;
use std::time::Instant;

/// Counters collected during one run.
#[derive(Clone, Debug)]
pub struct RunStats {
    start_time: Instant,
    /// Simulated time when the top-level trace finished.
    pub final_time: u64,
    /// Number of CPU bursts executed.
    pub cpu_bursts: u64,
    /// Ticks spent in CPU bursts.
    pub cpu_ticks: u64,
    /// Number of SYSCALL activities serviced.
    pub syscalls: u64,
    /// Number of END_IO activities serviced.
    pub io_completions: u64,
    /// Number of FORK activities.
    pub forks: u64,
    /// Number of EXEC activities.
    pub execs: u64,
    /// Number of interrupt entry sequences emitted.
    pub interrupts: u64,
    /// Processes created, including init.
    pub processes_created: u64,
    /// Largest number of parents blocked at once.
    pub peak_wait_depth: usize,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            final_time: 0,
            cpu_bursts: 0,
            cpu_ticks: 0,
            syscalls: 0,
            io_completions: 0,
            forks: 0,
            execs: 0,
            interrupts: 0,
            processes_created: 0,
            peak_wait_depth: 0,
        }
    }
}

impl RunStats {
    /// Ticks not spent in CPU bursts.
    pub const fn kernel_ticks(&self) -> u64 {
        self.final_time.saturating_sub(self.cpu_ticks)
    }

    /// Fraction of simulated time spent in CPU bursts, in percent.
    #[allow(clippy::cast_precision_loss)]
    pub fn cpu_utilization(&self) -> f64 {
        if self.final_time == 0 {
            0.0
        } else {
            self.cpu_ticks as f64 / self.final_time as f64 * 100.0
        }
    }

    /// Renders the report printed by `--stats`.
    pub fn report(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "TRACE SIMULATION STATISTICS");
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(
            out,
            "host_seconds             {:.4} s",
            self.start_time.elapsed().as_secs_f64()
        );
        let _ = writeln!(out, "sim_time                 {}", self.final_time);
        let _ = writeln!(out, "sim_cpu_ticks            {}", self.cpu_ticks);
        let _ = writeln!(out, "sim_kernel_ticks         {}", self.kernel_ticks());
        let _ = writeln!(out, "sim_cpu_utilization      {:.2}%", self.cpu_utilization());
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "ACTIVITY MIX");
        let _ = writeln!(out, "  activity.cpu           {}", self.cpu_bursts);
        let _ = writeln!(out, "  activity.syscall       {}", self.syscalls);
        let _ = writeln!(out, "  activity.end_io        {}", self.io_completions);
        let _ = writeln!(out, "  activity.fork          {}", self.forks);
        let _ = writeln!(out, "  activity.exec          {}", self.execs);
        let _ = writeln!(out, "  interrupts             {}", self.interrupts);
        let _ = writeln!(out, "----------------------------------------------------------");
        let _ = writeln!(out, "PROCESSES");
        let _ = writeln!(out, "  processes.created      {}", self.processes_created);
        let _ = writeln!(out, "  wait_queue.peak        {}", self.peak_wait_depth);
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{}", self.report());
    }
}

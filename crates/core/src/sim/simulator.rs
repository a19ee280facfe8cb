//! Simulator: owns the machine state and interprets traces.
//!
//! The [`Simulation`] holds everything that outlives a single trace: the partition table, the PID
//! counter, the micro-step generator, the lookup tables and the run statistics. Interpreting a
//! trace borrows it mutably; FORK and EXEC recurse into [`Simulation::simulate_trace`] with an
//! owned sub-trace and merge the returned [`TraceOutcome`] into their own.

use tracing::{debug, info};

use super::catalog::{ProgramCatalog, TraceSource};
use super::steps::{SeededSteps, StepSource};
use crate::common::constants::{IRET_TICKS, SCHEDULER_TICKS};
use crate::common::{SimError, SimResult};
use crate::config::Config;
use crate::events::EventLog;
use crate::interrupt::{DelayTable, VectorTable, dispatch};
use crate::memory::MemoryTable;
use crate::process::{Pcb, Pid, StatusLog, WaitQueue};
use crate::stats::RunStats;
use crate::trace::{Activity, TraceLine, extract_child_block};

/// Result of interpreting one trace.
#[derive(Clone, Debug)]
pub struct TraceOutcome {
    /// Events emitted while running the trace, including nested traces.
    pub execution: EventLog,
    /// Status snapshots taken while running the trace, including nested traces.
    pub status: StatusLog,
    /// Clock value when the trace finished.
    pub time: u64,
    /// The process that ran the trace, as it stood at the end.
    pub process: Pcb,
}

impl TraceOutcome {
    const fn start(time: u64, process: Pcb) -> Self {
        Self {
            execution: EventLog::new(),
            status: StatusLog::new(),
            time,
            process,
        }
    }

    /// Folds a nested outcome into this one and returns the nested process.
    fn merge(&mut self, inner: Self) -> Pcb {
        self.execution.extend(inner.execution);
        self.status.extend(inner.status);
        self.time = inner.time;
        inner.process
    }
}

/// Lookup tables a run reads but never changes.
#[derive(Clone, Debug, Default)]
pub struct MachineTables {
    /// ISR addresses by vector number.
    pub vectors: VectorTable,
    /// ISR durations by device number.
    pub delays: DelayTable,
    /// Declared program sizes.
    pub catalog: ProgramCatalog,
}

/// Simulation context: the state shared by every trace of one run.
#[derive(Debug)]
pub struct Simulation {
    config: Config,
    tables: MachineTables,
    traces: Box<dyn TraceSource>,
    steps: Box<dyn StepSource>,
    memory: MemoryTable,
    next_pid: Pid,
    depth: usize,
    stats: RunStats,
}

impl Simulation {
    /// Creates a simulation with empty memory and the seeded micro-step generator.
    pub fn new(config: Config, tables: MachineTables, traces: Box<dyn TraceSource>) -> Self {
        let steps = Box::new(SeededSteps::new(
            config.exec.seed,
            config.exec.step_min,
            config.exec.step_max,
        ));
        let memory = MemoryTable::new(&config.memory.partitions);
        Self {
            config,
            tables,
            traces,
            steps,
            memory,
            next_pid: 0,
            depth: 0,
            stats: RunStats::default(),
        }
    }

    /// Replaces the micro-step source.
    #[must_use]
    pub fn with_step_source(mut self, steps: Box<dyn StepSource>) -> Self {
        self.steps = steps;
        self
    }

    /// Partition table.
    pub const fn memory(&self) -> &MemoryTable {
        &self.memory
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// PID the next created process receives.
    pub const fn next_pid(&self) -> Pid {
        self.next_pid
    }

    /// Creates the init process and gives it memory.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfMemory`] if no partition can hold it.
    pub fn boot(&mut self) -> SimResult<Pcb> {
        let pid = self.issue_pid();
        let mut init = Pcb::new(
            pid,
            None,
            self.config.process.init_program.clone(),
            self.config.process.init_size,
        );
        self.allocate(&mut init)?;
        info!(pid, program = %init.program, partition = ?init.partition, "init process created");
        Ok(init)
    }

    /// Boots the init process and runs `trace` from time 0.
    ///
    /// # Errors
    ///
    /// Propagates any fatal condition raised while interpreting the trace.
    pub fn run(&mut self, trace: &[TraceLine]) -> SimResult<TraceOutcome> {
        let init = self.boot()?;
        let mut waiting = WaitQueue::new();
        let outcome = self.simulate_trace(trace, 0, init, &mut waiting)?;
        self.stats.final_time = outcome.time;
        info!(time = outcome.time, events = outcome.execution.len(), "run finished");
        Ok(outcome)
    }

    /// Interprets `trace` as process `current`, starting at `start`.
    ///
    /// Runs until the trace is exhausted or an EXEC hands control to another program. `waiting`
    /// holds the parents blocked on `current` or its ancestors; it is restored to its entry state
    /// when this returns.
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range vector or delay, on memory exhaustion, on clock overflow, when an
    /// EXEC target's trace cannot be loaded, and when FORK/EXEC nesting exceeds
    /// `process.max_nesting_depth`.
    pub fn simulate_trace(
        &mut self,
        trace: &[TraceLine],
        start: u64,
        current: Pcb,
        waiting: &mut WaitQueue,
    ) -> SimResult<TraceOutcome> {
        let limit = self.config.process.max_nesting_depth;
        if self.depth >= limit {
            return Err(SimError::NestingTooDeep {
                limit,
                program: current.program,
            });
        }
        self.depth += 1;
        let outcome = self.walk(trace, start, current, waiting);
        self.depth -= 1;
        outcome
    }

    fn walk(
        &mut self,
        trace: &[TraceLine],
        start: u64,
        current: Pcb,
        waiting: &mut WaitQueue,
    ) -> SimResult<TraceOutcome> {
        let mut frame = TraceOutcome::start(start, current);
        let mut cursor = 0;

        while let Some(line) = trace.get(cursor) {
            debug!(
                time = frame.time,
                pid = frame.process.pid,
                activity = %line.activity,
                param = line.param,
                "activity"
            );
            cursor += 1;

            match line.activity {
                Activity::Cpu => {
                    frame.time = frame.execution.record(frame.time, line.param, "CPU Burst")?;
                    self.stats.cpu_bursts += 1;
                    self.stats.cpu_ticks += line.param;
                }
                Activity::Syscall => {
                    let vector = self.config.interrupts.syscall_vector;
                    self.service_interrupt(&mut frame, line, vector, "SYSCALL ISR")?;
                    self.stats.syscalls += 1;
                }
                Activity::EndIo => {
                    let vector = self.config.interrupts.end_io_vector;
                    self.service_interrupt(&mut frame, line, vector, "ENDIO ISR")?;
                    self.stats.io_completions += 1;
                }
                Activity::Fork => {
                    cursor = self.fork(&mut frame, trace, cursor - 1, waiting)?;
                }
                Activity::Exec => {
                    self.exec(&mut frame, line, waiting)?;
                    break;
                }
                Activity::IfParent | Activity::IfChild | Activity::EndIf => {}
            }
        }

        Ok(frame)
    }

    fn issue_pid(&mut self) -> Pid {
        let pid = self.next_pid;
        self.next_pid += 1;
        self.stats.processes_created += 1;
        pid
    }

    fn allocate(&mut self, pcb: &mut Pcb) -> SimResult<()> {
        if self.memory.allocate(pcb) {
            Ok(())
        } else {
            Err(SimError::OutOfMemory {
                program: pcb.program.clone(),
                size: pcb.size,
            })
        }
    }

    /// Appends the kernel entry for `vector` and advances the clock past it.
    fn enter_kernel(&mut self, frame: &mut TraceOutcome, vector: usize) -> SimResult<()> {
        let (entry, now) = dispatch(
            frame.time,
            vector,
            self.config.interrupts.context_save_time,
            &self.tables.vectors,
        )?;
        frame.execution.extend(entry);
        frame.time = now;
        self.stats.interrupts += 1;
        Ok(())
    }

    /// Returns to user mode through the scheduler.
    fn leave_kernel(frame: &mut TraceOutcome) -> SimResult<()> {
        frame.time = frame
            .execution
            .record(frame.time, SCHEDULER_TICKS, "scheduler called")?;
        frame.time = frame.execution.record(frame.time, IRET_TICKS, "IRET")?;
        Ok(())
    }

    /// SYSCALL and END_IO: kernel entry, device ISR, IRET.
    fn service_interrupt(
        &mut self,
        frame: &mut TraceOutcome,
        line: &TraceLine,
        vector: usize,
        isr: &str,
    ) -> SimResult<()> {
        let delay = self.tables.delays.delay(line.param)?;
        self.enter_kernel(frame, vector)?;
        frame.time = frame.execution.record(frame.time, delay, isr)?;
        frame.time = frame.execution.record(frame.time, IRET_TICKS, "IRET")?;
        Ok(())
    }

    /// FORK: clones the running process, runs the child's block to completion, then resumes the
    /// parent. Returns the trace index the parent continues from.
    fn fork(
        &mut self,
        frame: &mut TraceOutcome,
        trace: &[TraceLine],
        fork_index: usize,
        waiting: &mut WaitQueue,
    ) -> SimResult<usize> {
        let line = &trace[fork_index];
        let vector = self.config.interrupts.fork_vector;
        self.enter_kernel(frame, vector)?;
        frame.time = frame
            .execution
            .record(frame.time, line.param, "cloning the PCB")?;

        let pid = self.issue_pid();
        let mut child = frame.process.fork_child(pid);
        self.allocate(&mut child)?;
        waiting.push(frame.process.clone());
        self.stats.forks += 1;
        self.stats.peak_wait_depth = self.stats.peak_wait_depth.max(waiting.len());
        info!(
            parent = frame.process.pid,
            child = child.pid,
            partition = ?child.partition,
            time = frame.time,
            "fork"
        );

        Self::leave_kernel(frame)?;
        frame.status.snapshot(frame.time, &line.raw, &child, waiting);

        let block = extract_child_block(trace, fork_index);
        let outcome = self.simulate_trace(&block.body, frame.time, child, waiting)?;
        let mut finished = frame.merge(outcome);

        let parent = waiting.pop();
        debug_assert_eq!(
            parent.map(|p| p.pid),
            Some(frame.process.pid),
            "wait queue popped a process other than the forking parent"
        );
        self.memory.free(&mut finished);
        debug!(
            parent = frame.process.pid,
            child = finished.pid,
            time = frame.time,
            "child finished, parent resumes"
        );
        Ok(block.resume_at)
    }

    /// EXEC: loads a new program into the running process and runs its trace in place of the
    /// rest of the current one.
    fn exec(
        &mut self,
        frame: &mut TraceOutcome,
        line: &TraceLine,
        waiting: &mut WaitQueue,
    ) -> SimResult<()> {
        let program = line
            .program
            .as_deref()
            .ok_or_else(|| SimError::MissingProgramName(line.raw.clone()))?;

        let vector = self.config.interrupts.exec_vector;
        self.enter_kernel(frame, vector)?;

        let size = self.tables.catalog.size_of(program);
        frame.time = frame.execution.record(
            frame.time,
            line.param,
            format!("Program is {size} Mb large"),
        )?;
        let load_time = u64::from(size)
            .checked_mul(self.config.exec.load_ticks_per_mb)
            .ok_or_else(|| SimError::ClockOverflow {
                time: frame.time,
                duration: u64::MAX,
                step: "loading program into memory".to_string(),
            })?;
        frame.time = frame
            .execution
            .record(frame.time, load_time, "loading program into memory")?;

        let mark = self.steps.next_step();
        frame.time = frame
            .execution
            .record(frame.time, mark, "marking partition as occupied")?;

        let update = self.steps.next_step();
        self.memory.free(&mut frame.process);
        frame.process.program = program.to_string();
        frame.process.size = size;
        self.allocate(&mut frame.process)?;
        frame.time = frame.execution.record(frame.time, update, "updating PCB")?;
        self.stats.execs += 1;
        info!(
            pid = frame.process.pid,
            program,
            size,
            partition = ?frame.process.partition,
            time = frame.time,
            "exec"
        );

        Self::leave_kernel(frame)?;
        frame
            .status
            .snapshot(frame.time, &line.raw, &frame.process, waiting);

        let program_trace = self.traces.load(program)?;
        let outcome =
            self.simulate_trace(&program_trace, frame.time, frame.process.clone(), waiting)?;
        frame.process = frame.merge(outcome);
        Ok(())
    }
}

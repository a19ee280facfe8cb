//! EXEC: program replacement, timing and failures.

use crate::common::harness::{TestContext, assert_contiguous, descriptions};
use pretty_assertions::assert_eq;
use trapsim_core::SimError;
use trapsim_core::sim::ProgramDescriptor;

fn with_program1() -> TestContext {
    TestContext::new().with_program("program1", 10, &["CPU, 50"])
}

#[test]
fn exec_sequence_and_timing() {
    let ctx = with_program1();
    let (outcome, _) = ctx.run(&["EXEC program1, 50"]);
    let expected = "\
0, 1, switch to kernel mode
1, 10, context saved
11, 1, find vector 3
12, 1, load address 0x0003 into the PC
13, 50, Program is 10 Mb large
63, 150, loading program into memory
213, 2, marking partition as occupied
215, 3, updating PCB
218, 0, scheduler called
218, 1, IRET
219, 50, CPU Burst
";
    assert_eq!(outcome.execution.to_string(), expected);
    assert_eq!(outcome.time, 269);
}

#[test]
fn lines_after_exec_never_run() {
    let ctx = with_program1();
    let (outcome, sim) = ctx.run(&["EXEC program1, 50", "CPU, 999", "SYSCALL, 0"]);
    assert_eq!(outcome.time, 269);
    assert_eq!(sim.stats().cpu_bursts, 1);
    assert_eq!(sim.stats().syscalls, 0);
}

#[test]
fn exec_replaces_program_and_partition() {
    let ctx = with_program1();
    let (outcome, sim) = ctx.run(&["EXEC program1, 50"]);
    assert_eq!(outcome.process.pid, 0);
    assert_eq!(outcome.process.program, "program1");
    assert_eq!(outcome.process.size, 10);
    assert_eq!(outcome.process.partition, Some(4));
    assert!(sim.memory().get(6).is_some_and(|p| p.is_empty()));
    assert_eq!(sim.memory().get(4).map(|p| p.label()), Some("program1"));

    let status = outcome.status.as_str();
    assert!(status.starts_with("time: 219; current trace: EXEC program1, 50\n"));
    assert!(status.contains("|   0 |    program1 |               4 |   10 | running|"));
}

#[test]
fn unknown_program_has_size_zero() {
    let mut ctx = TestContext::new();
    ctx.source = ctx.source.with_program("ghost", ["CPU, 1"]);
    let (outcome, _) = ctx.run(&["EXEC ghost, 5"]);
    let events = outcome.execution.events();
    assert_eq!(events[4].description, "Program is 0 Mb large");
    assert_eq!(events[5].duration, 0);
    assert_eq!(outcome.process.partition, Some(6));
}

#[test]
fn load_time_scales_with_configuration() {
    let mut ctx = with_program1().with_steps(vec![1]);
    ctx.config.exec.load_ticks_per_mb = 4;
    let (outcome, _) = ctx.run(&["EXEC program1, 0"]);
    let loading: Vec<u64> = outcome
        .execution
        .matching("loading program into memory")
        .map(|e| e.duration)
        .collect();
    assert_eq!(loading, [40]);
    assert_eq!(outcome.time, 13 + 40 + 1 + 1 + 1 + 50);
}

#[test]
fn chained_exec() {
    let ctx = TestContext::new()
        .with_program("program1", 10, &["CPU, 5", "EXEC program2, 1", "CPU, 100"])
        .with_program("program2", 15, &["CPU, 7"]);
    let (outcome, sim) = ctx.run(&["EXEC program1, 1"]);
    assert_eq!(outcome.process.program, "program2");
    assert_eq!(outcome.process.partition, Some(3));
    assert_eq!(outcome.status.len(), 2);
    assert_eq!(sim.stats().execs, 2);
    assert_eq!(sim.stats().cpu_ticks, 12);
    assert_eq!(sim.memory().free_count(), 5);
    assert_contiguous(outcome.execution.events(), 0);
}

#[test]
fn exec_in_child_releases_child_memory() {
    let ctx = with_program1();
    let (outcome, sim) = ctx.run(&[
        "FORK, 10",
        "IF_CHILD, 0",
        "EXEC program1, 20",
        "IF_PARENT, 0",
        "CPU, 7",
        "ENDIF, 0",
    ]);
    assert_eq!(outcome.status.len(), 2);
    let status = outcome.status.as_str();
    assert!(status.contains("|   1 |    program1 |               4 |   10 | running|"));
    assert!(status.contains("|   0 |        init |               6 |    1 | waiting|"));

    assert_eq!(outcome.process.program, "init");
    assert_eq!(sim.memory().free_count(), 5);
    assert_eq!(descriptions(&outcome).last(), Some(&"CPU Burst"));
}

#[test]
fn missing_program_trace_is_fatal() {
    let mut ctx = TestContext::new();
    ctx.programs.push(ProgramDescriptor {
        name: "program1".to_string(),
        size: 10,
    });
    let result = ctx.try_run(&["EXEC program1, 50"]);
    assert!(matches!(result, Err(SimError::Io { .. })));
}

#[test]
fn program_too_large_is_fatal() {
    let ctx = TestContext::new().with_program("big", 50, &["CPU, 1"]);
    let result = ctx.try_run(&["EXEC big, 1"]);
    assert!(matches!(
        result,
        Err(SimError::OutOfMemory { ref program, size: 50 }) if program == "big"
    ));
}

#[test]
fn exec_without_program_name_is_rejected() {
    let ctx = TestContext::new();
    assert!(matches!(
        ctx.try_run(&["EXEC, 50"]),
        Err(SimError::MissingProgramName(_))
    ));
}

#[test]
fn self_exec_cycle_hits_nesting_limit() {
    let mut ctx =
        TestContext::new().with_program("program1", 10, &["CPU, 1", "EXEC program1, 1"]);
    ctx.config.process.max_nesting_depth = 8;
    let result = ctx.try_run(&["EXEC program1, 1"]);
    assert!(matches!(
        result,
        Err(SimError::NestingTooDeep { limit: 8, ref program }) if program == "program1"
    ));
}

#[test]
fn exec_chain_within_limit_succeeds() {
    let mut ctx = TestContext::new()
        .with_program("program1", 10, &["EXEC program2, 1"])
        .with_program("program2", 10, &["CPU, 1"]);
    ctx.config.process.max_nesting_depth = 3;
    let (outcome, sim) = ctx.run(&["EXEC program1, 1"]);
    assert_eq!(outcome.process.program, "program2");
    assert_eq!(sim.stats().execs, 2);
}

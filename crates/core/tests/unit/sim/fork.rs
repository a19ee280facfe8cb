//! FORK: child creation, block skipping, wait queue and nesting.

use crate::common::harness::{TestContext, assert_contiguous, descriptions};
use pretty_assertions::assert_eq;
use trapsim_core::SimError;
use trapsim_core::process::WaitQueue;
use trapsim_core::trace::parse_trace;

const SIMPLE_FORK: [&str; 7] = [
    "FORK, 10",
    "IF_CHILD, 0",
    "CPU, 5",
    "IF_PARENT, 0",
    "CPU, 7",
    "ENDIF, 0",
    "CPU, 3",
];

#[test]
fn fork_entry_and_return_sequence() {
    let ctx = TestContext::new();
    let (outcome, _) = ctx.run(&SIMPLE_FORK);
    let expected = "\
0, 1, switch to kernel mode
1, 10, context saved
11, 1, find vector 2
12, 1, load address 0x0002 into the PC
13, 10, cloning the PCB
23, 0, scheduler called
23, 1, IRET
24, 5, CPU Burst
29, 7, CPU Burst
36, 3, CPU Burst
";
    assert_eq!(outcome.execution.to_string(), expected);
    assert_eq!(outcome.time, 39);
}

#[test]
fn fork_snapshot_shows_child_running_and_parent_waiting() {
    let ctx = TestContext::new();
    let (outcome, _) = ctx.run(&SIMPLE_FORK);
    let expected = "\
time: 24; current trace: FORK, 10
+------------------------------------------------------+
| PID |program name |partition number | size |   state|
+------------------------------------------------------+
|   1 |        init |               5 |    1 | running|
|   0 |        init |               6 |    1 | waiting|
+------------------------------------------------------+

";
    assert_eq!(outcome.status.as_str(), expected);
    assert_eq!(outcome.status.len(), 1);
}

#[test]
fn parent_keeps_identity_and_child_memory_is_released() {
    let ctx = TestContext::new();
    let (outcome, sim) = ctx.run(&SIMPLE_FORK);
    assert_eq!(outcome.process.pid, 0);
    assert_eq!(outcome.process.partition, Some(6));
    assert_eq!(sim.next_pid(), 2);
    assert!(sim.memory().get(5).is_some_and(|p| p.is_empty()));
    assert_eq!(sim.memory().get(6).map(|p| p.label()), Some("init"));
}

#[test]
fn wait_queue_is_restored_after_fork() {
    let ctx = TestContext::new();
    let trace = parse_trace(SIMPLE_FORK).unwrap();
    let mut sim = ctx.simulation();
    let init = sim.boot().unwrap();
    let mut waiting = WaitQueue::new();
    let outcome = sim.simulate_trace(&trace, 100, init, &mut waiting).unwrap();
    assert!(waiting.is_empty());
    assert_eq!(outcome.time, 139);
    assert_contiguous(outcome.execution.events(), 100);
}

#[test]
fn pids_increase_across_forks() {
    let ctx = TestContext::new();
    let (outcome, sim) = ctx.run(&[
        "FORK, 1",
        "IF_CHILD, 0",
        "IF_PARENT, 0",
        "ENDIF, 0",
        "FORK, 1",
        "IF_CHILD, 0",
        "IF_PARENT, 0",
        "ENDIF, 0",
    ]);
    let status = outcome.status.as_str();
    assert!(status.contains("|   1 |        init |               5 |    1 | running|"));
    assert!(status.contains("|   2 |        init |               5 |    1 | running|"));
    assert_eq!(sim.next_pid(), 3);
    assert_eq!(sim.stats().forks, 2);
}

#[test]
fn fork_without_markers_resumes_after_fork() {
    let ctx = TestContext::new();
    let (outcome, _) = ctx.run(&["FORK, 10", "CPU, 5"]);
    assert_eq!(outcome.status.len(), 1);
    assert_eq!(outcome.time, 24 + 5);
    assert_eq!(descriptions(&outcome).last(), Some(&"CPU Burst"));
}

#[test]
fn unterminated_child_block_runs_to_end() {
    let ctx = TestContext::new();
    let (outcome, sim) = ctx.run(&["FORK, 10", "IF_CHILD, 0", "CPU, 5"]);
    assert_eq!(outcome.time, 29);
    assert_eq!(sim.stats().cpu_bursts, 1);
}

#[test]
fn nested_fork_inside_child() {
    let ctx = TestContext::new();
    let (outcome, sim) = ctx.run(&[
        "FORK, 10",
        "IF_CHILD, 0",
        "FORK, 4",
        "IF_CHILD, 0",
        "CPU, 1",
        "IF_PARENT, 0",
        "ENDIF, 0",
        "IF_PARENT, 0",
        "CPU, 2",
        "ENDIF, 0",
    ]);
    assert_eq!(outcome.time, 45);
    assert_eq!(outcome.status.len(), 2);

    let status = outcome.status.as_str();
    assert!(status.contains("time: 42; current trace: FORK, 4"));
    assert!(status.contains("|   2 |        init |               4 |    1 | running|"));
    assert!(status.contains("|   1 |        init |               5 |    1 | waiting|"));

    assert_eq!(sim.stats().peak_wait_depth, 2);
    assert_eq!(sim.next_pid(), 3);
    assert_eq!(sim.memory().free_count(), 5);
    assert_contiguous(outcome.execution.events(), 0);
}

#[test]
fn fork_without_free_partition_is_fatal() {
    let ctx = TestContext::new().with_partitions(vec![2]);
    let result = ctx.try_run(&["FORK, 10"]);
    assert!(matches!(
        result,
        Err(SimError::OutOfMemory { ref program, size: 1 }) if program == "init"
    ));
}

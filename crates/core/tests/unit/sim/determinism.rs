//! Reproducibility and clock invariants.

use crate::common::harness::{TestContext, assert_contiguous};
use proptest::prelude::*;
use trapsim_core::trace::parse_trace;

const WORKLOAD: [&str; 11] = [
    "CPU, 10",
    "FORK, 10",
    "IF_CHILD, 0",
    "EXEC program1, 50",
    "IF_PARENT, 0",
    "SYSCALL, 1",
    "ENDIF, 0",
    "EXEC program2, 25",
    "CPU, 999",
    "CPU, 999",
    "CPU, 999",
];

fn workload_context() -> TestContext {
    TestContext::new()
        .with_program("program1", 10, &["CPU, 50", "END_IO, 2"])
        .with_program("program2", 15, &["SYSCALL, 0", "CPU, 20"])
}

#[test]
fn seeded_runs_are_byte_identical() {
    let ctx = workload_context();
    let trace = parse_trace(WORKLOAD).unwrap();

    let mut first = ctx.seeded_simulation();
    let mut second = ctx.seeded_simulation();
    let a = first.run(&trace).unwrap();
    let b = second.run(&trace).unwrap();

    assert_eq!(a.execution.to_string(), b.execution.to_string());
    assert_eq!(a.status.as_str(), b.status.as_str());
    assert_eq!(a.time, b.time);
}

#[test]
fn seeded_micro_steps_stay_in_range() {
    let ctx = workload_context();
    let trace = parse_trace(WORKLOAD).unwrap();
    let mut sim = ctx.seeded_simulation();
    let outcome = sim.run(&trace).unwrap();

    let steps: Vec<u64> = outcome
        .execution
        .matching("marking partition as occupied")
        .chain(outcome.execution.matching("updating PCB"))
        .map(|e| e.duration)
        .collect();
    assert_eq!(steps.len(), 4);
    assert!(steps.iter().all(|d| (1..=10).contains(d)));
    assert_contiguous(outcome.execution.events(), 0);
}

fn activity_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..200).prop_map(|n| format!("CPU, {n}")),
        (0u64..3).prop_map(|n| format!("SYSCALL, {n}")),
        (0u64..3).prop_map(|n| format!("END_IO, {n}")),
        (0u64..20).prop_map(|n| format!("FORK, {n}")),
        Just("IF_CHILD, 0".to_string()),
        Just("IF_PARENT, 0".to_string()),
        Just("ENDIF, 0".to_string()),
    ]
}

proptest! {
    #[test]
    fn clock_never_goes_backwards(lines in prop::collection::vec(activity_line(), 0..24)) {
        let ctx = TestContext::new().with_partitions(vec![1; 32]);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let (outcome, _) = ctx.run(&refs);

        assert_contiguous(outcome.execution.events(), 0);
        let end = outcome.execution.events().last().map_or(0, |e| e.end());
        prop_assert_eq!(outcome.time, end);
    }
}

//! Sources of the randomized EXEC micro-step durations.
//!
//! Marking the new partition and updating the PCB take a random number of ticks. The production
//! source is a seeded ChaCha generator owned by the simulation, so a run is reproducible and the
//! stream is never reseeded by nested traces. Tests script the durations instead.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies micro-step durations in ticks.
pub trait StepSource: fmt::Debug {
    /// Duration of the next micro-step.
    fn next_step(&mut self) -> u64;
}

/// Uniform durations in `[min, max]` drawn from a seeded generator.
#[derive(Debug, Clone)]
pub struct SeededSteps {
    rng: ChaCha8Rng,
    min: u64,
    max: u64,
}

impl SeededSteps {
    /// Creates a generator for the inclusive range `[min, max]`.
    ///
    /// A reversed range is treated as the single value `min`.
    pub fn new(seed: u64, min: u64, max: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            min,
            max: max.max(min),
        }
    }
}

impl StepSource for SeededSteps {
    fn next_step(&mut self) -> u64 {
        self.rng.gen_range(self.min..=self.max)
    }
}

/// Durations replayed from a fixed script, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSteps {
    steps: Vec<u64>,
    cursor: usize,
}

impl ScriptedSteps {
    /// Replays `steps` in order. An empty script yields zero-tick steps.
    pub const fn new(steps: Vec<u64>) -> Self {
        Self { steps, cursor: 0 }
    }
}

impl StepSource for ScriptedSteps {
    fn next_step(&mut self) -> u64 {
        if self.steps.is_empty() {
            return 0;
        }
        let step = self.steps[self.cursor % self.steps.len()];
        self.cursor += 1;
        step
    }
}

//! Execution event log.
//!
//! Every simulated step appends one [`Event`]. The log renders as `execution.txt`, one event per
//! line in the form `time, duration, description`.

use std::fmt;

use crate::common::{SimError, SimResult};

/// One timed step of the simulated machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Clock value when the step starts.
    pub time: u64,
    /// Ticks the step takes.
    pub duration: u64,
    /// What the machine does.
    pub description: String,
}

impl Event {
    /// Clock value when the step completes.
    ///
    /// Recorded events never overflow; [`EventLog::record`] rejects them first.
    pub const fn end(&self) -> u64 {
        self.time.saturating_add(self.duration)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.time, self.duration, self.description)
    }
}

/// Ordered events of a run or of one recursive trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Records a step of `duration` ticks starting at `time` and returns the time it ends.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ClockOverflow`] if the step would end past `u64::MAX`; nothing is
    /// recorded in that case.
    pub fn record(
        &mut self,
        time: u64,
        duration: u64,
        description: impl Into<String>,
    ) -> SimResult<u64> {
        let description = description.into();
        let Some(end) = time.checked_add(duration) else {
            return Err(SimError::ClockOverflow {
                time,
                duration,
                step: description,
            });
        };
        self.events.push(Event {
            time,
            duration,
            description,
        });
        Ok(end)
    }

    /// Appends every event of `other`, keeping order.
    pub fn extend(&mut self, other: Self) {
        self.events.extend(other.events);
    }

    /// Recorded events in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events whose description is exactly `description`.
    pub fn matching<'a>(&'a self, description: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events
            .iter()
            .filter(move |e| e.description == description)
    }
}

impl fmt::Display for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}

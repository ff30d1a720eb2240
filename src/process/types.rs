/*!
 * Process Types
 * Descriptors for simulated processes
 */

use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Deserializer, Serialize};

/// A simulated process
///
/// `remaining_burst_time` starts at `burst_time` and only the scheduler
/// engine decrements it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessDescriptor {
    pub id: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    #[serde(skip_serializing)]
    remaining_burst_time: Tick,
}

impl ProcessDescriptor {
    pub fn new(id: Pid, arrival_time: Tick, burst_time: Tick) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            remaining_burst_time: burst_time,
        }
    }

    #[inline(always)]
    pub const fn remaining_burst_time(&self) -> Tick {
        self.remaining_burst_time
    }

    #[inline(always)]
    pub const fn is_finished(&self) -> bool {
        self.remaining_burst_time == 0
    }

    /// Arrived by `time` and still has work left
    #[inline(always)]
    pub const fn is_eligible(&self, time: Tick) -> bool {
        self.arrival_time <= time && self.remaining_burst_time > 0
    }

    /// Consume one tick of CPU, returning the remaining burst
    pub(crate) fn run_for_tick(&mut self) -> Tick {
        debug_assert!(self.remaining_burst_time > 0, "ran a finished process");
        self.remaining_burst_time = self.remaining_burst_time.saturating_sub(1);
        self.remaining_burst_time
    }

    /// Restore the full burst so the descriptor can be simulated again
    pub fn reset(&mut self) {
        self.remaining_burst_time = self.burst_time;
    }
}

impl<'de> Deserialize<'de> for ProcessDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Inner {
            id: Pid,
            arrival_time: Tick,
            burst_time: Tick,
        }

        let inner = Inner::deserialize(deserializer)?;
        Ok(Self::new(inner.id, inner.arrival_time, inner.burst_time))
    }
}

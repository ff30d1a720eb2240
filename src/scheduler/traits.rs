/*!
 * Scheduler Traits
 * Observation hooks for the simulation loop
 */

use super::types::TickEvent;
use tracing::{debug, trace};

/// Receives every tick event the engine produces, in order
pub trait TickObserver {
    fn on_tick(&mut self, event: &TickEvent);
}

/// Discards all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TickObserver for NoopObserver {
    #[inline(always)]
    fn on_tick(&mut self, _event: &TickEvent) {}
}

/// Logs the schedule: ticks at trace level, completions at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl TickObserver for TracingObserver {
    fn on_tick(&mut self, event: &TickEvent) {
        match *event {
            TickEvent::Idle { time } => trace!(time, "CPU idle"),
            TickEvent::Ran {
                time,
                pid,
                remaining,
            } => trace!(time, pid, remaining, "Executing process"),
            TickEvent::Completed(c) => debug!(
                pid = c.pid,
                completion_time = c.completion_time,
                waiting_time = c.waiting_time(),
                turnaround_time = c.turnaround_time(),
                "Process finished"
            ),
        }
    }
}

/// Collects events into a vector
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<TickEvent>,
}

impl TickObserver for EventLog {
    fn on_tick(&mut self, event: &TickEvent) {
        self.events.push(*event);
    }
}

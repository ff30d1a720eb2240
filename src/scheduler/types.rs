/*!
 * Scheduler Types
 * Metric records, per-process completions, and tick events
 */

use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Serialize};

/// Label of the first metric written per run
pub const AVERAGE_WAITING_TIME: &str = "Average waiting time";

/// Label of the second metric written per run
pub const AVERAGE_TURNAROUND_TIME: &str = "Average turnaround time";

/// One aggregate metric handed from the scheduler to the writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub label: String,
    pub value: f64,
}

impl MetricRecord {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Output line `"<label> = <value>.\n"` with `precision` fractional digits
    pub fn render(&self, precision: usize) -> String {
        format!("{} = {:.*}.\n", self.label, precision, self.value)
    }
}

/// A finished process and its derived times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Completion {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
    pub completion_time: Tick,
}

impl Completion {
    /// completion - arrival - burst
    #[inline(always)]
    pub const fn waiting_time(&self) -> Tick {
        self.completion_time - self.arrival_time - self.burst_time
    }

    /// completion - arrival
    #[inline(always)]
    pub const fn turnaround_time(&self) -> Tick {
        self.completion_time - self.arrival_time
    }
}

/// What happened during one simulated tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// No process was eligible
    Idle { time: Tick },
    /// `pid` ran for the tick starting at `time`
    Ran {
        time: Tick,
        pid: Pid,
        remaining: Tick,
    },
    /// Emitted right after the `Ran` event that finished the process
    Completed(Completion),
}

/// Outcome of one full simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulationReport {
    /// In completion order
    pub completions: Vec<Completion>,
    pub total_waiting_time: Tick,
    pub total_turnaround_time: Tick,
    pub busy_ticks: Tick,
    pub idle_ticks: Tick,
    /// Time after the last tick
    pub finish_time: Tick,
}

impl SimulationReport {
    pub fn process_count(&self) -> usize {
        self.completions.len()
    }

    /// Arithmetic mean; zero for an empty run
    pub fn average_waiting_time(&self) -> f64 {
        mean(self.total_waiting_time, self.process_count())
    }

    /// Arithmetic mean; zero for an empty run
    pub fn average_turnaround_time(&self) -> f64 {
        mean(self.total_turnaround_time, self.process_count())
    }

    /// The two records handed to the writer, waiting time first
    pub fn metrics(&self) -> [MetricRecord; 2] {
        [
            MetricRecord::new(AVERAGE_WAITING_TIME, self.average_waiting_time()),
            MetricRecord::new(AVERAGE_TURNAROUND_TIME, self.average_turnaround_time()),
        ]
    }

    pub fn completion_of(&self, pid: Pid) -> Option<&Completion> {
        self.completions.iter().find(|c| c.pid == pid)
    }
}

fn mean(total: Tick, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_precision() {
        let record = MetricRecord::new(AVERAGE_WAITING_TIME, 47.0 / 7.0);
        assert_eq!(record.render(6), "Average waiting time = 6.714286.\n");

        let record = MetricRecord::new(AVERAGE_TURNAROUND_TIME, 12.0);
        assert_eq!(record.render(6), "Average turnaround time = 12.000000.\n");
        assert_eq!(record.render(2), "Average turnaround time = 12.00.\n");
    }

    #[test]
    fn test_completion_times() {
        let c = Completion {
            pid: 1,
            arrival_time: 8,
            burst_time: 10,
            completion_time: 45,
        };
        assert_eq!(c.waiting_time(), 27);
        assert_eq!(c.turnaround_time(), 37);
    }

    #[test]
    fn test_empty_report_averages() {
        let report = SimulationReport::default();
        assert_eq!(report.average_waiting_time(), 0.0);
        assert_eq!(report.average_turnaround_time(), 0.0);

        let [waiting, turnaround] = report.metrics();
        assert_eq!(waiting.label, AVERAGE_WAITING_TIME);
        assert_eq!(turnaround.label, AVERAGE_TURNAROUND_TIME);
    }
}

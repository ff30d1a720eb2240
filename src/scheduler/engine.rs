/*!
 * SRTF Engine
 * Preemptive shortest-remaining-time-first simulation over a fixed table
 */

use super::traits::{NoopObserver, TickObserver};
use super::types::{Completion, SimulationReport, TickEvent};
use crate::core::errors::SchedulerError;
use crate::core::sync::ShutdownFlag;
use crate::core::types::Tick;
use crate::process::{validate_processes, ProcessDescriptor};
use tracing::{debug, info};

/// Discrete-time SRTF simulator
///
/// Every tick runs the arrived, unfinished process with the least remaining
/// burst (lowest index wins ties) for one time unit, or idles the CPU.
#[derive(Debug, Default, Clone, Copy)]
pub struct SrtfEngine<'a> {
    shutdown: Option<&'a ShutdownFlag>,
    tick_budget: Option<Tick>,
}

impl<'a> SrtfEngine<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop with `Cancelled` once `flag` is raised, checked between ticks
    pub fn with_shutdown(mut self, flag: &'a ShutdownFlag) -> Self {
        self.shutdown = Some(flag);
        self
    }

    /// Cap the number of simulated ticks
    ///
    /// Without a budget the cap is `max(arrival) + sum(burst)`, the latest
    /// time any valid table can finish.
    pub fn with_tick_budget(mut self, ticks: Tick) -> Self {
        self.tick_budget = Some(ticks);
        self
    }

    /// Simulate `processes` to completion
    pub fn run(
        &self,
        processes: &mut [ProcessDescriptor],
    ) -> Result<SimulationReport, SchedulerError> {
        self.run_observed(processes, &mut NoopObserver)
    }

    /// Simulate `processes` to completion, reporting each tick to `observer`
    pub fn run_observed<O>(
        &self,
        processes: &mut [ProcessDescriptor],
        observer: &mut O,
    ) -> Result<SimulationReport, SchedulerError>
    where
        O: TickObserver + ?Sized,
    {
        validate_processes(processes)?;

        let horizon = match self.tick_budget {
            Some(budget) => budget,
            None => horizon(processes).ok_or_else(|| SchedulerError::InvariantViolation {
                time: 0,
                reason: "arrival and burst times overflow the simulation clock".to_string(),
            })?,
        };

        let total = processes.len();
        let mut report = SimulationReport {
            completions: Vec::with_capacity(total),
            ..SimulationReport::default()
        };
        let mut time: Tick = 0;

        while report.completions.len() < total {
            if self.shutdown.is_some_and(ShutdownFlag::is_requested) {
                debug!(time, "Shutdown observed, abandoning simulation");
                return Err(SchedulerError::Cancelled { time });
            }

            if time >= horizon {
                return Err(SchedulerError::InvariantViolation {
                    time,
                    reason: format!(
                        "{} of {} processes unfinished after {} ticks",
                        total - report.completions.len(),
                        total,
                        horizon
                    ),
                });
            }

            match select_shortest(processes, time) {
                None => {
                    if !processes
                        .iter()
                        .any(|p| !p.is_finished() && p.arrival_time > time)
                    {
                        return Err(SchedulerError::InvariantViolation {
                            time,
                            reason: "CPU idle but no unfinished process arrives later"
                                .to_string(),
                        });
                    }
                    report.idle_ticks += 1;
                    observer.on_tick(&TickEvent::Idle { time });
                }
                Some(index) => {
                    let process = &mut processes[index];
                    let remaining = process.run_for_tick();
                    report.busy_ticks += 1;
                    observer.on_tick(&TickEvent::Ran {
                        time,
                        pid: process.id,
                        remaining,
                    });

                    if remaining == 0 {
                        let completion = Completion {
                            pid: process.id,
                            arrival_time: process.arrival_time,
                            burst_time: process.burst_time,
                            completion_time: time + 1,
                        };
                        report.total_waiting_time += completion.waiting_time();
                        report.total_turnaround_time += completion.turnaround_time();
                        report.completions.push(completion);
                        observer.on_tick(&TickEvent::Completed(completion));
                    }
                }
            }

            time += 1;
        }

        report.finish_time = time;
        info!(
            processes = total,
            finish_time = time,
            busy_ticks = report.busy_ticks,
            idle_ticks = report.idle_ticks,
            average_waiting_time = report.average_waiting_time(),
            average_turnaround_time = report.average_turnaround_time(),
            "Simulation complete"
        );

        Ok(report)
    }
}

/// Index of the eligible process with the least remaining burst
///
/// Strict comparison keeps the first scanned process on ties.
fn select_shortest(processes: &[ProcessDescriptor], time: Tick) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, process) in processes.iter().enumerate() {
        if !process.is_eligible(time) {
            continue;
        }
        match best {
            Some(b) if processes[b].remaining_burst_time() <= process.remaining_burst_time() => {}
            _ => best = Some(index),
        }
    }
    best
}

/// Latest tick by which a valid table must be finished
fn horizon(processes: &[ProcessDescriptor]) -> Option<Tick> {
    let last_arrival = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |acc, p| acc.checked_add(p.burst_time))
}

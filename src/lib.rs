/*!
 * SRTF Scheduling Simulator Library
 * Preemptive shortest-remaining-time-first simulation with a
 * scheduler → writer metrics hand-off
 */

pub mod core;
pub mod ipc;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod supervisor;
pub mod writer;

// Re-exports
pub use crate::core::{
    ConfigError, RunConfig, SchedulerError, SimError, SimResult, WaitError, WriterError,
};
pub use crate::core::sync::{Semaphore, ShutdownFlag};
pub use ipc::{ChannelConfig, ChannelError, HandoffChannel, HandoffContext};
pub use monitoring::init_tracing;
pub use process::{ProcessDescriptor, ProcessTable};
pub use scheduler::{run_scheduler_task, MetricRecord, SimulationReport, SrtfEngine};
pub use supervisor::{RunSummary, Supervisor};
pub use writer::{WriterSink, WriterSummary};

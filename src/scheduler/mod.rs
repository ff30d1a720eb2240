/*!
 * Scheduler Module
 * SRTF simulation engine and the producer task that publishes its metrics
 */

pub mod engine;
pub mod task;
pub mod traits;
pub mod types;

// Re-export public API
pub use engine::SrtfEngine;
pub use task::run_scheduler_task;
pub use traits::{EventLog, NoopObserver, TickObserver, TracingObserver};
pub use types::{
    Completion, MetricRecord, SimulationReport, TickEvent, AVERAGE_TURNAROUND_TIME,
    AVERAGE_WAITING_TIME,
};

/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Tick;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// Re-export ChannelError from ipc module
pub use crate::ipc::ChannelError;

// Re-export WaitError from sync module
pub use super::sync::WaitError;

/// Configuration errors (bad arguments, environment, or process table)
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Usage: {program} <output-file>")]
    #[diagnostic(
        code(config::usage),
        help("Supply exactly one argument, the output file name, e.g. 'metrics.txt'.")
    )]
    Usage { program: String },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Unset the variable to use the default, or supply a value in range.")
    )]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Cannot read process table {path:?}")]
    #[diagnostic(
        code(config::table_unreadable),
        help("Check that the file named by SCHED_PROCESS_TABLE exists and is readable.")
    )]
    TableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed process table {path:?}")]
    #[diagnostic(
        code(config::table_malformed),
        help("Expected a JSON array of objects with id, arrival_time and burst_time.")
    )]
    TableParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid process table: {0}")]
    #[diagnostic(transparent)]
    InvalidTable(#[from] SchedulerError),
}

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid process: {0}")]
    #[diagnostic(
        code(scheduler::invalid_process),
        help("Process ids must be unique and >= 1, burst times must be positive.")
    )]
    InvalidProcess(String),

    #[error("Scheduler made no progress at tick {time}: {reason}")]
    #[diagnostic(
        code(scheduler::invariant_violation),
        help("The process table is malformed: some unfinished process can never run.")
    )]
    InvariantViolation { time: Tick, reason: String },

    #[error("Simulation cancelled at tick {time}")]
    #[diagnostic(
        code(scheduler::cancelled),
        help("Shutdown was requested by the writer before the simulation finished.")
    )]
    Cancelled { time: Tick },

    #[error("Hand-off failed: {0}")]
    #[diagnostic(transparent)]
    Channel(#[from] ChannelError),
}

/// Writer-side errors: destination resource and drain failures
#[derive(Error, Debug, Diagnostic)]
pub enum WriterError {
    #[error("Cannot open {path:?} for writing")]
    #[diagnostic(
        code(writer::open_failed),
        help("Check that the directory exists and is writable.")
    )]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write to {path:?} failed")]
    #[diagnostic(code(writer::write_failed), help("The destination may be full or gone."))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Closing {path:?} failed")]
    #[diagnostic(
        code(writer::close_failed),
        help("Buffered metrics could not be flushed to storage.")
    )]
    CloseFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Hand-off failed: {0}")]
    #[diagnostic(transparent)]
    Channel(#[from] ChannelError),

    #[error("Signal wait failed: {0}")]
    #[diagnostic(code(writer::signal_failed))]
    Signal(#[from] WaitError),
}

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Scheduler error: {0}")]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Writer error: {0}")]
    #[diagnostic(transparent)]
    Writer(#[from] WriterError),

    #[error("Channel resource error: {0}")]
    #[diagnostic(transparent)]
    Channel(#[from] ChannelError),

    #[error("{task} task failed: {reason}")]
    #[diagnostic(
        code(supervisor::task_failed),
        help("A task panicked or was aborted by the runtime. View logs for details.")
    )]
    TaskFailed { task: &'static str, reason: String },
}

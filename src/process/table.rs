/*!
 * Process Table
 * Built-in workload and JSON-backed tables
 */

use super::types::ProcessDescriptor;
use super::validation::validate_processes;
use crate::core::errors::{ConfigError, SchedulerError};
use std::path::Path;
use tracing::info;

/// Built-in workload as (id, arrival time, burst time)
const BUILTIN_WORKLOAD: [(u32, u64, u64); 7] = [
    (1, 8, 10),
    (2, 10, 3),
    (3, 14, 7),
    (4, 9, 5),
    (5, 16, 4),
    (6, 21, 6),
    (7, 26, 2),
];

/// Ordered, validated set of processes to simulate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTable {
    processes: Vec<ProcessDescriptor>,
}

impl ProcessTable {
    /// Validate and wrap an ordered list of descriptors
    pub fn new(processes: Vec<ProcessDescriptor>) -> Result<Self, SchedulerError> {
        validate_processes(&processes)?;
        Ok(Self { processes })
    }

    /// The fixed seven-process workload
    pub fn builtin() -> Self {
        Self {
            processes: BUILTIN_WORKLOAD
                .iter()
                .map(|&(id, arrival, burst)| ProcessDescriptor::new(id, arrival, burst))
                .collect(),
        }
    }

    /// Load a JSON array of `{id, arrival_time, burst_time}` objects
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::TableRead {
            path: path.to_path_buf(),
            source,
        })?;

        let processes: Vec<ProcessDescriptor> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::TableParse {
                path: path.to_path_buf(),
                source,
            })?;

        let table = Self::new(processes)?;
        info!(path = %path.display(), processes = table.len(), "Loaded process table");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessDescriptor> {
        self.processes.iter()
    }

    /// Mutable view for the scheduler engine
    pub fn as_mut_slice(&mut self) -> &mut [ProcessDescriptor] {
        &mut self.processes
    }
}

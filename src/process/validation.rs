/*!
 * Process Table Validation
 * Rejects descriptors the scheduler engine cannot simulate
 */

use super::types::ProcessDescriptor;
use crate::core::errors::SchedulerError;
use std::collections::HashSet;

/// Validate a process table before simulation
///
/// Ids must be unique and non-zero, bursts positive, and every descriptor
/// fresh (not partially run).
pub fn validate_processes(processes: &[ProcessDescriptor]) -> Result<(), SchedulerError> {
    let mut seen = HashSet::with_capacity(processes.len());

    for process in processes {
        if process.id == 0 {
            return Err(SchedulerError::InvalidProcess(
                "process id must be >= 1".to_string(),
            ));
        }

        if !seen.insert(process.id) {
            return Err(SchedulerError::InvalidProcess(format!(
                "duplicate process id {}",
                process.id
            )));
        }

        if process.burst_time == 0 {
            return Err(SchedulerError::InvalidProcess(format!(
                "process {} has a zero burst time",
                process.id
            )));
        }

        if process.remaining_burst_time() != process.burst_time {
            return Err(SchedulerError::InvalidProcess(format!(
                "process {} was already partially simulated ({} of {} left)",
                process.id,
                process.remaining_burst_time(),
                process.burst_time
            )));
        }
    }

    Ok(())
}

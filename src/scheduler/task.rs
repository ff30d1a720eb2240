/*!
 * Scheduler Task
 * Producer side of the hand-off: simulate, publish both metrics, end the stream
 */

use super::engine::SrtfEngine;
use super::traits::TracingObserver;
use super::types::SimulationReport;
use crate::core::errors::SchedulerError;
use crate::ipc::HandoffContext;
use crate::process::ProcessTable;
use tracing::{error, info, warn};

/// Run the simulation over `table` and hand its metrics to the writer
///
/// Never blocks on the writer. The signal stream is closed on every exit
/// path so a waiting writer always wakes.
pub fn run_scheduler_task(
    ctx: &HandoffContext,
    mut table: ProcessTable,
) -> Result<SimulationReport, SchedulerError> {
    info!(processes = table.len(), "Scheduler task started");
    if table.is_empty() {
        warn!("Empty process table, both averages will be zero");
    }

    let result = simulate_and_publish(ctx, &mut table);
    ctx.finish();

    match &result {
        Ok(_) => info!(
            written = ctx.channel().written(),
            "Scheduler task finished"
        ),
        Err(SchedulerError::Cancelled { time }) => {
            info!(time, "Scheduler task stopped on shutdown request")
        }
        Err(e) => error!(error = %e, "Scheduler task failed"),
    }

    result
}

fn simulate_and_publish(
    ctx: &HandoffContext,
    table: &mut ProcessTable,
) -> Result<SimulationReport, SchedulerError> {
    let report = SrtfEngine::new()
        .with_shutdown(ctx.shutdown())
        .run_observed(table.as_mut_slice(), &mut TracingObserver)?;

    ctx.publish(&report.metrics())?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::ChannelConfig;
    use crate::process::ProcessDescriptor;

    #[test]
    fn test_publishes_two_records_and_closes() {
        let ctx = HandoffContext::new(ChannelConfig::default()).unwrap();
        let report = run_scheduler_task(&ctx, ProcessTable::builtin()).unwrap();

        assert_eq!(report.process_count(), 7);
        assert_eq!(ctx.channel().count(), 2);
        assert_eq!(ctx.signal().posted(), 1);
        assert!(ctx.signal().is_closed());
    }

    #[test]
    fn test_closes_stream_on_failure() {
        let ctx = HandoffContext::new(ChannelConfig::new(16, 2).unwrap()).unwrap();
        let table = ProcessTable::new(vec![ProcessDescriptor::new(1, 0, 1)]).unwrap();

        // 16 bytes cannot hold "Average waiting time = 0.\n"
        let err = run_scheduler_task(&ctx, table).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::Channel(crate::ipc::ChannelError::RecordTooLarge { .. })
        ));
        assert_eq!(ctx.signal().posted(), 0);
        assert!(ctx.signal().is_closed());
    }

    #[test]
    fn test_honours_shutdown() {
        let ctx = HandoffContext::new(ChannelConfig::default()).unwrap();
        ctx.shutdown().request();

        assert!(matches!(
            run_scheduler_task(&ctx, ProcessTable::builtin()),
            Err(SchedulerError::Cancelled { time: 0 })
        ));
        assert_eq!(ctx.channel().written(), 0);
    }
}

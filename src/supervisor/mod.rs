/*!
 * Supervisor
 *
 * Owns the hand-off context for one run: spawns the scheduler (blocking
 * worker, it never suspends) and the writer (async task), waits for the
 * writer, joins the scheduler, and releases the channel.
 */

use crate::core::config::RunConfig;
use crate::core::errors::SimError;
use crate::core::types::SimResult;
use crate::ipc::HandoffContext;
use crate::monitoring::{generate_run_id, run_span};
use crate::process::ProcessTable;
use crate::scheduler::{run_scheduler_task, SimulationReport};
use crate::writer::{WriterSink, WriterSummary};
use std::sync::Arc;
use tokio::task::JoinError;
use tracing::{debug, info, Instrument, Span};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: String,
    pub report: SimulationReport,
    pub writer: WriterSummary,
}

#[derive(Debug, Clone)]
pub struct Supervisor {
    config: RunConfig,
}

impl Supervisor {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline over the configured process table
    pub async fn run(&self) -> SimResult<RunSummary> {
        let table = self.config.load_processes()?;
        self.run_with_table(table).await
    }

    /// Run the pipeline over `table`
    pub async fn run_with_table(&self, table: ProcessTable) -> SimResult<RunSummary> {
        let run_id = generate_run_id();
        let span = run_span(&run_id);

        self.supervise(run_id, table).instrument(span).await
    }

    async fn supervise(&self, run_id: String, table: ProcessTable) -> SimResult<RunSummary> {
        info!(
            output = %self.config.output.display(),
            processes = table.len(),
            record_capacity = self.config.channel.record_capacity,
            slots = self.config.channel.slots,
            "Starting run"
        );

        let ctx = Arc::new(HandoffContext::new(self.config.channel)?);

        let scheduler = {
            let ctx = Arc::clone(&ctx);
            let span = Span::current();
            tokio::task::spawn_blocking(move || {
                let _entered = span.enter();
                run_scheduler_task(&ctx, table)
            })
        };

        let writer = {
            let ctx = Arc::clone(&ctx);
            let sink = WriterSink::new(&self.config.output).with_precision(self.config.precision);
            tokio::spawn(async move { sink.run(ctx).await }.instrument(Span::current()))
        };

        // Only the writer's completion gates shutdown; the scheduler has
        // already finished or observed the shutdown flag by then.
        let writer_result = writer.await;
        let scheduler_result = scheduler.await;

        ctx.teardown();
        debug!(
            written = ctx.channel().written(),
            drained = ctx.channel().drained(),
            "Channel released"
        );

        let writer = writer_result.map_err(|e| task_failed("writer", e))??;
        let report = scheduler_result.map_err(|e| task_failed("scheduler", e))??;

        info!(
            records = writer.records_written,
            average_waiting_time = report.average_waiting_time(),
            average_turnaround_time = report.average_turnaround_time(),
            "Run complete"
        );

        Ok(RunSummary {
            run_id,
            report,
            writer,
        })
    }
}

fn task_failed(task: &'static str, err: JoinError) -> SimError {
    SimError::TaskFailed {
        task,
        reason: err.to_string(),
    }
}

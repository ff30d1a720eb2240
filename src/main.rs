/*!
 * SRTF Scheduling Simulator - Main Entry Point
 *
 * Usage: sched-handoff <output-file>
 *
 * Simulates the process table, hands the averages from the scheduler task
 * to the writer task, and persists them to <output-file>.
 */

use std::process::ExitCode;
use tracing::info;

use sched_handoff::{init_tracing, RunConfig, SimError, Supervisor};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = match RunConfig::from_args(std::env::args()) {
        Ok(config) => config,
        Err(e) => return fail(e.into()),
    };
    let precision = config.precision;

    match Supervisor::new(config).run().await {
        Ok(summary) => {
            for record in summary.report.metrics() {
                print!("{}", record.render(precision));
            }
            info!(
                run_id = %summary.run_id,
                output = %summary.writer.path.display(),
                "Metrics persisted"
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn fail(err: SimError) -> ExitCode {
    eprintln!("{:?}", miette::Report::new(err));
    ExitCode::from(1)
}

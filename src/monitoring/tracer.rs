/*!
 * Structured Tracing
 * Subscriber setup and per-run spans using the tracing crate
 *
 * Environment variables:
 * - RUST_LOG: log filter (default: info)
 * - SCHED_TRACE_JSON: JSON output when "1" or "true" (default: false)
 */

use crate::core::limits::ENV_TRACE_JSON;
use tracing::{info, info_span, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing on stderr
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(ENV_TRACE_JSON)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let initialized = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if initialized.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique id for correlating one pipeline run
pub fn generate_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping one pipeline run
pub fn run_span(run_id: &str) -> Span {
    info_span!("run", run_id = %run_id)
}

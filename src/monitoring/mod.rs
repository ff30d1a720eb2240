/*!
 * Monitoring Module
 * Structured logging for the simulator
 */

pub mod tracer;

pub use tracer::{generate_run_id, init_tracing, run_span};

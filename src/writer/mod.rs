/*!
 * Writer Module
 * Persists handed-off metrics to the output destination
 */

pub mod sink;

pub use sink::{WriterSink, WriterSummary};

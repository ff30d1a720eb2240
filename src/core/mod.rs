/*!
 * Core Module
 * Fundamental types, configuration, limits, synchronization, and error handling
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod sync;
pub mod types;

// Re-export for convenience
pub use config::RunConfig;
pub use errors::*;
pub use types::*;

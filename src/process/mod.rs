/*!
 * Process Module
 * Process descriptors, the built-in table, and table validation
 */

pub mod table;
pub mod types;
pub mod validation;

// Re-export for convenience
pub use table::ProcessTable;
pub use types::ProcessDescriptor;
pub use validation::validate_processes;

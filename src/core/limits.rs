/*!
 * System Limits and Constants
 *
 * Centralized location for channel sizing, output formatting and
 * configuration bounds. Grouped by domain.
 */

// =============================================================================
// HAND-OFF CHANNEL
// =============================================================================

/// Default fixed width of one serialized record (64 bytes)
/// Holds `"<label> = <value>.\n"` with a full-precision f64 and a 24-byte label
pub const DEFAULT_RECORD_CAPACITY: usize = 64;

/// Smallest accepted record width
pub const MIN_RECORD_CAPACITY: usize = 16;

/// Largest accepted record width (4KB)
pub const MAX_RECORD_CAPACITY: usize = 4 * 1024;

/// Default number of record slots in the channel
/// One run produces exactly two metrics
pub const DEFAULT_CHANNEL_SLOTS: usize = 2;

/// Largest accepted slot count
pub const MAX_CHANNEL_SLOTS: usize = 1024;

/// Padding byte for unused record space
pub const RECORD_PAD_BYTE: u8 = 0;

// =============================================================================
// OUTPUT
// =============================================================================

/// Fractional digits written for each metric value (printf `%f` default)
pub const DEFAULT_VALUE_PRECISION: usize = 6;

/// Upper bound on fractional digits; f64 carries ~17 significant digits
pub const MAX_VALUE_PRECISION: usize = 17;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Bytes per serialized record
pub const ENV_RECORD_CAPACITY: &str = "SCHED_RECORD_CAPACITY";

/// Record slots in the channel
pub const ENV_CHANNEL_SLOTS: &str = "SCHED_CHANNEL_SLOTS";

/// Fractional digits in the output file
pub const ENV_VALUE_PRECISION: &str = "SCHED_VALUE_PRECISION";

/// Optional JSON process table
pub const ENV_PROCESS_TABLE: &str = "SCHED_PROCESS_TABLE";

/// JSON log output toggle
pub const ENV_TRACE_JSON: &str = "SCHED_TRACE_JSON";

/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Simulated time, in scheduler ticks
pub type Tick = u64;

/// Size type for buffer accounting
pub type Size = usize;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;

/*!
 * IPC Types
 * Channel configuration and errors for the metrics hand-off
 */

use crate::core::limits::{
    DEFAULT_CHANNEL_SLOTS, DEFAULT_RECORD_CAPACITY, MAX_CHANNEL_SLOTS, MAX_RECORD_CAPACITY,
    MIN_RECORD_CAPACITY,
};
use crate::core::types::Size;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hand-off channel error types
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ChannelError {
    #[error("Record of {size} bytes exceeds record capacity of {capacity} bytes")]
    #[diagnostic(
        code(ipc::record_too_large),
        help("Raise SCHED_RECORD_CAPACITY; records are never truncated.")
    )]
    RecordTooLarge { size: Size, capacity: Size },

    #[error("Channel full: all {slots} record slots in use")]
    #[diagnostic(
        code(ipc::channel_full),
        help("Raise SCHED_CHANNEL_SLOTS or drain the channel before writing more.")
    )]
    Full { slots: Size },

    #[error("Channel closed")]
    #[diagnostic(code(ipc::closed))]
    Closed,

    #[error("Invalid record label: {0}")]
    #[diagnostic(code(ipc::invalid_label))]
    InvalidLabel(String),

    #[error("Corrupt record: {0}")]
    #[diagnostic(
        code(ipc::corrupt_record),
        help("A record could not be decoded; producer and consumer disagree on the format.")
    )]
    Corrupt(String),

    #[error("Invalid channel configuration: {0}")]
    #[diagnostic(code(ipc::invalid_config))]
    InvalidConfig(String),
}

/// Channel sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChannelConfig {
    /// Fixed width of one serialized record in bytes
    pub record_capacity: Size,
    /// Maximum number of records held at once
    pub slots: Size,
}

impl ChannelConfig {
    pub fn new(record_capacity: Size, slots: Size) -> Result<Self, ChannelError> {
        let config = Self {
            record_capacity,
            slots,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChannelError> {
        if !(MIN_RECORD_CAPACITY..=MAX_RECORD_CAPACITY).contains(&self.record_capacity) {
            return Err(ChannelError::InvalidConfig(format!(
                "record capacity {} outside {}..={}",
                self.record_capacity, MIN_RECORD_CAPACITY, MAX_RECORD_CAPACITY
            )));
        }
        if !(1..=MAX_CHANNEL_SLOTS).contains(&self.slots) {
            return Err(ChannelError::InvalidConfig(format!(
                "slot count {} outside 1..={}",
                self.slots, MAX_CHANNEL_SLOTS
            )));
        }
        Ok(())
    }

    /// Total buffer size in bytes
    #[inline]
    pub const fn buffer_len(&self) -> Size {
        self.record_capacity * self.slots
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            record_capacity: DEFAULT_RECORD_CAPACITY,
            slots: DEFAULT_CHANNEL_SLOTS,
        }
    }
}

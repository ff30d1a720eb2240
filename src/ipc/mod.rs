/*!
 * IPC Module
 * Scheduler → writer hand-off: fixed-width record channel, codec, and the
 * shared context that pairs it with its counting signal
 */

pub mod codec;
pub mod context;
pub mod handoff;
pub mod types;

// Re-export public API
pub use context::HandoffContext;
pub use handoff::HandoffChannel;
pub use types::{ChannelConfig, ChannelError};

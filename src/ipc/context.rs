/*!
 * Hand-off Context
 * The channel, its counting signal, and the shared shutdown flag, owned
 * by the supervisor and shared with the scheduler and writer tasks
 *
 * Each post covers exactly one published batch. Batch sizes are queued in
 * post order, so a wake never takes records beyond its own batch.
 */

use super::handoff::HandoffChannel;
use super::types::{ChannelConfig, ChannelError};
use crate::core::sync::{Semaphore, ShutdownFlag, WaitError};
use crate::scheduler::MetricRecord;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct HandoffContext {
    channel: HandoffChannel,
    signal: Arc<Semaphore>,
    shutdown: ShutdownFlag,
    /// Sizes of posted batches not yet taken
    batches: Mutex<VecDeque<usize>>,
}

impl HandoffContext {
    pub fn new(config: ChannelConfig) -> Result<Self, ChannelError> {
        Ok(Self {
            channel: HandoffChannel::new(config)?,
            signal: Arc::new(Semaphore::new(0)),
            shutdown: ShutdownFlag::new(),
            batches: Mutex::new(VecDeque::new()),
        })
    }

    pub fn channel(&self) -> &HandoffChannel {
        &self.channel
    }

    pub fn signal(&self) -> &Arc<Semaphore> {
        &self.signal
    }

    pub fn shutdown(&self) -> &ShutdownFlag {
        &self.shutdown
    }

    /// Store a batch as one unit, then post the signal once
    ///
    /// Nothing is stored or posted if the batch does not fit, so the
    /// consumer never wakes to a partial batch.
    pub fn publish(&self, records: &[MetricRecord]) -> Result<(), ChannelError> {
        if self.signal.is_closed() {
            return Err(ChannelError::Closed);
        }

        self.channel.write_batch(records)?;
        self.batches.lock().push_back(records.len());
        self.signal.post().map_err(|_| ChannelError::Closed)?;

        debug!(
            records = records.len(),
            stored = self.channel.count(),
            "Published batch"
        );
        Ok(())
    }

    /// Producer is done: no more batches will be posted
    pub fn finish(&self) {
        self.signal.close();
    }

    /// Remove the batch covered by one consumed post
    ///
    /// Call only after a successful wait on the signal.
    pub fn take_batch(&self) -> Result<Vec<MetricRecord>, ChannelError> {
        let size = self.batches.lock().pop_front().ok_or_else(|| {
            ChannelError::Corrupt("signal consumed without a published batch".to_string())
        })?;
        self.channel.read(size)
    }

    /// Block until the next batch is available, then drain it
    ///
    /// Returns `Ok(None)` once the producer has finished and every batch
    /// has been consumed.
    pub fn next_batch(&self) -> Result<Option<Vec<MetricRecord>>, ChannelError> {
        match self.signal.wait() {
            Ok(()) => self.take_batch().map(Some),
            Err(WaitError::Closed) => Ok(None),
            Err(_) => Err(ChannelError::Closed),
        }
    }

    /// Release the channel: refuse writes and end the signal stream
    pub fn teardown(&self) {
        self.channel.close();
        self.signal.close();
    }
}

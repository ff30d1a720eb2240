/*!
 * Hand-off Channel
 * Bounded, append-only buffer of fixed-width metric records with
 * ringbuf-based storage
 *
 * One producer writes, one consumer drains. The counting signal posted
 * after a batch of writes orders those writes before the consumer's read;
 * the mutex here is never contended under that protocol.
 */

use super::codec;
use super::types::{ChannelConfig, ChannelError};
use crate::core::types::Size;
use crate::scheduler::MetricRecord;
use parking_lot::Mutex;
use ringbuf::{traits::*, HeapRb};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub struct HandoffChannel {
    config: ChannelConfig,
    /// Ring buffer of `slots * record_capacity` bytes
    buffer: Mutex<HeapRb<u8>>,
    written: AtomicUsize,
    drained: AtomicUsize,
    closed: AtomicBool,
}

impl std::fmt::Debug for HandoffChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandoffChannel")
            .field("record_capacity", &self.config.record_capacity)
            .field("slots", &self.config.slots)
            .field("count", &self.count())
            .field("written", &self.written())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl HandoffChannel {
    pub fn new(config: ChannelConfig) -> Result<Self, ChannelError> {
        config.validate()?;

        Ok(Self {
            config,
            buffer: Mutex::new(HeapRb::<u8>::new(config.buffer_len())),
            written: AtomicUsize::new(0),
            drained: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        })
    }

    /// Append one record
    pub fn write(&self, record: &MetricRecord) -> Result<(), ChannelError> {
        self.write_batch(std::slice::from_ref(record))
    }

    /// Append `records` as one unit
    ///
    /// Every record is encoded and the free space checked before anything is
    /// stored, so a failed write leaves the channel unchanged.
    pub fn write_batch(&self, records: &[MetricRecord]) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }

        let capacity = self.config.record_capacity;
        let mut bytes = Vec::with_capacity(records.len() * capacity);
        for record in records {
            bytes.extend_from_slice(&codec::encode(record, capacity)?);
        }

        let mut buffer = self.buffer.lock();
        if buffer.vacant_len() < bytes.len() {
            return Err(ChannelError::Full {
                slots: self.config.slots,
            });
        }
        let pushed = buffer.push_slice(&bytes);
        debug_assert_eq!(pushed, bytes.len());
        drop(buffer);

        self.written.fetch_add(records.len(), Ordering::Release);
        Ok(())
    }

    /// Remove and return every stored record in write order
    ///
    /// An empty channel yields an empty vector.
    pub fn read_all(&self) -> Result<Vec<MetricRecord>, ChannelError> {
        let mut buffer = self.buffer.lock();
        let stored = buffer.occupied_len() / self.config.record_capacity;
        self.pop_records(&mut buffer, stored)
    }

    /// Remove and return exactly the `count` oldest records
    pub fn read(&self, count: Size) -> Result<Vec<MetricRecord>, ChannelError> {
        let mut buffer = self.buffer.lock();
        let stored = buffer.occupied_len() / self.config.record_capacity;
        if stored < count {
            return Err(ChannelError::Corrupt(format!(
                "expected {count} records, {stored} stored"
            )));
        }
        self.pop_records(&mut buffer, count)
    }

    fn pop_records(
        &self,
        buffer: &mut HeapRb<u8>,
        count: Size,
    ) -> Result<Vec<MetricRecord>, ChannelError> {
        let capacity = self.config.record_capacity;
        let mut records = Vec::with_capacity(count);
        let mut slot = vec![0u8; capacity];

        for _ in 0..count {
            let popped = buffer.pop_slice(&mut slot);
            debug_assert_eq!(popped, capacity);
            records.push(codec::decode(&slot)?);
        }

        self.drained.fetch_add(records.len(), Ordering::Release);
        Ok(records)
    }

    /// Records currently stored
    pub fn count(&self) -> Size {
        self.buffer.lock().occupied_len() / self.config.record_capacity
    }

    /// Records written since creation (monotonic)
    pub fn written(&self) -> Size {
        self.written.load(Ordering::Acquire)
    }

    /// Records handed to the consumer since creation
    pub fn drained(&self) -> Size {
        self.drained.load(Ordering::Acquire)
    }

    /// Refuse further writes; stored records stay readable
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

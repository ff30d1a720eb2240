/*!
 * Writer Sink
 * Consumer side of the hand-off: wait for batches, persist them, then
 * request cooperative shutdown
 */

use crate::core::errors::WriterError;
use crate::core::limits::DEFAULT_VALUE_PRECISION;
use crate::core::sync::WaitError;
use crate::ipc::HandoffContext;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, error, info};

/// What the writer persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSummary {
    pub path: PathBuf,
    pub records_written: usize,
    pub batches: usize,
}

#[derive(Debug, Clone)]
pub struct WriterSink {
    path: PathBuf,
    precision: usize,
}

impl WriterSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            precision: DEFAULT_VALUE_PRECISION,
        }
    }

    /// Fractional digits written per value
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Open the destination, drain every batch into it, close it, and raise
    /// the shutdown flag
    ///
    /// The flag is also raised on failure so the scheduler stops at its next
    /// safe point instead of producing for nobody.
    pub async fn run(&self, ctx: Arc<HandoffContext>) -> Result<WriterSummary, WriterError> {
        let result = self.open_drain_close(&ctx).await;
        ctx.shutdown().request();

        match &result {
            Ok(summary) => info!(
                path = %self.path.display(),
                records = summary.records_written,
                batches = summary.batches,
                "Writer finished, shutdown requested"
            ),
            Err(e) => error!(path = %self.path.display(), error = %e, "Writer failed"),
        }
        result
    }

    async fn open_drain_close(&self, ctx: &HandoffContext) -> Result<WriterSummary, WriterError> {
        let file = File::create(&self.path)
            .await
            .map_err(|source| WriterError::OpenFailed {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), "Destination opened");

        let mut dest = BufWriter::new(file);
        let (records_written, batches) = self.drain(ctx, &mut dest).await?;

        dest.flush().await.map_err(|source| WriterError::CloseFailed {
            path: self.path.clone(),
            source,
        })?;
        dest.get_mut()
            .sync_all()
            .await
            .map_err(|source| WriterError::CloseFailed {
                path: self.path.clone(),
                source,
            })?;
        drop(dest);

        Ok(WriterSummary {
            path: self.path.clone(),
            records_written,
            batches,
        })
    }

    /// Write every batch to `dest` until the producer ends the stream
    ///
    /// Returns (records written, batches drained).
    pub async fn drain<W>(
        &self,
        ctx: &HandoffContext,
        dest: &mut W,
    ) -> Result<(usize, usize), WriterError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut records_written = 0;
        let mut batches = 0;

        loop {
            match ctx.signal().wait_async().await {
                Ok(()) => {}
                Err(WaitError::Closed) => break,
                Err(e) => return Err(e.into()),
            }

            let records = ctx.take_batch()?;
            debug!(records = records.len(), "Draining batch");

            for record in &records {
                dest.write_all(record.render(self.precision).as_bytes())
                    .await
                    .map_err(|source| WriterError::Write {
                        path: self.path.clone(),
                        source,
                    })?;
            }

            records_written += records.len();
            batches += 1;
        }

        Ok((records_written, batches))
    }
}

//! # Persistence Writer
//!
//! Best-effort durable write-back of promotions.
//!
//! A bounded channel feeds one worker task that performs each backend `put`
//! on the blocking pool. Request threads only ever `try_send`; a full or
//! closed queue drops the entry and counts it. The in-memory promotion
//! stands either way.
//!
//! ## Shutdown
//!
//! ```text
//! stop() ──(ack sender)──→ worker
//!                            │  drain entries already queued
//!                            ↓
//! stop() ←──────(ack)─────── worker exits
//! ```
//!
//! A second `stop()` returns `WriterError::AlreadyStopped`.

use gate_storage::{ApprovalBackend, Namespace, EMPTY_MARKER};
use gate_telemetry::ApprovalMetrics;
use gate_types::InfoHash;
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

/// Result of a non-blocking enqueue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Queued,
    /// Queue full or writer stopped.
    Dropped,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WriterError {
    #[error("Persistence writer already stopped")]
    AlreadyStopped,
}

type StopSignal = oneshot::Sender<oneshot::Sender<()>>;

/// Handle to the write-back worker.
pub struct PersistenceWriter {
    queue: mpsc::Sender<InfoHash>,
    stop_tx: Mutex<Option<StopSignal>>,
    metrics: Arc<ApprovalMetrics>,
    capacity: usize,
}

impl PersistenceWriter {
    /// Spawn the worker on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics outside a runtime or when `capacity` is zero. Use `spawn_on`
    /// with an explicit handle otherwise.
    pub fn spawn(
        backend: Arc<dyn ApprovalBackend>,
        capacity: usize,
        metrics: Arc<ApprovalMetrics>,
    ) -> Self {
        Self::spawn_on(&Handle::current(), backend, capacity, metrics)
    }

    /// Spawn the worker on `handle`. `capacity` must be non-zero.
    pub fn spawn_on(
        handle: &Handle,
        backend: Arc<dyn ApprovalBackend>,
        capacity: usize,
        metrics: Arc<ApprovalMetrics>,
    ) -> Self {
        let (queue, rx) = mpsc::channel(capacity);
        let (stop_tx, stop_rx) = oneshot::channel();

        info!(backend = backend.name(), capacity, "Starting persistence writer");
        handle.spawn(run_worker(backend, rx, stop_rx, Arc::clone(&metrics)));

        Self {
            queue,
            stop_tx: Mutex::new(Some(stop_tx)),
            metrics,
            capacity,
        }
    }

    /// Offer `id` for durable write-back without blocking.
    pub fn enqueue(&self, id: InfoHash) -> EnqueueOutcome {
        match self.queue.try_send(id) {
            Ok(()) => EnqueueOutcome::Queued,
            Err(mpsc::error::TrySendError::Full(id)) => {
                self.metrics.writes_dropped.inc();
                warn!(info_hash = %id, capacity = self.capacity, "Write-back queue full, dropping entry");
                EnqueueOutcome::Dropped
            }
            Err(mpsc::error::TrySendError::Closed(id)) => {
                self.metrics.writes_dropped.inc();
                debug!(info_hash = %id, "Writer stopped, dropping entry");
                EnqueueOutcome::Dropped
            }
        }
    }

    /// Ask the worker to drain and exit, waiting for its acknowledgement.
    pub async fn stop(&self) -> Result<(), WriterError> {
        let stop_tx = self.stop_tx.lock().take().ok_or(WriterError::AlreadyStopped)?;

        let (ack_tx, ack_rx) = oneshot::channel();
        if stop_tx.send(ack_tx).is_err() {
            // Worker already gone (runtime shut down)
            return Ok(());
        }
        let _ = ack_rx.await;

        info!("Persistence writer stopped");
        Ok(())
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_tx.lock().is_none()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

async fn run_worker(
    backend: Arc<dyn ApprovalBackend>,
    mut rx: mpsc::Receiver<InfoHash>,
    mut stop_rx: oneshot::Receiver<oneshot::Sender<()>>,
    metrics: Arc<ApprovalMetrics>,
) {
    loop {
        tokio::select! {
            biased;

            signal = &mut stop_rx => {
                rx.close();
                let mut drained = 0usize;
                while let Some(id) = rx.recv().await {
                    persist(&backend, id, &metrics).await;
                    drained += 1;
                }
                debug!(drained, "Write-back queue drained");

                // Err means the handle was dropped without stop()
                if let Ok(ack) = signal {
                    let _ = ack.send(());
                }
                break;
            }

            next = rx.recv() => match next {
                Some(id) => persist(&backend, id, &metrics).await,
                None => break,
            },
        }
    }
}

async fn persist(backend: &Arc<dyn ApprovalBackend>, id: InfoHash, metrics: &ApprovalMetrics) {
    let backend = Arc::clone(backend);
    let result = tokio::task::spawn_blocking(move || {
        backend.put(Namespace::Allowed, id.as_bytes(), EMPTY_MARKER)
    })
    .await;

    match result {
        Ok(Ok(())) => {
            metrics.writes_persisted.inc();
            debug!(info_hash = %id, "Promotion persisted");
        }
        Ok(Err(e)) => {
            metrics.write_failures.inc();
            error!(info_hash = %id, error = %e, "Failed to persist promotion");
        }
        Err(e) => {
            metrics.write_failures.inc();
            error!(info_hash = %id, error = %e, "Write-back task panicked");
        }
    }
}

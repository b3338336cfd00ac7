use std::sync::mpsc;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::asset::probe::ProbeOutcome;

/// Snapshot emitted once per batch boundary. The fraction is monotonically
/// non-decreasing and reaches 1.0 on the final batch of a completed run.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub fraction: f64,
    pub outcomes: Vec<ProbeOutcome>,
}

/// One-way notification contract toward an external observer. The scanner
/// calls this once per batch and never waits for acknowledgment.
pub trait ProgressObserver {
    fn on_progress(&self, event: ProgressEvent);
}

/// Observer that drops everything, for headless runs.
#[derive(Debug, Default)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_progress(&self, _event: ProgressEvent) {}
}

/// Abort signal shared between the observer side and the orchestrator.
/// The orchestrator checks it between batches; the in-flight batch always
/// completes.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<RwLock<bool>>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        *self.cancelled.write() = true;
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.read()
    }
}

/// Buffered observer backed by a bounded queue. Size the capacity to the
/// total identifier count so the scan thread never stalls on a slow or
/// absent consumer.
pub struct QueueObserver {
    sender: mpsc::SyncSender<ProgressEvent>,
}

impl QueueObserver {
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        (Self { sender }, receiver)
    }
}

impl ProgressObserver for QueueObserver {
    fn on_progress(&self, event: ProgressEvent) {
        // A full queue means the consumer stopped draining; the event is
        // dropped rather than blocking the scan.
        let _ = self.sender.try_send(event);
    }
}

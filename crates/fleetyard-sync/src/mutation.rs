//! Asynchronous persistence of optimistic position changes.
//!
//! Each drag release spawns one task that invokes the gateway's persist
//! operation and delivers the outcome on an explicit channel. The dispatcher
//! never blocks the caller, never rolls back local state, and never retries:
//! a failed persist means the remote store lags the local view until the
//! next successful fetch overwrites it.

use crate::gateway::SyncGateway;
use async_channel::{unbounded, Receiver, Sender};
use fleetyard_core::error::Result;
use fleetyard_core::geometry::StorePoint;
use fleetyard_core::types::VehicleId;
use std::sync::Arc;

/// Result of one persist task.
#[derive(Debug)]
pub struct PersistOutcome {
    /// Vehicle whose position was persisted
    pub id: VehicleId,

    /// Position that was sent to the store
    pub position: StorePoint,

    /// Gateway result, one attempt
    pub result: Result<()>,
}

impl PersistOutcome {
    /// Returns true if the store acknowledged the write.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Spawns one persist task per drag release.
#[derive(Clone)]
pub struct PersistDispatcher {
    gateway: Arc<dyn SyncGateway>,
    outcome_tx: Sender<PersistOutcome>,
}

impl PersistDispatcher {
    /// Creates a dispatcher and the receiving end of its outcome channel.
    ///
    /// The receiver is the observability sink: the owner drains it and
    /// reports failures (status line, logs). Dropping the receiver is
    /// harmless; outcomes are then discarded after logging.
    pub fn new(gateway: Arc<dyn SyncGateway>) -> (Self, Receiver<PersistOutcome>) {
        let (outcome_tx, outcome_rx) = unbounded();
        (
            Self {
                gateway,
                outcome_tx,
            },
            outcome_rx,
        )
    }

    /// Fires a persist task for one position change.
    ///
    /// Must be called within a tokio runtime. Returns immediately; the
    /// outcome arrives on the channel. Errors never propagate to the caller,
    /// so the drag handler stays panic- and error-free.
    pub fn dispatch(&self, id: VehicleId, position: StorePoint) {
        let gateway = Arc::clone(&self.gateway);
        let outcome_tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = gateway.persist_position(&id, position).await;
            match &result {
                Ok(()) => {
                    tracing::debug!(vehicle = %id, x = position.x, y = position.y, "position persisted");
                }
                Err(e) => {
                    tracing::warn!(vehicle = %id, error = %e, "persist failed, keeping local state");
                }
            }
            let _ = outcome_tx
                .send(PersistOutcome {
                    id,
                    position,
                    result,
                })
                .await;
        });
    }
}

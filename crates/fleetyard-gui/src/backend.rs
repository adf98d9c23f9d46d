//! Worker bridge between the GUI and the remote store.
//!
//! The GUI thread owns the map session and never blocks on the network; all
//! gateway I/O runs on a worker thread with its own tokio runtime. Commands
//! and events cross over async channels. Persist commands go through the
//! task-per-drag dispatcher, whose outcome channel is forwarded back to the
//! GUI as events.

use async_channel::{unbounded, Receiver, Sender};
use fleetyard_core::geometry::StorePoint;
use fleetyard_core::types::{Vehicle, VehicleId};
use fleetyard_sync::{normalize_records, PersistDispatcher, ServiceRequest, SyncGateway};
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Commands the GUI sends to the worker.
#[derive(Debug, Clone)]
pub enum WorkerCommand {
    /// Fetch and normalize a fresh vehicle snapshot
    Refresh,
    /// Persist one optimistic position change
    Persist(VehicleId, StorePoint),
    /// Submit a repair/part request
    SubmitRequest(ServiceRequest),
    /// Stop the worker
    Shutdown,
}

/// Events the worker sends back to the GUI.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// A fresh normalized snapshot, ready for the session
    Snapshot(Vec<Vehicle>),
    /// Fetch failed; the previous snapshot stays rendered
    FetchFailed(String),
    /// A persist task failed; local state is kept
    PersistFailed { id: VehicleId, reason: String },
    /// The service request was accepted by the store
    RequestSubmitted,
    /// The service request was rejected or unreachable
    RequestFailed(String),
}

/// Handle owning the worker thread.
pub struct WorkerBridge {
    command_tx: Sender<WorkerCommand>,
    event_rx: Receiver<WorkerEvent>,
    worker_handle: Option<std::thread::JoinHandle<()>>,
}

impl WorkerBridge {
    /// Spawns the worker thread around a gateway.
    pub fn new(gateway: Arc<dyn SyncGateway>) -> anyhow::Result<Self> {
        let runtime = Runtime::new()?;

        let (command_tx, command_rx) = unbounded::<WorkerCommand>();
        let (event_tx, event_rx) = unbounded::<WorkerEvent>();

        let worker_handle = std::thread::spawn(move || {
            runtime.block_on(run_worker(gateway, command_rx, event_tx));
        });

        Ok(Self {
            command_tx,
            event_rx,
            worker_handle: Some(worker_handle),
        })
    }

    /// Sends a command to the worker.
    pub fn send(&self, command: WorkerCommand) {
        if let Err(e) = self.command_tx.try_send(command) {
            tracing::error!(error = %e, "worker command channel closed");
        }
    }

    /// Tries to receive one event (non-blocking).
    pub fn try_recv_event(&self) -> Option<WorkerEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Shuts the worker down and joins the thread.
    pub fn shutdown(mut self) {
        let _ = self.command_tx.try_send(WorkerCommand::Shutdown);
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerBridge {
    fn drop(&mut self) {
        let _ = self.command_tx.try_send(WorkerCommand::Shutdown);
    }
}

/// Main worker loop.
async fn run_worker(
    gateway: Arc<dyn SyncGateway>,
    command_rx: Receiver<WorkerCommand>,
    event_tx: Sender<WorkerEvent>,
) {
    tracing::info!("sync worker started");

    let (dispatcher, outcome_rx) = PersistDispatcher::new(Arc::clone(&gateway));

    // Forward persist failures to the GUI; successes only hit the log.
    let failure_tx = event_tx.clone();
    tokio::spawn(async move {
        while let Ok(outcome) = outcome_rx.recv().await {
            if let Err(e) = &outcome.result {
                let _ = failure_tx
                    .send(WorkerEvent::PersistFailed {
                        id: outcome.id.clone(),
                        reason: e.to_string(),
                    })
                    .await;
            }
        }
    });

    loop {
        match command_rx.recv().await {
            Ok(WorkerCommand::Refresh) => match gateway.fetch_all().await {
                Ok(records) => {
                    let vehicles = normalize_records(records);
                    tracing::info!(vehicles = vehicles.len(), "snapshot refreshed");
                    let _ = event_tx.send(WorkerEvent::Snapshot(vehicles)).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "fetch failed, keeping last known snapshot");
                    let _ = event_tx.send(WorkerEvent::FetchFailed(e.to_string())).await;
                }
            },
            Ok(WorkerCommand::Persist(id, position)) => {
                dispatcher.dispatch(id, position);
            }
            Ok(WorkerCommand::SubmitRequest(request)) => {
                match gateway.submit_service_request(&request).await {
                    Ok(()) => {
                        let _ = event_tx.send(WorkerEvent::RequestSubmitted).await;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "service request failed");
                        let _ = event_tx.send(WorkerEvent::RequestFailed(e.to_string())).await;
                    }
                }
            }
            Ok(WorkerCommand::Shutdown) | Err(_) => {
                tracing::info!("sync worker stopped");
                break;
            }
        }
    }
}

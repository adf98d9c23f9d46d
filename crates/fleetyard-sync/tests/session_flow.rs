//! End-to-end exercises of the fetch/reconcile/drag/persist cycle against a
//! scripted in-memory gateway.

use async_trait::async_trait;
use fleetyard_core::error::{FleetError, Result};
use fleetyard_core::geometry::{MapPoint, StorePoint};
use fleetyard_core::status::FALLBACK_COLOR;
use fleetyard_core::types::{VehicleId, DEFAULT_KIND, DEFAULT_STATUS};
use fleetyard_sync::{
    normalize_records, MapSession, PersistDispatcher, RawVehicleRecord, ServiceRequest,
    SyncGateway,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Gateway returning a canned snapshot, recording persists, optionally
/// failing them.
struct ScriptedGateway {
    snapshot_json: Mutex<String>,
    fail_fetch: AtomicBool,
    fail_persist: AtomicBool,
    persisted: Mutex<Vec<(String, StorePoint)>>,
}

impl ScriptedGateway {
    fn new(snapshot_json: &str) -> Self {
        Self {
            snapshot_json: Mutex::new(snapshot_json.to_string()),
            fail_fetch: AtomicBool::new(false),
            fail_persist: AtomicBool::new(false),
            persisted: Mutex::new(Vec::new()),
        }
    }

    fn set_snapshot(&self, snapshot_json: &str) {
        *self.snapshot_json.lock().unwrap() = snapshot_json.to_string();
    }
}

#[async_trait]
impl SyncGateway for ScriptedGateway {
    async fn fetch_all(&self) -> Result<Vec<RawVehicleRecord>> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(FleetError::fetch(500, "script unavailable"));
        }
        let json = self.snapshot_json.lock().unwrap().clone();
        serde_json::from_str(&json).map_err(FleetError::payload)
    }

    async fn persist_position(&self, id: &VehicleId, position: StorePoint) -> Result<()> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(FleetError::persist(id.as_str(), "script returned 500"));
        }
        self.persisted
            .lock()
            .unwrap()
            .push((id.as_str().to_string(), position));
        Ok(())
    }

    async fn submit_service_request(&self, _request: &ServiceRequest) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn fetch_normalize_render_cycle() {
    let gateway = ScriptedGateway::new(r#"[{"id":"v1","x":"120.5","y":80}]"#);

    let vehicles = normalize_records(gateway.fetch_all().await.unwrap());
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].kind, DEFAULT_KIND);
    assert_eq!(vehicles[0].status, DEFAULT_STATUS);
    assert_eq!(vehicles[0].position, StorePoint::new(120.5, 80.0));

    let mut session = MapSession::new();
    let summary = session.apply_snapshot(vehicles);
    assert_eq!(summary.created.len(), 1);

    let marker = session.marker(&VehicleId::new("v1")).unwrap();
    assert_eq!(marker.position, MapPoint::new(80.0, 120.5));
    assert_eq!(marker.color, FALLBACK_COLOR);
}

#[tokio::test]
async fn records_without_coordinates_never_render() {
    let gateway = ScriptedGateway::new(
        r#"[{"id":"v1","x":10,"y":20},{"id":"v2","y":30},{"id":"v3","x":"oops","y":5}]"#,
    );

    let mut session = MapSession::new();
    session.apply_snapshot(normalize_records(gateway.fetch_all().await.unwrap()));

    assert_eq!(session.vehicle_count(), 1);
    assert!(session.marker(&VehicleId::new("v2")).is_none());
    assert!(session.marker(&VehicleId::new("v3")).is_none());
}

#[tokio::test]
async fn drag_is_optimistic_and_persisted() {
    let gateway = Arc::new(ScriptedGateway::new(r#"[{"id":"v1","x":10,"y":10}]"#));
    let (dispatcher, outcomes) = PersistDispatcher::new(gateway.clone());

    let mut session = MapSession::new();
    session.apply_snapshot(normalize_records(gateway.fetch_all().await.unwrap()));

    // Release at map (lat=200, lng=300): local patch is immediate.
    let id = VehicleId::new("v1");
    let position = session.apply_drag(&id, MapPoint::new(200.0, 300.0)).unwrap();
    assert_eq!(position, StorePoint::new(300.0, 200.0));
    assert_eq!(session.vehicles()[0].position, StorePoint::new(300.0, 200.0));

    dispatcher.dispatch(id, position);
    let outcome = outcomes.recv().await.unwrap();
    assert!(outcome.is_success());

    let persisted = gateway.persisted.lock().unwrap();
    assert_eq!(
        persisted.as_slice(),
        &[("v1".to_string(), StorePoint::new(300.0, 200.0))]
    );
}

#[tokio::test]
async fn persist_failure_keeps_optimistic_state() {
    let gateway = Arc::new(ScriptedGateway::new(r#"[{"id":"v1","x":10,"y":10}]"#));
    gateway.fail_persist.store(true, Ordering::SeqCst);
    let (dispatcher, outcomes) = PersistDispatcher::new(gateway.clone());

    let mut session = MapSession::new();
    session.apply_snapshot(normalize_records(gateway.fetch_all().await.unwrap()));

    let id = VehicleId::new("v1");
    let position = session.apply_drag(&id, MapPoint::new(200.0, 300.0)).unwrap();
    dispatcher.dispatch(id.clone(), position);

    let outcome = outcomes.recv().await.unwrap();
    assert!(!outcome.is_success());

    // No rollback: the dragged position stays until the next fetch.
    assert_eq!(session.vehicles()[0].position, StorePoint::new(300.0, 200.0));
    assert_eq!(
        session.marker(&id).unwrap().position,
        MapPoint::new(200.0, 300.0)
    );
}

#[tokio::test]
async fn fetch_failure_leaves_last_known_good() {
    let gateway = ScriptedGateway::new(r#"[{"id":"v1","x":10,"y":20}]"#);

    let mut session = MapSession::new();
    session.apply_snapshot(normalize_records(gateway.fetch_all().await.unwrap()));
    assert_eq!(session.vehicle_count(), 1);

    gateway.fail_fetch.store(true, Ordering::SeqCst);
    let refetch = gateway.fetch_all().await;
    assert!(refetch.is_err());

    // The caller does not touch the session on a failed fetch.
    assert_eq!(session.vehicle_count(), 1);
    assert!(session.marker(&VehicleId::new("v1")).is_some());
}

#[tokio::test]
async fn refetch_removes_departed_vehicles() {
    let gateway = ScriptedGateway::new(r#"[{"id":"v1","x":1,"y":2},{"id":"v2","x":3,"y":4}]"#);

    let mut session = MapSession::new();
    session.apply_snapshot(normalize_records(gateway.fetch_all().await.unwrap()));
    assert_eq!(session.vehicle_count(), 2);

    gateway.set_snapshot(r#"[{"id":"v2","x":3,"y":4}]"#);
    let summary = session.apply_snapshot(normalize_records(gateway.fetch_all().await.unwrap()));

    assert_eq!(summary.removed, vec![VehicleId::new("v1")]);
    assert!(session.marker(&VehicleId::new("v1")).is_none());
    assert!(session.marker(&VehicleId::new("v2")).is_some());
}

//! Map session: explicit owner of the entity snapshot and the marker arena.
//!
//! One session corresponds to one open map view. It is created and destroyed
//! explicitly, owned by a single event loop, and passed by reference to the
//! rendering layer; there is no ambient global map handle. All mutation goes
//! through [`MapSession::apply_snapshot`] (wholesale replacement after a
//! fetch) or [`MapSession::apply_drag`] (optimistic in-place patch).

use crate::reconcile::{Marker, MarkerArena, ReconcileSummary};
use fleetyard_core::geometry::{MapPoint, StorePoint};
use fleetyard_core::types::{SessionId, Vehicle, VehicleId};

/// Owner of the rendered state for one map view.
#[derive(Debug)]
pub struct MapSession {
    id: SessionId,
    vehicles: Vec<Vehicle>,
    arena: MarkerArena,
}

impl MapSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        let id = SessionId::new();
        tracing::debug!(session = %id, "map session created");
        Self {
            id,
            vehicles: Vec::new(),
            arena: MarkerArena::new(),
        }
    }

    /// Returns the session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the current entity snapshot.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of vehicles in the current snapshot.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Iterates over the rendered markers.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.arena.iter()
    }

    /// Returns the marker for one entity, if rendered.
    pub fn marker(&self, id: &VehicleId) -> Option<&Marker> {
        self.arena.get(id)
    }

    /// Replaces the entity set wholesale and reconciles the arena.
    ///
    /// Called after every successful fetch. Any entity absent from the new
    /// snapshot disappears from the map, including one whose optimistic drag
    /// has not been confirmed remotely yet; a stale fetch arriving late can
    /// therefore roll the view back (accepted, not guarded).
    pub fn apply_snapshot(&mut self, vehicles: Vec<Vehicle>) -> ReconcileSummary {
        self.vehicles = vehicles;
        self.arena.reconcile(&self.vehicles)
    }

    /// Applies an optimistic position patch from a drag release.
    ///
    /// The entity is patched in place and the arena reconciled synchronously,
    /// so the local view is self-consistent before any network round trip.
    /// Returns the new store position for the caller to persist, or `None`
    /// when no entity matches the id (e.g. it was removed by a concurrent
    /// refresh while the drag was in flight).
    pub fn apply_drag(&mut self, id: &VehicleId, released_at: MapPoint) -> Option<StorePoint> {
        let vehicle = self.vehicles.iter_mut().find(|v| &v.id == id)?;
        vehicle.position = StorePoint::from(released_at);
        let position = vehicle.position;

        self.arena.reconcile(&self.vehicles);
        tracing::debug!(vehicle = %id, x = position.x, y = position.y, "optimistic position applied");
        Some(position)
    }
}

impl Default for MapSession {
    fn default() -> Self {
        Self::new()
    }
}

//! Marker arena and reconciliation.
//!
//! The arena is a map from vehicle id to the marker currently on screen,
//! decoupled from any widget library: the rendering layer translates arena
//! entries into paint calls, which keeps this logic independently testable.
//!
//! Reconciliation order is removals, then in-place updates, then creations.
//! Removal-first avoids transient duplicate-id states if two entities ever
//! momentarily share an id during a transition.

use fleetyard_core::geometry::MapPoint;
use fleetyard_core::status::Rgb;
use fleetyard_core::types::{Vehicle, VehicleId};
use std::collections::{HashMap, HashSet};

/// On-screen representation of one vehicle.
///
/// Lifetime is strictly bounded by the presence of the matching entity in
/// the latest snapshot: a marker never exists without a backing entity and
/// never outlives it.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Backing entity id
    pub id: VehicleId,

    /// Position in map coordinates
    pub position: MapPoint,

    /// Display color derived from the entity status
    pub color: Rgb,

    /// Descriptive label: kind, status, rounded store position
    pub label: String,
}

impl Marker {
    /// Projects a vehicle entity onto its marker representation.
    fn project(vehicle: &Vehicle) -> Self {
        let (x, y) = vehicle.position.rounded();
        Self {
            id: vehicle.id.clone(),
            position: MapPoint::from(vehicle.position),
            color: vehicle.display_color(),
            label: format!(
                "Vehicle {}\nKind: {}\nStatus: {}\nPosition: X {}, Y {}",
                vehicle.id, vehicle.kind, vehicle.status, x, y
            ),
        }
    }
}

/// Operations performed by one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileSummary {
    /// Markers discarded because their entity left the snapshot
    pub removed: Vec<VehicleId>,

    /// Markers whose projection actually changed
    pub updated: Vec<VehicleId>,

    /// Markers created for entities seen for the first time
    pub created: Vec<VehicleId>,
}

impl ReconcileSummary {
    /// Returns true if the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.updated.is_empty() && self.created.is_empty()
    }

    /// Total number of operations in the pass.
    pub fn total(&self) -> usize {
        self.removed.len() + self.updated.len() + self.created.len()
    }
}

/// The marker set, keyed by entity id.
#[derive(Debug, Default)]
pub struct MarkerArena {
    markers: HashMap<VehicleId, Marker>,
}

impl MarkerArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the arena against a new entity snapshot.
    ///
    /// Markers for departed entities are removed; surviving markers are
    /// updated in place (identity preserved, no destroy/recreate) and only
    /// counted when the projection differs; new entities get new markers.
    /// Calling this twice with an identical snapshot is a no-op the second
    /// time.
    pub fn reconcile(&mut self, vehicles: &[Vehicle]) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();

        let live: HashSet<&VehicleId> = vehicles.iter().map(|v| &v.id).collect();
        let departed: Vec<VehicleId> = self
            .markers
            .keys()
            .filter(|id| !live.contains(id))
            .cloned()
            .collect();
        for id in departed {
            self.markers.remove(&id);
            summary.removed.push(id);
        }

        for vehicle in vehicles {
            let next = Marker::project(vehicle);
            match self.markers.get_mut(&vehicle.id) {
                Some(marker) => {
                    if *marker != next {
                        *marker = next;
                        summary.updated.push(vehicle.id.clone());
                    }
                }
                None => {
                    self.markers.insert(vehicle.id.clone(), next);
                    summary.created.push(vehicle.id.clone());
                }
            }
        }

        if !summary.is_noop() {
            tracing::debug!(
                removed = summary.removed.len(),
                updated = summary.updated.len(),
                created = summary.created.len(),
                "reconciled marker arena"
            );
        }

        summary
    }

    /// Returns the marker for an entity id, if rendered.
    pub fn get(&self, id: &VehicleId) -> Option<&Marker> {
        self.markers.get(id)
    }

    /// Iterates over all rendered markers (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// Number of rendered markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true if nothing is rendered.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

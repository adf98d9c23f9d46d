//! Core types for the Fleetyard vehicle map.
//!
//! This module defines the canonical in-memory vehicle entity and the
//! identifiers used to key markers and map sessions.

use crate::geometry::StorePoint;
use crate::status::{color_for_status, Rgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Classification used when a source record carries no `kind` field.
pub const DEFAULT_KIND: &str = "Municipal vehicle";

/// Status used when a source record carries no `status` field.
pub const DEFAULT_STATUS: &str = "undiagnosed";

/// Stable identifier of a vehicle record in the store of record.
///
/// The id is the reconciliation key: markers are created, updated, and
/// removed by matching on it. Ids come from the remote store as free-form
/// strings (e.g. "v123", "c345") and are expected to be unique within one
/// snapshot; empty ids are rejected during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    /// Creates a vehicle id from a raw store identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VehicleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Unique identifier for a map session.
///
/// A session owns one marker arena and one entity snapshot for the lifetime
/// of an open map view. The id makes session creation and teardown explicit
/// instead of relying on an ambient widget handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The canonical in-memory vehicle entity.
///
/// Entities are produced by the normalizer and are always fully populated:
/// `kind` and `status` are back-filled from fixed defaults when the source
/// record omits them, and `position` holds finite coordinates only.
/// Positions change in exactly two ways: a wholesale snapshot replacement
/// after a fetch, or an in-place optimistic patch on drag release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Reconciliation key, unique within a snapshot
    pub id: VehicleId,

    /// Free-text classification (e.g. "Sweeper", "Dump truck")
    pub kind: String,

    /// Open-vocabulary repair status (e.g. "in repair", "awaiting parts")
    pub status: String,

    /// Yard-local position in store coordinates
    pub position: StorePoint,
}

impl Vehicle {
    /// Creates a vehicle with default classification and status.
    pub fn new(id: VehicleId, position: StorePoint) -> Self {
        Self {
            id,
            kind: DEFAULT_KIND.to_string(),
            status: DEFAULT_STATUS.to_string(),
            position,
        }
    }

    /// Sets the classification.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Returns the display color derived from the status.
    ///
    /// The lookup is total: unknown statuses map to the fallback color.
    pub fn display_color(&self) -> Rgb {
        color_for_status(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::FALLBACK_COLOR;

    #[test]
    fn test_vehicle_id_round_trip() {
        let id = VehicleId::new("v123");
        assert_eq!(id.as_str(), "v123");
        assert_eq!(id.to_string(), "v123");
        assert!(!id.is_blank());
        assert!(VehicleId::new("   ").is_blank());
    }

    #[test]
    fn test_session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_vehicle_defaults() {
        let vehicle = Vehicle::new(VehicleId::new("v1"), StorePoint::new(10.0, 20.0));
        assert_eq!(vehicle.kind, DEFAULT_KIND);
        assert_eq!(vehicle.status, DEFAULT_STATUS);
        assert_eq!(vehicle.display_color(), FALLBACK_COLOR);
    }

    #[test]
    fn test_vehicle_builder() {
        let vehicle = Vehicle::new(VehicleId::new("v1"), StorePoint::new(0.0, 0.0))
            .with_kind("Sweeper")
            .with_status("in repair");
        assert_eq!(vehicle.kind, "Sweeper");
        assert_eq!(vehicle.status, "in repair");
        assert_ne!(vehicle.display_color(), FALLBACK_COLOR);
    }
}

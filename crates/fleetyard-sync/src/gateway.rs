//! Remote sync gateway contract.
//!
//! The core consumes exactly two remote operations: fetch the full vehicle
//! snapshot, and persist one position. Both are implemented externally (the
//! spreadsheet web script, behind `fleetyard-gateway`); this module defines
//! only the contract and the wire record shape.

use async_trait::async_trait;
use fleetyard_core::error::Result;
use fleetyard_core::geometry::{parse_coord, StorePoint};
use fleetyard_core::types::VehicleId;
use serde::{Deserialize, Serialize};

/// A coordinate as it arrives on the wire: numeric or numeric text.
///
/// The store of record is a spreadsheet, so a cell edited by hand can turn a
/// number into text. Both shapes are accepted; anything non-finite is
/// treated as absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCoord {
    Number(f64),
    Text(String),
}

impl RawCoord {
    /// Returns the finite numeric value, or `None` if absent/unparseable.
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            RawCoord::Number(v) => Some(*v).filter(|v| v.is_finite()),
            RawCoord::Text(s) => parse_coord(s),
        }
    }
}

/// One raw record from the fetch-all response.
///
/// Only `id` is required on the wire; everything else is optional and
/// back-filled (or filtered) by the normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVehicleRecord {
    pub id: String,

    #[serde(default)]
    pub x: Option<RawCoord>,

    #[serde(default)]
    pub y: Option<RawCoord>,

    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

impl RawVehicleRecord {
    /// Returns the record position if both coordinates are present and
    /// finite.
    pub fn position(&self) -> Option<StorePoint> {
        let x = self.x.as_ref()?.as_finite()?;
        let y = self.y.as_ref()?.as_finite()?;
        Some(StorePoint::new(x, y))
    }
}

/// A repair/part request submitted from the request form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRequest {
    /// Vehicle identifier the request is about
    pub vehicle_id: String,

    /// Where the vehicle currently is (Yard, Depot, Office, Field)
    pub location: String,

    /// Free-text problem description
    pub notes: String,
}

/// The two remote operations the core depends on, plus service request
/// submission.
///
/// Implementations must not retry internally: the error contract here is
/// one attempt, one result. Retrying (or not) is the caller's decision, and
/// in this system nothing retries automatically.
#[async_trait]
pub trait SyncGateway: Send + Sync {
    /// Fetches the full vehicle snapshot.
    ///
    /// A non-success response is a hard failure; callers keep the previous
    /// snapshot untouched.
    async fn fetch_all(&self) -> Result<Vec<RawVehicleRecord>>;

    /// Persists one vehicle position.
    ///
    /// The success body is ignored beyond its status. On failure the caller
    /// keeps its optimistic local state.
    async fn persist_position(&self, id: &VehicleId, position: StorePoint) -> Result<()>;

    /// Submits a repair/part request.
    async fn submit_service_request(&self, request: &ServiceRequest) -> Result<()>;
}

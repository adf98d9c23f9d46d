//! Snapshot normalization: raw wire records to canonical vehicle entities.
//!
//! All default back-filling happens here, in one place, so downstream code
//! never branches on optional-field absence.

use crate::gateway::RawVehicleRecord;
use fleetyard_core::types::{Vehicle, VehicleId, DEFAULT_KIND, DEFAULT_STATUS};

/// Converts one fetch response into a snapshot of fully-populated entities.
///
/// Records missing either coordinate, or with a blank id, are dropped
/// silently; that is a filter, not an error. Duplicate ids are kept in
/// order and collapse to the last occurrence during reconciliation.
pub fn normalize_records(records: Vec<RawVehicleRecord>) -> Vec<Vehicle> {
    let total = records.len();
    let mut vehicles = Vec::with_capacity(total);

    for record in records {
        let Some(position) = record.position() else {
            continue;
        };
        let id = VehicleId::new(record.id);
        if id.is_blank() {
            continue;
        }

        vehicles.push(Vehicle {
            id,
            kind: record.kind.unwrap_or_else(|| DEFAULT_KIND.to_string()),
            status: record.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            position,
        });
    }

    let dropped = total - vehicles.len();
    if dropped > 0 {
        tracing::debug!(dropped, total, "skipped records without usable id/coordinates");
    }

    vehicles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::RawCoord;
    use fleetyard_core::geometry::StorePoint;
    use fleetyard_core::status::FALLBACK_COLOR;

    fn record(id: &str, x: Option<RawCoord>, y: Option<RawCoord>) -> RawVehicleRecord {
        RawVehicleRecord {
            id: id.to_string(),
            x,
            y,
            kind: None,
            status: None,
        }
    }

    #[test]
    fn test_text_coordinates_are_parsed() {
        let records = vec![record(
            "v1",
            Some(RawCoord::Text("120.5".to_string())),
            Some(RawCoord::Number(80.0)),
        )];

        let vehicles = normalize_records(records);
        assert_eq!(vehicles.len(), 1);

        let v = &vehicles[0];
        assert_eq!(v.id.as_str(), "v1");
        assert_eq!(v.kind, DEFAULT_KIND);
        assert_eq!(v.status, DEFAULT_STATUS);
        assert_eq!(v.position, StorePoint::new(120.5, 80.0));
        assert_eq!(v.display_color(), FALLBACK_COLOR);
    }

    #[test]
    fn test_missing_coordinate_drops_record() {
        let records = vec![
            record("v1", Some(RawCoord::Number(10.0)), None),
            record("v2", None, Some(RawCoord::Number(10.0))),
            record("v3", Some(RawCoord::Number(10.0)), Some(RawCoord::Number(20.0))),
        ];

        let vehicles = normalize_records(records);
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].id.as_str(), "v3");
    }

    #[test]
    fn test_unparseable_coordinate_is_absent_not_zero() {
        let records = vec![record(
            "v1",
            Some(RawCoord::Text("garbage".to_string())),
            Some(RawCoord::Number(10.0)),
        )];
        assert!(normalize_records(records).is_empty());
    }

    #[test]
    fn test_blank_id_drops_record() {
        let records = vec![record(
            "  ",
            Some(RawCoord::Number(1.0)),
            Some(RawCoord::Number(2.0)),
        )];
        assert!(normalize_records(records).is_empty());
    }

    #[test]
    fn test_explicit_fields_survive() {
        let mut r = record(
            "v1",
            Some(RawCoord::Number(1.0)),
            Some(RawCoord::Number(2.0)),
        );
        r.kind = Some("Sweeper".to_string());
        r.status = Some("in repair".to_string());

        let vehicles = normalize_records(vec![r]);
        assert_eq!(vehicles[0].kind, "Sweeper");
        assert_eq!(vehicles[0].status, "in repair");
    }
}

//! Yard-local coordinate system and coordinate parsing.
//!
//! The map is a flat, non-geographic canvas bounded by a fixed logical
//! extent of 0..1000 on both axes. The store of record keeps positions as
//! `(x, y)` pairs; the map widget convention is `(lat, lng)`. The mapping
//! between the two is an axis swap and nothing else: `lat = y`, `lng = x`.
//! No projection, scaling, or geographic semantics are involved.

use serde::{Deserialize, Serialize};

/// Logical extent of the yard canvas on both axes.
pub const CANVAS_SIZE: f64 = 1000.0;

/// Position in the store of record's native units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorePoint {
    pub x: f64,
    pub y: f64,
}

impl StorePoint {
    /// Creates a store point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the point clamped to the canvas extent.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, CANVAS_SIZE),
            y: self.y.clamp(0.0, CANVAS_SIZE),
        }
    }

    /// Returns the coordinates rounded to whole units, for display labels.
    pub fn rounded(&self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

/// Position in the map widget's `(lat, lng)` convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
}

impl MapPoint {
    /// Creates a map point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<StorePoint> for MapPoint {
    fn from(p: StorePoint) -> Self {
        Self { lat: p.y, lng: p.x }
    }
}

impl From<MapPoint> for StorePoint {
    fn from(p: MapPoint) -> Self {
        Self { x: p.lng, y: p.lat }
    }
}

/// Parses a coordinate that arrived as text.
///
/// Returns `None` for anything that does not parse to a finite number.
/// A failed parse means "coordinate absent", never zero; callers drop the
/// record instead of rendering it at the origin.
pub fn parse_coord(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

//! # Fleetyard Core
//!
//! Core types, error handling, and configuration for the Fleetyard vehicle
//! map.
//!
//! This crate provides the foundational building blocks for the system:
//!
//! - **Types**: the `Vehicle` entity, the `VehicleId` and `SessionId`
//!   identifiers, and classification defaults.
//! - **Geometry**: the yard-local coordinate system, the axis-swap mapping
//!   between store coordinates and map coordinates, and lenient coordinate
//!   parsing for values that arrive as numeric text.
//! - **Status palette**: the fixed status-to-color table with a total
//!   fallback for statuses the table does not know.
//! - **Errors**: `FleetError` covering fetch, persist, payload, and
//!   configuration failures.
//! - **Configuration**: YAML files with environment variable overrides.
//!
//! ## Example
//!
//! ```
//! use fleetyard_core::geometry::{MapPoint, StorePoint};
//! use fleetyard_core::types::{Vehicle, VehicleId};
//!
//! let vehicle = Vehicle::new(VehicleId::new("v123"), StorePoint::new(120.5, 80.0));
//! let on_map = MapPoint::from(vehicle.position);
//! assert_eq!(on_map.lat, 80.0);
//! assert_eq!(on_map.lng, 120.5);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod status;
pub mod types;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{FleetError, Result};
pub use geometry::{MapPoint, StorePoint};
pub use status::{color_for_status, Rgb};
pub use types::{SessionId, Vehicle, VehicleId};

//! # Fleetyard Sync
//!
//! Position reconciliation and marker lifecycle for the Fleetyard vehicle
//! map. This crate is the part of the system with real state-management
//! concerns; everything around it is plain I/O.
//!
//! # Architecture
//!
//! ```text
//!   Remote store ──fetch──▶ RawVehicleRecord ──normalize──▶ Vehicle
//!                                                              │
//!                        ┌─────────────────────────────────────┘
//!                        ▼
//!                   MapSession ──reconcile──▶ MarkerArena ──▶ rendering
//!                        │
//!        drag release ───┤ (optimistic in-place patch)
//!                        ▼
//!                 PersistDispatcher ──task per drag──▶ gateway persist
//!                        │
//!                        └──▶ PersistOutcome channel (observability sink)
//! ```
//!
//! The arena and the entity snapshot are owned by a single [`MapSession`]
//! and mutated only from one event loop; the gateway operations are the only
//! suspension points. A fetch failure leaves the previous snapshot rendered;
//! a persist failure keeps the optimistic local state (no rollback, no
//! automatic retry).

pub mod gateway;
pub mod mutation;
pub mod normalize;
pub mod reconcile;
pub mod session;

// Re-export commonly used types
pub use gateway::{RawCoord, RawVehicleRecord, ServiceRequest, SyncGateway};
pub use mutation::{PersistDispatcher, PersistOutcome};
pub use normalize::normalize_records;
pub use reconcile::{Marker, MarkerArena, ReconcileSummary};
pub use session::MapSession;

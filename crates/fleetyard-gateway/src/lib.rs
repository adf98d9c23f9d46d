//! # Fleetyard Gateway
//!
//! HTTP implementation of the [`fleetyard_sync::SyncGateway`] contract
//! against the spreadsheet-backed web script that serves as the store of
//! record. The script speaks a single-endpoint, query-parameter protocol:
//! every operation is a GET against the deployed script URL with an
//! `action` parameter.

pub mod client;

pub use client::SheetGateway;

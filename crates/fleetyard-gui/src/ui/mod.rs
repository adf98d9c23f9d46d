//! UI panels for the Fleetyard application.

pub mod map_panel;
pub mod request_panel;

//! Error types for the Fleetyard vehicle map.
//!
//! No failure in this system is fatal to the process: fetch and persist
//! errors degrade to a stale-but-usable view, and malformed records are
//! filtered during normalization rather than surfaced as errors.

use thiserror::Error;

/// Result type alias using FleetError as the error type.
pub type Result<T> = std::result::Result<T, FleetError>;

/// Top-level error type for all Fleetyard operations.
#[derive(Debug, Error)]
pub enum FleetError {
    /// The fetch-all operation returned a non-success response
    #[error("fetch failed ({status}): {detail}")]
    Fetch { status: u16, detail: String },

    /// A persist-one operation failed; local optimistic state is kept
    #[error("persist failed for vehicle '{id}': {reason}")]
    Persist { id: String, reason: String },

    /// The gateway could not be reached at all
    #[error("gateway transport error: {reason}")]
    Transport { reason: String },

    /// A response arrived but its payload could not be decoded
    #[error("invalid response payload: {reason}")]
    Payload { reason: String },

    /// Configuration loading or validation failed
    #[error("configuration error for '{field}': {reason}")]
    Config { field: String, reason: String },
}

impl FleetError {
    /// Creates a fetch failure from a response status and body text.
    pub fn fetch(status: u16, detail: impl Into<String>) -> Self {
        Self::Fetch {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a persist failure for a vehicle.
    pub fn persist(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Persist {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(reason: impl ToString) -> Self {
        Self::Transport {
            reason: reason.to_string(),
        }
    }

    /// Creates a payload decode error.
    pub fn payload(reason: impl ToString) -> Self {
        Self::Payload {
            reason: reason.to_string(),
        }
    }

    /// Creates a configuration error.
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error came from the persist path.
    ///
    /// Persist failures keep the optimistic local state; callers use this to
    /// pick the right report wording.
    pub fn is_persist(&self) -> bool {
        matches!(self, FleetError::Persist { .. })
    }
}

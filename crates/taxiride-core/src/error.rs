//! Core domain errors.

use thiserror::Error;

use crate::status::{RideEvent, RideStatus};

/// Core domain errors for TaxiRide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A status string did not match any known ride status.
    #[error("Unrecognized ride status: {0}")]
    UnrecognizedStatus(String),

    /// An event string did not match any known ride event.
    #[error("Unrecognized ride event: {0}")]
    UnrecognizedEvent(String),

    /// A driver id was blank.
    #[error("Invalid driver id: {0:?}")]
    InvalidDriverId(String),

    /// The event is not allowed from the ride's current status.
    #[error("{message}")]
    InvalidStateTransition {
        from: RideStatus,
        event: RideEvent,
        message: String,
    },

    /// The ride moved on since the caller last read it.
    #[error("Stale ride status: expected {expected}, found {actual}")]
    StaleStatus {
        expected: RideStatus,
        actual: RideStatus,
    },
}

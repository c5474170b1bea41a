//! TaxiRide Core Domain Types
//!
//! This crate contains the taxi ride lifecycle with no dependencies on:
//! - Network or persistence
//! - Logging or runtime specifics
//!
//! The state machine lives in [`machine`]; [`Ride`] is a record that only
//! changes status through it.

pub mod error;
pub mod ids;
pub mod machine;
pub mod ride;
pub mod status;

// Re-export commonly used types
pub use error::CoreError;
pub use ids::{DriverId, RideId};
pub use machine::{
    get_next_status, get_ride_state, invalid_transition_message, is_event_allowed, transitions,
    StateDescriptor,
};
pub use ride::{Ride, StatusChange};
pub use status::{RideEvent, RideStatus};

//! Ride record whose status only moves through the state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::machine::{self, StateDescriptor};
use crate::{CoreError, DriverId, RideEvent, RideId, RideStatus};

/// A single applied transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: RideStatus,
    pub to: RideStatus,
    pub event: RideEvent,
    pub at: DateTime<Utc>,
}

/// A taxi ride tracked from request to a terminal status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    /// Unique ride identifier.
    pub id: RideId,

    /// Driver assigned to the ride, once dispatch found one.
    pub driver_id: Option<DriverId>,

    /// Current ride status.
    status: RideStatus,

    /// Bumped on every applied transition.
    version: u64,

    /// When the ride was requested.
    pub created_at: DateTime<Utc>,

    /// When the status last changed.
    pub updated_at: DateTime<Utc>,

    /// Applied transitions, oldest first.
    history: Vec<StatusChange>,
}

impl Ride {
    /// Create a new pending Ride.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: RideId::generate(),
            driver_id: None,
            status: RideStatus::Pending,
            version: 0,
            created_at: now,
            updated_at: now,
            history: Vec::new(),
        }
    }

    /// Builder method to set a specific ID (useful for testing).
    pub fn with_id(mut self, id: RideId) -> Self {
        self.id = id;
        self
    }

    /// Rebuild a ride loaded from a store at its persisted status and
    /// version. History before this point is not available.
    pub fn restore(id: RideId, status: RideStatus, version: u64) -> Self {
        Self {
            id,
            status,
            version,
            ..Self::new()
        }
    }

    pub fn status(&self) -> RideStatus {
        self.status
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn history(&self) -> &[StatusChange] {
        &self.history
    }

    /// Descriptor of the current status.
    pub fn state(&self) -> &'static StateDescriptor {
        machine::get_ride_state(self.status)
    }

    /// Check if the ride is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply `event` to the ride.
    ///
    /// An illegal event leaves the ride untouched and returns
    /// [`CoreError::InvalidStateTransition`].
    pub fn apply(&mut self, event: RideEvent) -> Result<RideStatus, CoreError> {
        let from = self.status;
        let to = machine::get_next_status(from, event).ok_or_else(|| {
            CoreError::InvalidStateTransition {
                from,
                event,
                message: machine::invalid_transition_message(from, event),
            }
        })?;

        let now = Utc::now();
        self.status = to;
        self.version += 1;
        self.updated_at = now;
        self.history.push(StatusChange {
            from,
            to,
            event,
            at: now,
        });
        Ok(to)
    }

    /// Apply `event` only if the ride is still in `expected`.
    ///
    /// Compare-and-swap on the last status the caller observed.
    pub fn apply_from(
        &mut self,
        expected: RideStatus,
        event: RideEvent,
    ) -> Result<RideStatus, CoreError> {
        if self.status != expected {
            return Err(CoreError::StaleStatus {
                expected,
                actual: self.status,
            });
        }
        self.apply(event)
    }

    /// Apply `ASSIGN_DRIVER` and record the driver.
    pub fn assign_driver(&mut self, driver_id: DriverId) -> Result<RideStatus, CoreError> {
        let status = self.apply(RideEvent::AssignDriver)?;
        self.driver_id = Some(driver_id);
        Ok(status)
    }
}

impl Default for Ride {
    fn default() -> Self {
        Self::new()
    }
}

//! Ride status and ride event enums, with their wire names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::machine::{self, StateDescriptor};

/// Status of a taxi ride.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    /// Ride requested, no driver yet.
    #[default]
    Pending,
    /// A driver accepted the ride.
    DriverAssigned,
    /// Driver is heading to the pickup point.
    DriverEnRoute,
    /// Driver is waiting at the pickup point.
    DriverArrived,
    /// Passenger is on board.
    RideInProgress,
    /// Vehicle reached the destination, not yet settled.
    ArrivedAtDestination,
    /// Ride finished.
    Completed,
    /// Ride cancelled before pickup.
    Cancelled,
    /// No driver took the ride.
    Rejected,
}

impl RideStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [RideStatus; 9] = [
        Self::Pending,
        Self::DriverAssigned,
        Self::DriverEnRoute,
        Self::DriverArrived,
        Self::RideInProgress,
        Self::ArrivedAtDestination,
        Self::Completed,
        Self::Cancelled,
        Self::Rejected,
    ];

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::DriverAssigned => "driver_assigned",
            Self::DriverEnRoute => "driver_en_route",
            Self::DriverArrived => "driver_arrived",
            Self::RideInProgress => "ride_in_progress",
            Self::ArrivedAtDestination => "arrived_at_destination",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if the ride is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Rejected)
    }

    /// Returns true if the ride is still active (not terminal).
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Static descriptor for this status.
    pub fn state(&self) -> &'static StateDescriptor {
        machine::get_ride_state(*self)
    }

    /// Status reached by applying `event`, if the transition is legal.
    pub fn next(&self, event: RideEvent) -> Option<RideStatus> {
        machine::get_next_status(*self, event)
    }

    /// Returns true if the rider may still cancel from this status.
    pub fn can_cancel(&self) -> bool {
        self.state().can_cancel
    }

    /// Lifecycle progress shown to the rider, 0 to 100.
    pub fn progress_percentage(&self) -> u8 {
        self.state().progress_percentage
    }

    /// Rider-facing label.
    pub fn label(&self) -> &'static str {
        self.state().label
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnrecognizedStatus(s.to_string()))
    }
}

/// Event driving a ride from one status to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideEvent {
    /// Dispatch matched a driver.
    AssignDriver,
    /// Driver started heading to pickup.
    DriverOnWay,
    /// Driver reached pickup.
    DriverArrived,
    /// Passenger boarded.
    StartRide,
    /// Vehicle reached destination.
    ArriveAtDestination,
    /// Ride settled.
    CompleteRide,
    /// Rider or operator cancelled.
    CancelRide,
    /// Dispatch found no driver.
    RejectRide,
}

impl RideEvent {
    /// Every event, in table order.
    pub const ALL: [RideEvent; 8] = [
        Self::AssignDriver,
        Self::DriverOnWay,
        Self::DriverArrived,
        Self::StartRide,
        Self::ArriveAtDestination,
        Self::CompleteRide,
        Self::CancelRide,
        Self::RejectRide,
    ];

    /// Wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssignDriver => "ASSIGN_DRIVER",
            Self::DriverOnWay => "DRIVER_ON_WAY",
            Self::DriverArrived => "DRIVER_ARRIVED",
            Self::StartRide => "START_RIDE",
            Self::ArriveAtDestination => "ARRIVE_AT_DESTINATION",
            Self::CompleteRide => "COMPLETE_RIDE",
            Self::CancelRide => "CANCEL_RIDE",
            Self::RejectRide => "REJECT_RIDE",
        }
    }
}

impl fmt::Display for RideEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RideEvent {
    type Err = CoreError;

    /// Accepts the wire name in any case, with `-` in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|event| event.as_str() == normalized)
            .ok_or_else(|| CoreError::UnrecognizedEvent(s.to_string()))
    }
}

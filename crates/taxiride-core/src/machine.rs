//! Ride status state machine.
//!
//! Two static tables drive a ride's lifecycle: one describing each status,
//! one mapping `(status, event)` to the next status.
//!
//! ```text
//!   pending ──ASSIGN_DRIVER──▶ driver_assigned ──DRIVER_ON_WAY──▶ driver_en_route
//!     │                                                             │
//!     │ REJECT_RIDE                                   DRIVER_ARRIVED │
//!     ▼                                                             ▼
//!   rejected                                                  driver_arrived
//!                                                                   │
//!                                                        START_RIDE │
//!                                                                   ▼
//!   completed ◀──COMPLETE_RIDE── arrived_at_destination ◀──── ride_in_progress
//!                                              ARRIVE_AT_DESTINATION
//! ```
//!
//! `CANCEL_RIDE` leads to `cancelled` from any status up to and including
//! `driver_arrived`. Once the passenger is on board the ride cannot be
//! cancelled.
//!
//! An illegal transition is a `None`, not an error: callers decide whether to
//! drop the event, reject the mutation, or show
//! [`invalid_transition_message`] to someone.

use serde::Serialize;

use crate::status::{RideEvent, RideStatus};

use crate::status::RideEvent as E;
use crate::status::RideStatus as S;

/// Static presentation and policy data for one ride status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateDescriptor {
    pub status: RideStatus,
    /// Events legal to submit while in this status.
    pub allowed_events: &'static [RideEvent],
    /// Whether the rider may still cancel.
    pub can_cancel: bool,
    pub label: &'static str,
    pub description: &'static str,
    /// Position in the lifecycle, 0 to 100.
    pub progress_percentage: u8,
}

impl StateDescriptor {
    pub fn allows(&self, event: RideEvent) -> bool {
        self.allowed_events.contains(&event)
    }
}

static PENDING: StateDescriptor = StateDescriptor {
    status: S::Pending,
    allowed_events: &[E::AssignDriver, E::CancelRide, E::RejectRide],
    can_cancel: true,
    label: "En attente",
    description: "Recherche d'un chauffeur disponible",
    progress_percentage: 0,
};

static DRIVER_ASSIGNED: StateDescriptor = StateDescriptor {
    status: S::DriverAssigned,
    allowed_events: &[E::DriverOnWay, E::CancelRide],
    can_cancel: true,
    label: "Chauffeur assigné",
    description: "Un chauffeur a accepté votre course",
    progress_percentage: 20,
};

static DRIVER_EN_ROUTE: StateDescriptor = StateDescriptor {
    status: S::DriverEnRoute,
    allowed_events: &[E::DriverArrived, E::CancelRide],
    can_cancel: true,
    label: "Chauffeur en route",
    description: "Votre chauffeur se dirige vers le point de prise en charge",
    progress_percentage: 40,
};

static DRIVER_ARRIVED: StateDescriptor = StateDescriptor {
    status: S::DriverArrived,
    allowed_events: &[E::StartRide, E::CancelRide],
    can_cancel: true,
    label: "Chauffeur arrivé",
    description: "Votre chauffeur vous attend au point de prise en charge",
    progress_percentage: 50,
};

static RIDE_IN_PROGRESS: StateDescriptor = StateDescriptor {
    status: S::RideInProgress,
    allowed_events: &[E::ArriveAtDestination],
    can_cancel: false,
    label: "Course en cours",
    description: "En route vers la destination",
    progress_percentage: 70,
};

static ARRIVED_AT_DESTINATION: StateDescriptor = StateDescriptor {
    status: S::ArrivedAtDestination,
    allowed_events: &[E::CompleteRide],
    can_cancel: false,
    label: "Arrivé à destination",
    description: "Vous êtes arrivé à destination",
    progress_percentage: 90,
};

static COMPLETED: StateDescriptor = StateDescriptor {
    status: S::Completed,
    allowed_events: &[],
    can_cancel: false,
    label: "Course terminée",
    description: "Merci d'avoir voyagé avec nous",
    progress_percentage: 100,
};

static CANCELLED: StateDescriptor = StateDescriptor {
    status: S::Cancelled,
    allowed_events: &[],
    can_cancel: false,
    label: "Course annulée",
    description: "Cette course a été annulée",
    progress_percentage: 100,
};

static REJECTED: StateDescriptor = StateDescriptor {
    status: S::Rejected,
    allowed_events: &[],
    can_cancel: false,
    label: "Course refusée",
    description: "Aucun chauffeur n'a pu accepter cette course",
    progress_percentage: 100,
};

/// Descriptor for `status`. Total over every status.
pub fn get_ride_state(status: RideStatus) -> &'static StateDescriptor {
    match status {
        S::Pending => &PENDING,
        S::DriverAssigned => &DRIVER_ASSIGNED,
        S::DriverEnRoute => &DRIVER_EN_ROUTE,
        S::DriverArrived => &DRIVER_ARRIVED,
        S::RideInProgress => &RIDE_IN_PROGRESS,
        S::ArrivedAtDestination => &ARRIVED_AT_DESTINATION,
        S::Completed => &COMPLETED,
        S::Cancelled => &CANCELLED,
        S::Rejected => &REJECTED,
    }
}

/// Status reached by applying `event` to `current`, or `None` if the
/// transition is illegal.
pub fn get_next_status(current: RideStatus, event: RideEvent) -> Option<RideStatus> {
    let next = match (current, event) {
        (S::Pending, E::AssignDriver) => S::DriverAssigned,
        (S::Pending, E::CancelRide) => S::Cancelled,
        (S::Pending, E::RejectRide) => S::Rejected,

        (S::DriverAssigned, E::DriverOnWay) => S::DriverEnRoute,
        (S::DriverAssigned, E::CancelRide) => S::Cancelled,

        (S::DriverEnRoute, E::DriverArrived) => S::DriverArrived,
        (S::DriverEnRoute, E::CancelRide) => S::Cancelled,

        (S::DriverArrived, E::StartRide) => S::RideInProgress,
        (S::DriverArrived, E::CancelRide) => S::Cancelled,

        (S::RideInProgress, E::ArriveAtDestination) => S::ArrivedAtDestination,

        (S::ArrivedAtDestination, E::CompleteRide) => S::Completed,

        _ => return None,
    };
    Some(next)
}

/// Whether `event` may be submitted while the ride is in `current`.
pub fn is_event_allowed(current: RideStatus, event: RideEvent) -> bool {
    get_next_status(current, event).is_some()
}

/// Diagnostic for an event that was refused from `current`.
///
/// Does not check that the transition is actually illegal; call it after
/// [`get_next_status`] returned `None`.
pub fn invalid_transition_message(current: RideStatus, event: RideEvent) -> String {
    format!(
        "Transition invalide : l'événement {} n'est pas autorisé depuis l'état « {} »",
        event,
        get_ride_state(current).label
    )
}

/// Every legal `(from, event, to)` triple, in status then event order.
pub fn transitions() -> impl Iterator<Item = (RideStatus, RideEvent, RideStatus)> {
    RideStatus::ALL.into_iter().flat_map(|from| {
        RideEvent::ALL
            .into_iter()
            .filter_map(move |event| get_next_status(from, event).map(|to| (from, event, to)))
    })
}

//! Replay an event sequence against a ride.

use clap::ValueEnum;
use serde::Serialize;
use tracing::{info, warn};

use taxiride_core::{CoreError, DriverId, Ride, RideEvent, RideStatus};

/// What to do with an event the ride's current status does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InvalidEventPolicy {
    /// Log a warning, skip the event, keep going.
    Drop,
    /// Stop at the first refused event.
    Abort,
}

/// An event that was refused and skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedEvent {
    /// Position in the input sequence.
    pub index: usize,
    pub status: RideStatus,
    pub event: RideEvent,
    pub message: String,
}

/// Result of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    pub ride: Ride,
    pub skipped: Vec<SkippedEvent>,
}

/// Apply `events` to `ride` in order.
///
/// When `driver` is given, `ASSIGN_DRIVER` records it on the ride.
pub fn replay(
    mut ride: Ride,
    events: &[RideEvent],
    driver: Option<&DriverId>,
    policy: InvalidEventPolicy,
) -> Result<ReplayOutcome, CoreError> {
    let mut skipped = Vec::new();

    for (index, &event) in events.iter().enumerate() {
        let from = ride.status();
        let applied = match (event, driver) {
            (RideEvent::AssignDriver, Some(driver)) => ride.assign_driver(driver.clone()),
            _ => ride.apply(event),
        };
        match applied {
            Ok(to) => {
                info!(
                    ride_id = %ride.id,
                    from = %from,
                    event = %event,
                    to = %to,
                    progress = to.progress_percentage(),
                    "Ride status changed"
                );
            }
            Err(CoreError::InvalidStateTransition { message, .. })
                if policy == InvalidEventPolicy::Drop =>
            {
                warn!(
                    ride_id = %ride.id,
                    status = %from,
                    event = %event,
                    index,
                    "Dropping event not allowed from current status"
                );
                skipped.push(SkippedEvent {
                    index,
                    status: from,
                    event,
                    message,
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(ReplayOutcome { ride, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_happy_path() {
        let events = [
            RideEvent::AssignDriver,
            RideEvent::DriverOnWay,
            RideEvent::DriverArrived,
            RideEvent::StartRide,
            RideEvent::ArriveAtDestination,
            RideEvent::CompleteRide,
        ];
        let outcome = replay(Ride::new(), &events, None, InvalidEventPolicy::Abort).unwrap();
        assert_eq!(outcome.ride.status(), RideStatus::Completed);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.ride.history().len(), 6);
    }

    #[test]
    fn test_drop_policy_skips_out_of_order_events() {
        // GPS reports arrival before dispatch assigned a driver.
        let events = [
            RideEvent::DriverArrived,
            RideEvent::AssignDriver,
            RideEvent::DriverOnWay,
        ];
        let outcome = replay(Ride::new(), &events, None, InvalidEventPolicy::Drop).unwrap();
        assert_eq!(outcome.ride.status(), RideStatus::DriverEnRoute);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 0);
        assert_eq!(outcome.skipped[0].status, RideStatus::Pending);
        assert_eq!(outcome.skipped[0].event, RideEvent::DriverArrived);
    }

    #[test]
    fn test_abort_policy_stops_at_first_refusal() {
        let events = [RideEvent::AssignDriver, RideEvent::CompleteRide];
        let err = replay(Ride::new(), &events, None, InvalidEventPolicy::Abort).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidStateTransition {
                from: RideStatus::DriverAssigned,
                event: RideEvent::CompleteRide,
                ..
            }
        ));
    }

    #[test]
    fn test_replay_records_assigned_driver() {
        let driver = DriverId::new("drv-42");
        let outcome = replay(
            Ride::new(),
            &[RideEvent::AssignDriver, RideEvent::DriverOnWay],
            Some(&driver),
            InvalidEventPolicy::Abort,
        )
        .unwrap();
        assert_eq!(outcome.ride.driver_id, Some(driver));
        assert_eq!(outcome.ride.status(), RideStatus::DriverEnRoute);
    }

    #[test]
    fn test_replay_from_restored_status() {
        let ride = Ride::restore("r-1".into(), RideStatus::RideInProgress, 4);
        let outcome = replay(
            ride,
            &[RideEvent::CancelRide, RideEvent::ArriveAtDestination],
            None,
            InvalidEventPolicy::Drop,
        )
        .unwrap();
        assert_eq!(outcome.ride.status(), RideStatus::ArrivedAtDestination);
        assert_eq!(outcome.ride.version(), 5);
        assert_eq!(outcome.skipped.len(), 1);
    }
}

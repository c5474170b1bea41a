//! Text and JSON rendering of command output.

use std::error::Error;
use std::fmt::Write as _;

use chrono::Local;
use serde::Serialize;

use taxiride_core::{
    get_next_status, get_ride_state, invalid_transition_message, transitions, CoreError,
    RideEvent, RideStatus, StateDescriptor,
};

use crate::replay::ReplayOutcome;

type RenderResult = Result<String, Box<dyn Error>>;

#[derive(Serialize)]
struct TransitionView {
    from: RideStatus,
    event: RideEvent,
    to: RideStatus,
}

#[derive(Serialize)]
struct ErrorView {
    error: String,
}

fn to_json<T: Serialize>(value: &T) -> RenderResult {
    Ok(serde_json::to_string_pretty(value)?)
}

/// `describe`: the descriptor of one status.
pub fn describe(status: RideStatus, json: bool) -> RenderResult {
    let state = get_ride_state(status);
    if json {
        return to_json(state);
    }
    Ok(state_block(state))
}

/// `next`: the status reached from `status` by `event`.
///
/// An illegal transition is an error carrying the rider-facing diagnostic.
pub fn next(status: RideStatus, event: RideEvent, json: bool) -> RenderResult {
    let Some(to) = get_next_status(status, event) else {
        return Err(CoreError::InvalidStateTransition {
            from: status,
            event,
            message: invalid_transition_message(status, event),
        }
        .into());
    };

    if json {
        return to_json(&TransitionView {
            from: status,
            event,
            to,
        });
    }
    Ok(format!("{} --{}--> {}", status, event, to))
}

/// `allowed`: events accepted from `status` and where they lead.
pub fn allowed(status: RideStatus, json: bool) -> RenderResult {
    let events = get_ride_state(status).allowed_events;
    if json {
        return to_json(&events);
    }
    if events.is_empty() {
        return Ok(format!("{} is terminal: no events allowed", status));
    }

    let lines: Vec<String> = events
        .iter()
        .filter_map(|event| {
            get_next_status(status, *event).map(|to| format!("{:<24}  -> {}", event, to))
        })
        .collect();
    Ok(lines.join("\n"))
}

/// `table`: every legal transition.
pub fn table(json: bool) -> RenderResult {
    let rows: Vec<TransitionView> = transitions()
        .map(|(from, event, to)| TransitionView { from, event, to })
        .collect();
    if json {
        return to_json(&rows);
    }

    let mut out = format!("{:<24}  {:<24}  {}\n{}", "FROM", "EVENT", "TO", "-".repeat(80));
    for row in rows {
        write!(out, "\n{:<24}  {:<24}  {}", row.from, row.event, row.to)?;
    }
    Ok(out)
}

/// `replay`: the applied trail, skipped events and final status.
pub fn replay(outcome: &ReplayOutcome, json: bool) -> RenderResult {
    if json {
        return to_json(outcome);
    }

    let ride = &outcome.ride;
    let mut out = format!("Ride {}:", ride.id);
    if let Some(driver) = &ride.driver_id {
        write!(out, "\n  Driver:      {}", driver)?;
    }
    for change in ride.history() {
        write!(
            out,
            "\n  {}  {} --{}--> {}",
            change.at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
            change.from,
            change.event,
            change.to
        )?;
    }
    for skipped in &outcome.skipped {
        write!(out, "\n  skipped #{}: {}", skipped.index, skipped.message)?;
    }
    write!(out, "\n{}", state_block(ride.state()))?;
    Ok(out)
}

/// A failed command, using the error's Display form.
pub fn error(err: &dyn Error, json: bool) -> String {
    if json {
        let view = ErrorView {
            error: err.to_string(),
        };
        // ErrorView is a single string field
        return serde_json::to_string(&view).unwrap_or_default();
    }
    format!("Error: {}", err)
}

fn state_block(state: &StateDescriptor) -> String {
    let events: Vec<&str> = state.allowed_events.iter().map(|e| e.as_str()).collect();
    [
        format!("  Status:      {}", state.status),
        format!("  Label:       {}", state.label),
        format!("  Description: {}", state.description),
        format!("  Progress:    {}%", state.progress_percentage),
        format!(
            "  Cancellable: {}",
            if state.can_cancel { "yes" } else { "no" }
        ),
        format!("  Allowed:     {}", events.join(", ")),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{self, InvalidEventPolicy};
    use taxiride_core::Ride;

    #[test]
    fn test_describe_text() {
        let out = describe(RideStatus::DriverEnRoute, false).unwrap();
        assert!(out.contains("Label:       Chauffeur en route"));
        assert!(out.contains("Progress:    40%"));
        assert!(out.contains("Cancellable: yes"));
        assert!(out.contains("Allowed:     DRIVER_ARRIVED, CANCEL_RIDE"));
    }

    #[test]
    fn test_describe_json() {
        let out = describe(RideStatus::Rejected, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "rejected");
        assert_eq!(value["progress_percentage"], 100);
        assert_eq!(value["can_cancel"], false);
        assert_eq!(value["allowed_events"], serde_json::json!([]));
    }

    #[test]
    fn test_next_legal() {
        assert_eq!(
            next(RideStatus::DriverArrived, RideEvent::StartRide, false).unwrap(),
            "driver_arrived --START_RIDE--> ride_in_progress"
        );

        let out = next(RideStatus::Pending, RideEvent::AssignDriver, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["to"], "driver_assigned");
    }

    #[test]
    fn test_next_illegal_reports_diagnostic_not_debug() {
        let err = next(RideStatus::Pending, RideEvent::StartRide, false).unwrap_err();

        let text = error(&*err, false);
        assert_eq!(
            text,
            format!(
                "Error: {}",
                invalid_transition_message(RideStatus::Pending, RideEvent::StartRide)
            )
        );
        assert!(text.contains("« En attente »"));
        assert!(!text.contains("InvalidStateTransition"));

        let out = error(&*err, true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("Transition invalide"));
    }

    #[test]
    fn test_aborted_replay_reports_diagnostic() {
        let err = replay::replay(
            Ride::new(),
            &[RideEvent::AssignDriver, RideEvent::CompleteRide],
            None,
            InvalidEventPolicy::Abort,
        )
        .unwrap_err();
        let text = error(&err, false);
        assert!(text.starts_with("Error: Transition invalide"));
        assert!(text.contains("COMPLETE_RIDE"));
    }

    #[test]
    fn test_allowed() {
        let out = allowed(RideStatus::Pending, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ASSIGN_DRIVER"));
        assert!(lines[0].ends_with("-> driver_assigned"));

        assert_eq!(
            allowed(RideStatus::Completed, false).unwrap(),
            "completed is terminal: no events allowed"
        );

        let out = allowed(RideStatus::RideInProgress, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!(["ARRIVE_AT_DESTINATION"]));
    }

    #[test]
    fn test_table() {
        let out = table(false).unwrap();
        // header, rule, one line per transition
        assert_eq!(out.lines().count(), 2 + transitions().count());
        assert!(out.lines().next().unwrap().starts_with("FROM"));

        let out = table(true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), transitions().count());
        assert_eq!(value[0]["event"], "ASSIGN_DRIVER");
    }

    #[test]
    fn test_replay_text_lists_trail_and_skips() {
        let outcome = replay::replay(
            Ride::new().with_id("ride-7".into()),
            &[RideEvent::StartRide, RideEvent::RejectRide],
            None,
            InvalidEventPolicy::Drop,
        )
        .unwrap();
        let out = super::replay(&outcome, false).unwrap();
        assert!(out.starts_with("Ride ride-7:"));
        assert!(out.contains("pending --REJECT_RIDE--> rejected"));
        assert!(out.contains("skipped #0: Transition invalide"));
        assert!(out.contains("Label:       Course refusée"));
    }
}

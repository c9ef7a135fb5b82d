// ── Action domain types ──
//
// An `Action` is an immutable snapshot of a server-side asynchronous
// operation. Nothing here polls: callers refresh a snapshot through
// `ActionClient::refresh` until `is_terminal()` holds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle state. `Running` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionStatus {
    Running,
    Success,
    Error,
}

impl ActionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Structured cause of a failed action. Callers branch on `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionError {
    pub code: String,
    pub message: String,
}

/// A resource touched by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResource {
    pub id: i64,
    pub kind: String,
}

/// Snapshot of one asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: i64,
    pub command: String,
    pub status: ActionStatus,
    /// Percent complete, `0..=100`.
    pub progress: u8,
    pub started: DateTime<Utc>,
    pub finished: Option<DateTime<Utc>>,
    pub resources: Vec<ActionResource>,
    /// Present only when `status` is [`ActionStatus::Error`].
    pub error: Option<ActionError>,
}

impl Action {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }

    /// The failure cause, if the action ended in error.
    pub fn failure(&self) -> Option<&ActionError> {
        if self.status == ActionStatus::Error {
            self.error.as_ref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(status: ActionStatus, error: Option<ActionError>) -> Action {
        Action {
            id: 13,
            command: "attach_volume".into(),
            status,
            progress: 100,
            started: DateTime::UNIX_EPOCH,
            finished: None,
            resources: Vec::new(),
            error,
        }
    }

    #[test]
    fn only_running_is_non_terminal() {
        assert!(!ActionStatus::Running.is_terminal());
        assert!(ActionStatus::Success.is_terminal());
        assert!(ActionStatus::Error.is_terminal());
    }

    #[test]
    fn failure_keeps_code_and_message() {
        let cause = ActionError {
            code: "action_failed".into(),
            message: "volume is locked".into(),
        };
        let failed = action(ActionStatus::Error, Some(cause.clone()));
        assert!(failed.is_terminal());
        assert!(!failed.is_success());
        assert_eq!(failed.failure(), Some(&cause));
    }

    #[test]
    fn success_has_no_failure() {
        let done = action(ActionStatus::Success, None);
        assert!(done.is_success());
        assert_eq!(done.failure(), None);
    }

    #[test]
    fn status_parses_wire_form() {
        assert_eq!("running".parse::<ActionStatus>().ok(), Some(ActionStatus::Running));
        assert_eq!(ActionStatus::Error.to_string(), "error");
        assert!("paused".parse::<ActionStatus>().is_err());
    }
}

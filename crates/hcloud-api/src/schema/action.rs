use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Asynchronous server-side operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: i64,
    pub command: String,
    pub status: String,
    pub progress: u8,
    pub started: DateTime<Utc>,
    #[serde(default)]
    pub finished: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resources: Vec<ActionResourceReference>,
    #[serde(default)]
    pub error: Option<ActionError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResourceReference {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionError {
    pub code: String,
    pub message: String,
}

/// Body of endpoints that answer with a single action.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    pub action: Action,
}

/// Body of endpoints that answer with a list of actions.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionsResponse {
    #[serde(default)]
    pub actions: Vec<Action>,
}

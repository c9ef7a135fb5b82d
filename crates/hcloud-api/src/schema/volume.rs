use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::{IdOrName, Labels, Location, Protection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub id: i64,
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub server: Option<i64>,
    pub location: Location,
    pub size: u32,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub protection: Protection,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub linux_device: Option<String>,
    pub created: DateTime<Utc>,
}

// ── Requests / responses ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct VolumeCreateRequest {
    pub name: String,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<IdOrName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automount: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// `action` is absent when the volume is created without a server.
#[derive(Debug, Clone, Deserialize)]
pub struct VolumeCreateResponse {
    pub volume: Volume,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub next_actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VolumeUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeUpdateResponse {
    pub volume: Volume,
}

#[derive(Debug, Clone, Serialize)]
pub struct VolumeActionAttachVolumeRequest {
    pub server: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automount: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VolumeActionDetachVolumeRequest {}

#[derive(Debug, Clone, Serialize)]
pub struct VolumeActionResizeVolumeRequest {
    pub size: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VolumeActionChangeProtectionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

// ── Volume domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::common::{Labels, Location, Protection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VolumeStatus {
    Creating,
    Available,
}

/// Filesystem the volume is formatted with on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VolumeFormat {
    Ext4,
    Xfs,
}

/// The canonical Volume type. `size` is in GB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub id: i64,
    pub name: String,
    pub status: VolumeStatus,
    /// ID of the server the volume is attached to.
    pub server: Option<i64>,
    pub location: Location,
    pub size: u32,
    /// Raw format string; unknown filesystems are kept as-is.
    pub format: Option<String>,
    pub protection: Protection,
    pub labels: Labels,
    pub linux_device: Option<String>,
    pub created: DateTime<Utc>,
}

impl Volume {
    pub fn is_attached(&self) -> bool {
        self.server.is_some()
    }
}

// ── Common types shared across the domain model ──

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key/value labels attached to an entity. Keys are unique; order is not kept.
pub type Labels = HashMap<String, String>;

/// Protection flags that block destructive operations server-side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protection {
    pub delete: bool,
}

/// Physical site a resource lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub network_zone: Option<String>,
}

/// A datacenter within a [`Location`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datacenter {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub location: Location,
}

/// Reference to a location by ID or by name, as accepted on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationRef {
    Id(i64),
    Name(String),
}

impl From<i64> for LocationRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for LocationRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

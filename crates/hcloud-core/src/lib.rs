// hcloud-core: resource clients on top of the hcloud-api transport.
//
// Maps wire payloads to domain snapshots, walks paginated collections,
// resolves ID-or-name lookups and hands back server-side actions for the
// caller to track.

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod list;
pub mod model;
pub mod paginate;
pub mod resolve;
pub mod resource;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::Client;
pub use config::ClientConfig;
pub use error::CoreError;
pub use list::{
    ActionListOpts, FirewallListOpts, ListOpts, ListQuery, PrimaryIpListOpts, VolumeListOpts,
};
pub use paginate::walk_pages;
pub use resolve::Identifier;
pub use resource::{
    ActionClient, FirewallClient, FirewallCreateOpts, FirewallCreateResult, FirewallSetRulesOpts,
    FirewallUpdateOpts, ManagedKind, PrimaryIpAssignOpts, PrimaryIpChangeDnsPtrOpts,
    PrimaryIpChangeProtectionOpts, PrimaryIpClient, PrimaryIpCreateOpts, PrimaryIpCreateResult,
    PrimaryIpUpdateOpts, ResourceClient, ResourceKind, VolumeAttachOpts,
    VolumeChangeProtectionOpts, VolumeClient, VolumeCreateOpts, VolumeCreateResult,
    VolumeUpdateOpts,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Action, ActionError, ActionStatus, Datacenter, Firewall, FirewallResource, FirewallRule,
    FirewallRuleDirection, FirewallRuleProtocol, Labels, Location, LocationRef, PrimaryIp,
    PrimaryIpType, Protection, Volume, VolumeFormat, VolumeStatus,
};

// Transport-level items for embedders wiring their own `Transport`.
pub use hcloud_api::{
    DEFAULT_ENDPOINT, Error as ApiError, ErrorCode, Request, Response, Transport,
};

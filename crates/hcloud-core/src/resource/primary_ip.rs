// ── Primary IP client ──

use std::net::IpAddr;

use hcloud_api::Response;
use hcloud_api::schema::primary_ip as wire;
use serde_json::Value;

use super::{ManagedKind, ResourceClient, ResourceKind};
use crate::error::CoreError;
use crate::list::PrimaryIpListOpts;
use crate::model::{Action, Labels, PrimaryIp, PrimaryIpType};

/// Only servers can hold a Primary IP today.
pub const ASSIGNEE_TYPE_SERVER: &str = "server";

/// Descriptor for `/primary_ips`.
#[derive(Debug, Clone, Copy)]
pub struct PrimaryIpKind;

pub type PrimaryIpClient = ResourceClient<PrimaryIpKind>;

/// Options for creating a Primary IP.
///
/// Exactly one of `assignee_id` and `datacenter` must be set: an assigned IP
/// lives where its server lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryIpCreateOpts {
    pub name: String,
    pub kind: PrimaryIpType,
    pub assignee_type: String,
    pub assignee_id: Option<i64>,
    pub labels: Option<Labels>,
    pub auto_delete: Option<bool>,
    pub datacenter: Option<String>,
}

impl PrimaryIpCreateOpts {
    pub fn new(name: impl Into<String>, kind: PrimaryIpType) -> Self {
        Self {
            name: name.into(),
            kind,
            assignee_type: ASSIGNEE_TYPE_SERVER.to_owned(),
            assignee_id: None,
            labels: None,
            auto_delete: None,
            datacenter: None,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.is_empty() {
            return Err(CoreError::validation("missing name"));
        }
        let has_datacenter = self.datacenter.as_deref().is_some_and(|dc| !dc.is_empty());
        if self.assignee_id.is_some() == has_datacenter {
            return Err(CoreError::validation(
                "exactly one of assignee_id or datacenter must be provided",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryIpCreateResult {
    pub primary_ip: PrimaryIp,
    pub action: Option<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryIpUpdateOpts {
    pub name: Option<String>,
    /// `Some(empty)` clears all labels; `None` leaves them as they are.
    pub labels: Option<Labels>,
    pub auto_delete: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryIpAssignOpts {
    pub assignee_id: i64,
    pub assignee_type: String,
}

impl PrimaryIpAssignOpts {
    pub fn server(assignee_id: i64) -> Self {
        Self {
            assignee_id,
            assignee_type: ASSIGNEE_TYPE_SERVER.to_owned(),
        }
    }
}

/// `dns_ptr: None` resets the pointer to the provider default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryIpChangeDnsPtrOpts {
    pub ip: IpAddr,
    pub dns_ptr: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimaryIpChangeProtectionOpts {
    pub delete: Option<bool>,
}

impl ResourceKind for PrimaryIpKind {
    type Wire = wire::PrimaryIp;
    type Entity = PrimaryIp;
    type ListOpts = PrimaryIpListOpts;

    const KIND: &'static str = "primary IP";
    const PATH: &'static str = "/primary_ips";
    const SINGULAR_KEY: &'static str = "primary_ip";
    const PLURAL_KEY: &'static str = "primary_ips";

    fn from_wire(wire: Self::Wire) -> Result<Self::Entity, CoreError> {
        PrimaryIp::try_from(wire)
    }

    fn id(entity: &Self::Entity) -> i64 {
        entity.id
    }
}

impl ManagedKind for PrimaryIpKind {
    type CreateOpts = PrimaryIpCreateOpts;
    type CreateRequest = wire::PrimaryIpCreateRequest;
    type CreateResponse = wire::PrimaryIpCreateResponse;
    type CreateResult = PrimaryIpCreateResult;
    type UpdateOpts = PrimaryIpUpdateOpts;
    type UpdateRequest = wire::PrimaryIpUpdateRequest;

    fn name_filter(name: &str) -> Self::ListOpts {
        PrimaryIpListOpts {
            name: Some(name.to_owned()),
            ..PrimaryIpListOpts::default()
        }
    }

    fn validate(opts: &Self::CreateOpts) -> Result<(), CoreError> {
        opts.validate()
    }

    fn create_request(opts: &Self::CreateOpts) -> Self::CreateRequest {
        opts.into()
    }

    fn create_result(response: Self::CreateResponse) -> Result<Self::CreateResult, CoreError> {
        Ok(PrimaryIpCreateResult {
            primary_ip: PrimaryIp::try_from(response.primary_ip)?,
            action: response.action.map(Action::try_from).transpose()?,
        })
    }

    fn update_request(opts: &Self::UpdateOpts) -> Self::UpdateRequest {
        opts.into()
    }
}

impl ResourceClient<PrimaryIpKind> {
    pub async fn assign(
        &self,
        primary_ip: &PrimaryIp,
        opts: &PrimaryIpAssignOpts,
    ) -> Result<(Action, Response), CoreError> {
        let body = wire::PrimaryIpActionAssignRequest {
            assignee_id: opts.assignee_id,
            assignee_type: opts.assignee_type.clone(),
        };
        self.post_action(primary_ip, "assign", Some(&body)).await
    }

    pub async fn unassign(&self, primary_ip: &PrimaryIp) -> Result<(Action, Response), CoreError> {
        self.post_action::<Value>(primary_ip, "unassign", None)
            .await
    }

    pub async fn change_dns_ptr(
        &self,
        primary_ip: &PrimaryIp,
        opts: &PrimaryIpChangeDnsPtrOpts,
    ) -> Result<(Action, Response), CoreError> {
        let body = wire::PrimaryIpActionChangeDnsPtrRequest {
            ip: opts.ip.to_string(),
            dns_ptr: opts.dns_ptr.clone(),
        };
        self.post_action(primary_ip, "change_dns_ptr", Some(&body))
            .await
    }

    pub async fn change_protection(
        &self,
        primary_ip: &PrimaryIp,
        opts: &PrimaryIpChangeProtectionOpts,
    ) -> Result<(Action, Response), CoreError> {
        let body = wire::PrimaryIpActionChangeProtectionRequest {
            delete: opts.delete,
        };
        self.post_action(primary_ip, "change_protection", Some(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(opts: &PrimaryIpCreateOpts) -> Option<String> {
        opts.validate().err().map(|e| e.to_string())
    }

    #[test]
    fn datacenter_placement_is_valid() {
        let opts = PrimaryIpCreateOpts {
            datacenter: Some("fsn1-dc14".into()),
            ..PrimaryIpCreateOpts::new("edge", PrimaryIpType::Ipv4)
        };
        assert!(opts.validate().is_ok());
        assert_eq!(opts.assignee_type, "server");
    }

    #[test]
    fn missing_name_wins() {
        let opts = PrimaryIpCreateOpts::new("", PrimaryIpType::Ipv6);
        assert_eq!(message(&opts).as_deref(), Some("missing name"));
    }

    #[test]
    fn assignee_and_datacenter_are_exclusive() {
        let neither = PrimaryIpCreateOpts::new("edge", PrimaryIpType::Ipv4);
        let both = PrimaryIpCreateOpts {
            assignee_id: Some(42),
            datacenter: Some("fsn1-dc14".into()),
            ..PrimaryIpCreateOpts::new("edge", PrimaryIpType::Ipv4)
        };
        let expected = Some("exactly one of assignee_id or datacenter must be provided");
        assert_eq!(message(&neither).as_deref(), expected);
        assert_eq!(message(&both).as_deref(), expected);
    }
}

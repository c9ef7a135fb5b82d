// ── Firewall client ──

use hcloud_api::Response;
use hcloud_api::schema::firewall as wire;

use super::{ManagedKind, ResourceClient, ResourceKind};
use crate::error::CoreError;
use crate::list::FirewallListOpts;
use crate::model::{Action, Firewall, FirewallResource, FirewallRule, Labels};

/// Descriptor for `/firewalls`.
#[derive(Debug, Clone, Copy)]
pub struct FirewallKind;

pub type FirewallClient = ResourceClient<FirewallKind>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirewallCreateOpts {
    pub name: String,
    pub labels: Option<Labels>,
    pub rules: Vec<FirewallRule>,
    pub apply_to: Vec<FirewallResource>,
}

impl FirewallCreateOpts {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.is_empty() {
            return Err(CoreError::validation("missing name"));
        }
        Ok(())
    }
}

/// The created firewall plus one action per applied resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirewallCreateResult {
    pub firewall: Firewall,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirewallUpdateOpts {
    pub name: Option<String>,
    /// `Some(empty)` clears all labels; `None` leaves them as they are.
    pub labels: Option<Labels>,
}

/// Replaces the full rule set. An empty list removes every rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirewallSetRulesOpts {
    pub rules: Vec<FirewallRule>,
}

impl ResourceKind for FirewallKind {
    type Wire = wire::Firewall;
    type Entity = Firewall;
    type ListOpts = FirewallListOpts;

    const KIND: &'static str = "firewall";
    const PATH: &'static str = "/firewalls";
    const SINGULAR_KEY: &'static str = "firewall";
    const PLURAL_KEY: &'static str = "firewalls";

    fn from_wire(wire: Self::Wire) -> Result<Self::Entity, CoreError> {
        Firewall::try_from(wire)
    }

    fn id(entity: &Self::Entity) -> i64 {
        entity.id
    }
}

impl ManagedKind for FirewallKind {
    type CreateOpts = FirewallCreateOpts;
    type CreateRequest = wire::FirewallCreateRequest;
    type CreateResponse = wire::FirewallCreateResponse;
    type CreateResult = FirewallCreateResult;
    type UpdateOpts = FirewallUpdateOpts;
    type UpdateRequest = wire::FirewallUpdateRequest;

    fn name_filter(name: &str) -> Self::ListOpts {
        FirewallListOpts {
            name: Some(name.to_owned()),
            ..FirewallListOpts::default()
        }
    }

    fn validate(opts: &Self::CreateOpts) -> Result<(), CoreError> {
        opts.validate()
    }

    fn create_request(opts: &Self::CreateOpts) -> Self::CreateRequest {
        opts.into()
    }

    fn create_result(response: Self::CreateResponse) -> Result<Self::CreateResult, CoreError> {
        Ok(FirewallCreateResult {
            firewall: Firewall::try_from(response.firewall)?,
            actions: response
                .actions
                .into_iter()
                .map(Action::try_from)
                .collect::<Result<_, _>>()?,
        })
    }

    fn update_request(opts: &Self::UpdateOpts) -> Self::UpdateRequest {
        opts.into()
    }
}

impl ResourceClient<FirewallKind> {
    /// Replace the firewall's rules.
    pub async fn set_rules(
        &self,
        firewall: &Firewall,
        opts: &FirewallSetRulesOpts,
    ) -> Result<(Vec<Action>, Response), CoreError> {
        let body = wire::FirewallActionSetRulesRequest {
            rules: opts.rules.iter().map(Into::into).collect(),
        };
        self.post_actions(firewall, "set_rules", &body).await
    }

    /// Apply the firewall to servers or label selectors.
    pub async fn apply_resources(
        &self,
        firewall: &Firewall,
        resources: &[FirewallResource],
    ) -> Result<(Vec<Action>, Response), CoreError> {
        let body = wire::FirewallActionApplyToResourcesRequest {
            apply_to: resources.iter().map(Into::into).collect(),
        };
        self.post_actions(firewall, "apply_to_resources", &body)
            .await
    }

    /// Detach the firewall from servers or label selectors.
    pub async fn remove_resources(
        &self,
        firewall: &Firewall,
        resources: &[FirewallResource],
    ) -> Result<(Vec<Action>, Response), CoreError> {
        let body = wire::FirewallActionRemoveFromResourcesRequest {
            remove_from: resources.iter().map(Into::into).collect(),
        };
        self.post_actions(firewall, "remove_from_resources", &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        let err = FirewallCreateOpts::default().validate().err();
        assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("missing name"));
    }

    #[test]
    fn name_filter_selects_exact_name() {
        let opts = FirewallKind::name_filter("web");
        assert_eq!(opts.name.as_deref(), Some("web"));
        assert!(opts.sort.is_empty());
    }
}

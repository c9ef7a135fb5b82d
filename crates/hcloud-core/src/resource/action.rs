// ── Action client ──
//
// Read-only access to `/actions`. Refreshing replaces a snapshot with a new
// one; waiting for completion is left to the caller.

use hcloud_api::Response;
use hcloud_api::schema::action as wire;

use super::{ResourceClient, ResourceKind};
use crate::error::CoreError;
use crate::list::ActionListOpts;
use crate::model::Action;

/// Descriptor for `/actions`.
#[derive(Debug, Clone, Copy)]
pub struct ActionKind;

pub type ActionClient = ResourceClient<ActionKind>;

impl ResourceKind for ActionKind {
    type Wire = wire::Action;
    type Entity = Action;
    type ListOpts = ActionListOpts;

    const KIND: &'static str = "action";
    const PATH: &'static str = "/actions";
    const SINGULAR_KEY: &'static str = "action";
    const PLURAL_KEY: &'static str = "actions";

    fn from_wire(wire: Self::Wire) -> Result<Self::Entity, CoreError> {
        Action::try_from(wire)
    }

    fn id(entity: &Self::Entity) -> i64 {
        entity.id
    }
}

impl ResourceClient<ActionKind> {
    /// Fetch a fresh snapshot of `action`.
    ///
    /// Unlike [`get_by_id`](Self::get_by_id), a vanished action is an error:
    /// the caller already held a handle to it.
    pub async fn refresh(&self, action: &Action) -> Result<(Action, Response), CoreError> {
        let request = hcloud_api::Request::get(Self::item_path(action.id));
        let response = self.client.execute(request).await?;
        let refreshed = Self::decode_entity(&response)?;
        Ok((refreshed, response))
    }
}

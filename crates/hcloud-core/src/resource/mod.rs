// ── Generic resource client ──
//
// One client type parameterized over a kind descriptor. The descriptor
// names the endpoint, the wire and domain types, and how create/update
// options are validated and encoded. Kind-specific action calls live as
// inherent impls in the per-kind modules.

pub mod action;
pub mod firewall;
pub mod primary_ip;
pub mod volume;

use std::marker::PhantomData;

use hcloud_api::schema::{ActionResponse, ActionsResponse};
use hcloud_api::{Method, Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::client::Client;
use crate::error::CoreError;
use crate::list::ListQuery;
use crate::model::Action;
use crate::paginate::walk_pages;
use crate::resolve::{Identifier, single_match};

pub use action::{ActionClient, ActionKind};
pub use firewall::{
    FirewallClient, FirewallCreateOpts, FirewallCreateResult, FirewallKind, FirewallSetRulesOpts,
    FirewallUpdateOpts,
};
pub use primary_ip::{
    PrimaryIpAssignOpts, PrimaryIpChangeDnsPtrOpts, PrimaryIpChangeProtectionOpts,
    PrimaryIpClient, PrimaryIpCreateOpts, PrimaryIpCreateResult, PrimaryIpKind,
    PrimaryIpUpdateOpts,
};
pub use volume::{
    VolumeAttachOpts, VolumeChangeProtectionOpts, VolumeClient, VolumeCreateOpts,
    VolumeCreateResult, VolumeKind, VolumeUpdateOpts,
};

/// Page size used by `all` / `all_with_opts` when none is given.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Describes a readable resource collection.
pub trait ResourceKind: Send + Sync + 'static {
    type Wire: DeserializeOwned;
    type Entity;
    type ListOpts: ListQuery;

    /// Human-readable singular, used in errors and logs.
    const KIND: &'static str;
    /// Collection path, e.g. `/volumes`.
    const PATH: &'static str;
    /// Body key of single-entity responses.
    const SINGULAR_KEY: &'static str;
    /// Body key of list responses.
    const PLURAL_KEY: &'static str;

    fn from_wire(wire: Self::Wire) -> Result<Self::Entity, CoreError>;

    fn id(entity: &Self::Entity) -> i64;
}

/// A named, user-managed resource: resolvable by name, creatable,
/// updatable and deletable.
pub trait ManagedKind: ResourceKind {
    type CreateOpts;
    type CreateRequest: Serialize;
    type CreateResponse: DeserializeOwned;
    type CreateResult;
    type UpdateOpts;
    type UpdateRequest: Serialize;

    /// List options selecting exactly `name`.
    fn name_filter(name: &str) -> Self::ListOpts;

    /// Local checks run before any request is built.
    fn validate(opts: &Self::CreateOpts) -> Result<(), CoreError>;

    fn create_request(opts: &Self::CreateOpts) -> Self::CreateRequest;

    fn create_result(response: Self::CreateResponse) -> Result<Self::CreateResult, CoreError>;

    /// Only fields set on `opts` may appear in the request.
    fn update_request(opts: &Self::UpdateOpts) -> Self::UpdateRequest;
}

/// Client for one resource kind.
pub struct ResourceClient<K> {
    client: Client,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for ResourceClient<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> std::fmt::Debug for ResourceClient<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("client", &self.client)
            .finish()
    }
}

impl<K: ResourceKind> ResourceClient<K> {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{id}", K::PATH)
    }

    fn action_path(id: i64, verb: &str) -> String {
        format!("{}/{id}/actions/{verb}", K::PATH)
    }

    /// Fetch by ID. A not-found answer yields `None`, not an error.
    pub async fn get_by_id(&self, id: i64) -> Result<(Option<K::Entity>, Response), CoreError> {
        match self.client.execute(Request::get(Self::item_path(id))).await {
            Ok(response) => {
                let entity = Self::decode_entity(&response)?;
                Ok((Some(entity), response))
            }
            Err(CoreError::Api(err)) if err.is_not_found() => {
                debug!(kind = K::KIND, id, "not found");
                Ok((None, not_found_response(&err)))
            }
            Err(err) => Err(err),
        }
    }

    /// Fetch exactly one page.
    pub async fn list(
        &self,
        opts: &K::ListOpts,
    ) -> Result<(Vec<K::Entity>, Response), CoreError> {
        let request = Request::get(K::PATH).with_query(opts.query());
        let response = self.client.execute(request).await?;
        let wire: Vec<K::Wire> = response.decode_field(K::PLURAL_KEY)?;
        let entities = wire
            .into_iter()
            .map(K::from_wire)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((entities, response))
    }

    /// Every entity, fetched [`DEFAULT_PER_PAGE`] at a time.
    pub async fn all(&self) -> Result<Vec<K::Entity>, CoreError> {
        self.all_with_opts(K::ListOpts::default()).await
    }

    /// Every entity matching `opts`. `page` is driven by the walker; an
    /// unset `per_page` defaults to [`DEFAULT_PER_PAGE`].
    pub async fn all_with_opts(
        &self,
        mut opts: K::ListOpts,
    ) -> Result<Vec<K::Entity>, CoreError> {
        let list = opts.list_opts_mut();
        if list.per_page.is_none_or(|n| n == 0) {
            list.per_page = Some(DEFAULT_PER_PAGE);
        }

        walk_pages(self.client.cancellation_token(), |page| {
            let mut page_opts = opts.clone();
            page_opts.list_opts_mut().page = Some(page);
            async move { self.list(&page_opts).await }
        })
        .await
    }

    fn decode_entity(response: &Response) -> Result<K::Entity, CoreError> {
        let wire: K::Wire = response.decode_field(K::SINGULAR_KEY)?;
        K::from_wire(wire)
    }

    /// POST to `/<kind>/<id>/actions/<verb>` and decode a single action.
    async fn post_action<B: Serialize>(
        &self,
        entity: &K::Entity,
        verb: &str,
        body: Option<&B>,
    ) -> Result<(Action, Response), CoreError> {
        let response = self.post_action_raw(entity, verb, body).await?;
        let ActionResponse { action } = response.decode()?;
        Ok((Action::try_from(action)?, response))
    }

    /// POST to `/<kind>/<id>/actions/<verb>` and decode a list of actions.
    async fn post_actions<B: Serialize>(
        &self,
        entity: &K::Entity,
        verb: &str,
        body: &B,
    ) -> Result<(Vec<Action>, Response), CoreError> {
        let response = self.post_action_raw(entity, verb, Some(body)).await?;
        let ActionsResponse { actions } = response.decode()?;
        let actions = actions
            .into_iter()
            .map(Action::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((actions, response))
    }

    async fn post_action_raw<B: Serialize>(
        &self,
        entity: &K::Entity,
        verb: &str,
        body: Option<&B>,
    ) -> Result<Response, CoreError> {
        let path = Self::action_path(K::id(entity), verb);
        let request = match body {
            Some(body) => Request::post(path, body)?,
            None => Request::new(Method::POST, path),
        };
        self.client.execute(request).await
    }
}

impl<K: ManagedKind> ResourceClient<K> {
    /// Exact-name lookup. No match yields `None`; several matches are an
    /// [`CoreError::AmbiguousName`] error.
    ///
    /// An empty name matches nothing and is answered without a request; the
    /// returned response is then [`Response::unsent`].
    pub async fn get_by_name(
        &self,
        name: &str,
    ) -> Result<(Option<K::Entity>, Response), CoreError> {
        if name.is_empty() {
            return Ok((None, Response::unsent()));
        }

        let (matches, response) = self.list(&K::name_filter(name)).await?;
        let entity = single_match(K::KIND, name, matches)?;
        Ok((entity, response))
    }

    /// Resolve an ID or a name.
    ///
    /// Numeric input is looked up by ID first; if no entity has that ID the
    /// input is retried as a name, so purely numeric names stay reachable.
    pub async fn get(
        &self,
        id_or_name: &str,
    ) -> Result<(Option<K::Entity>, Response), CoreError> {
        match Identifier::parse(id_or_name) {
            Identifier::Id(id) => {
                let (entity, response) = self.get_by_id(id).await?;
                if entity.is_some() {
                    return Ok((entity, response));
                }
                self.get_by_name(id_or_name).await
            }
            Identifier::Name(name) => self.get_by_name(name).await,
        }
    }

    /// Validate locally, then create.
    pub async fn create(
        &self,
        opts: &K::CreateOpts,
    ) -> Result<(K::CreateResult, Response), CoreError> {
        if let Err(err) = K::validate(opts) {
            debug!(kind = K::KIND, error = %err, "create options rejected");
            return Err(err);
        }

        let request = Request::post(K::PATH, &K::create_request(opts))?;
        let response = self.client.execute(request).await?;
        let body: K::CreateResponse = response.decode()?;
        Ok((K::create_result(body)?, response))
    }

    /// Partial update: unset options leave server state untouched.
    pub async fn update(
        &self,
        entity: &K::Entity,
        opts: &K::UpdateOpts,
    ) -> Result<(K::Entity, Response), CoreError> {
        let request = Request::put(Self::item_path(K::id(entity)), &K::update_request(opts))?;
        let response = self.client.execute(request).await?;
        let updated = Self::decode_entity(&response)?;
        Ok((updated, response))
    }

    /// Delete the entity. A missing entity surfaces the server's not-found
    /// error.
    pub async fn delete(&self, entity: &K::Entity) -> Result<Response, CoreError> {
        self.client
            .execute(Request::delete(Self::item_path(K::id(entity))))
            .await
    }
}

/// Stand-in response for a suppressed not-found, carrying the error envelope.
fn not_found_response(err: &hcloud_api::Error) -> Response {
    match err {
        hcloud_api::Error::Api {
            status,
            code,
            message,
            details,
        } => Response::new(
            *status,
            json!({ "error": { "code": code.as_str(), "message": message, "details": details } }),
        ),
        other => Response::new(
            404,
            json!({ "error": { "code": "not_found", "message": other.to_string() } }),
        ),
    }
}

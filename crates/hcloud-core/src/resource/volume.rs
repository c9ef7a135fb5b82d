// ── Volume client ──

use hcloud_api::Response;
use hcloud_api::schema::volume as wire;

use super::{ManagedKind, ResourceClient, ResourceKind};
use crate::error::CoreError;
use crate::list::VolumeListOpts;
use crate::model::{Action, Labels, LocationRef, Volume, VolumeFormat};

/// Descriptor for `/volumes`.
#[derive(Debug, Clone, Copy)]
pub struct VolumeKind;

pub type VolumeClient = ResourceClient<VolumeKind>;

/// Options for creating a volume.
///
/// Exactly one of `server` and `location` must be set. `automount` needs a
/// `server`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeCreateOpts {
    pub name: String,
    /// Size in GB.
    pub size: u32,
    pub server: Option<i64>,
    pub location: Option<LocationRef>,
    pub labels: Option<Labels>,
    pub automount: Option<bool>,
    pub format: Option<VolumeFormat>,
}

impl VolumeCreateOpts {
    /// Rules are checked in order and the first failure wins: name, size,
    /// placement, automount.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.is_empty() {
            return Err(CoreError::validation("missing name"));
        }
        if self.size == 0 {
            return Err(CoreError::validation("size must be greater than 0"));
        }
        if self.server.is_some() == self.location.is_some() {
            return Err(CoreError::validation(
                "exactly one of server or location must be provided",
            ));
        }
        if self.server.is_none() && self.automount == Some(true) {
            return Err(CoreError::validation(
                "server must be provided when automount is true",
            ));
        }
        Ok(())
    }
}

/// The created volume, the creation action (absent without a server) and
/// any follow-up actions such as attach.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeCreateResult {
    pub volume: Volume,
    pub action: Option<Action>,
    pub next_actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeUpdateOpts {
    pub name: Option<String>,
    /// `Some(empty)` clears all labels; `None` leaves them as they are.
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeAttachOpts {
    pub server: i64,
    pub automount: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolumeChangeProtectionOpts {
    pub delete: Option<bool>,
}

impl ResourceKind for VolumeKind {
    type Wire = wire::Volume;
    type Entity = Volume;
    type ListOpts = VolumeListOpts;

    const KIND: &'static str = "volume";
    const PATH: &'static str = "/volumes";
    const SINGULAR_KEY: &'static str = "volume";
    const PLURAL_KEY: &'static str = "volumes";

    fn from_wire(wire: Self::Wire) -> Result<Self::Entity, CoreError> {
        Volume::try_from(wire)
    }

    fn id(entity: &Self::Entity) -> i64 {
        entity.id
    }
}

impl ManagedKind for VolumeKind {
    type CreateOpts = VolumeCreateOpts;
    type CreateRequest = wire::VolumeCreateRequest;
    type CreateResponse = wire::VolumeCreateResponse;
    type CreateResult = VolumeCreateResult;
    type UpdateOpts = VolumeUpdateOpts;
    type UpdateRequest = wire::VolumeUpdateRequest;

    fn name_filter(name: &str) -> Self::ListOpts {
        VolumeListOpts {
            name: Some(name.to_owned()),
            ..VolumeListOpts::default()
        }
    }

    fn validate(opts: &Self::CreateOpts) -> Result<(), CoreError> {
        opts.validate()
    }

    fn create_request(opts: &Self::CreateOpts) -> Self::CreateRequest {
        opts.into()
    }

    fn create_result(response: Self::CreateResponse) -> Result<Self::CreateResult, CoreError> {
        Ok(VolumeCreateResult {
            volume: Volume::try_from(response.volume)?,
            action: response.action.map(Action::try_from).transpose()?,
            next_actions: response
                .next_actions
                .into_iter()
                .map(Action::try_from)
                .collect::<Result<_, _>>()?,
        })
    }

    fn update_request(opts: &Self::UpdateOpts) -> Self::UpdateRequest {
        opts.into()
    }
}

impl ResourceClient<VolumeKind> {
    /// Attach to `server` without touching automount.
    pub async fn attach(
        &self,
        volume: &Volume,
        server: i64,
    ) -> Result<(Action, Response), CoreError> {
        self.attach_with_opts(
            volume,
            &VolumeAttachOpts {
                server,
                automount: None,
            },
        )
        .await
    }

    pub async fn attach_with_opts(
        &self,
        volume: &Volume,
        opts: &VolumeAttachOpts,
    ) -> Result<(Action, Response), CoreError> {
        let body = wire::VolumeActionAttachVolumeRequest {
            server: opts.server,
            automount: opts.automount,
        };
        self.post_action(volume, "attach", Some(&body)).await
    }

    pub async fn detach(&self, volume: &Volume) -> Result<(Action, Response), CoreError> {
        let body = wire::VolumeActionDetachVolumeRequest::default();
        self.post_action(volume, "detach", Some(&body)).await
    }

    /// Grow the volume to `size` GB. Volumes cannot shrink; the server
    /// rejects smaller sizes.
    pub async fn resize(
        &self,
        volume: &Volume,
        size: u32,
    ) -> Result<(Action, Response), CoreError> {
        let body = wire::VolumeActionResizeVolumeRequest { size };
        self.post_action(volume, "resize", Some(&body)).await
    }

    pub async fn change_protection(
        &self,
        volume: &Volume,
        opts: &VolumeChangeProtectionOpts,
    ) -> Result<(Action, Response), CoreError> {
        let body = wire::VolumeActionChangeProtectionRequest {
            delete: opts.delete,
        };
        self.post_action(volume, "change_protection", Some(&body)).await
    }
}

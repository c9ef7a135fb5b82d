// ── Root client ──
//
// Owns the transport and the cancellation context that every request runs
// under. Resource clients are cheap views over a cloned `Client`.

use std::fmt;
use std::sync::Arc;

use hcloud_api::{HttpTransport, Request, Response, Transport};
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::resource::{ActionClient, FirewallClient, PrimaryIpClient, VolumeClient};

/// Entry point for talking to the API.
///
/// Cloning is cheap and shares the transport. Requests race the bound
/// [`CancellationToken`]; once it fires every in-flight and future call
/// fails with [`CoreError::Cancelled`].
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
}

impl Client {
    /// Wrap any [`Transport`] implementation.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            cancel: CancellationToken::new(),
        }
    }

    /// Build an [`HttpTransport`] from runtime configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CoreError> {
        let transport = HttpTransport::new(&config.transport_config())?;
        Ok(Self::new(transport))
    }

    /// A client sharing this transport but bound to `cancel`.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cancel,
        }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn firewalls(&self) -> FirewallClient {
        FirewallClient::new(self.clone())
    }

    pub fn volumes(&self) -> VolumeClient {
        VolumeClient::new(self.clone())
    }

    pub fn primary_ips(&self) -> PrimaryIpClient {
        PrimaryIpClient::new(self.clone())
    }

    pub fn actions(&self) -> ActionClient {
        ActionClient::new(self.clone())
    }

    /// Run one request under the cancellation context.
    pub(crate) async fn execute(&self, request: Request) -> Result<Response, CoreError> {
        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            result = self.transport.request(request) => result.map_err(CoreError::from),
        }
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

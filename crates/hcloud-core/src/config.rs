// ── Runtime client configuration ──
//
// Describes how to reach the API. Never touches disk: the CLI (through
// hcloud-config) builds a `ClientConfig` and hands it in.

use std::time::Duration;

use hcloud_api::{DEFAULT_ENDPOINT, TransportConfig};
use secrecy::SecretString;
use url::Url;

use crate::error::CoreError;

/// Connection settings for a single API project.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL including the version prefix.
    pub endpoint: Url,
    /// Project API token.
    pub token: SecretString,
    /// Per-request timeout, enforced by the transport.
    pub timeout: Duration,
    /// Prepended to the library's own user agent.
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Public endpoint and a 30 second timeout.
    pub fn new(token: SecretString) -> Result<Self, CoreError> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).map_err(hcloud_api::Error::from)?;
        Ok(Self {
            endpoint,
            token,
            timeout: Duration::from_secs(30),
            user_agent: None,
        })
    }

    pub(crate) fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
            timeout: self.timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}

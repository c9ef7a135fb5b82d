// Transport seam between the resource clients and the network.
//
// `Transport` performs exactly one named request and hands back the decoded
// JSON body or a structured error. `HttpTransport` is the reqwest-backed
// implementation; tests and embedders can substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, ErrorCode};
use crate::schema::{ErrorResponse, Meta};

/// Public API endpoint, including the version prefix.
pub const DEFAULT_ENDPOINT: &str = "https://api.hetzner.cloud/v1";

const USER_AGENT: &str = concat!("hcloud-rs/", env!("CARGO_PKG_VERSION"));

// ── Request / Response ──────────────────────────────────────────────

/// A single API call: method, endpoint-relative path, query pairs and body.
///
/// Query pairs keep insertion order and may repeat a key (`status`, `sort`).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, Error> {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, Error> {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn with_body<B: Serialize>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_query<K, V, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

/// A successful API response: HTTP status plus the decoded JSON body.
///
/// Bodies of `204 No Content` responses decode to `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Stand-in for a call answered locally without reaching the server.
    ///
    /// Carries status `0` and a `null` body so it cannot pass for a real
    /// HTTP response.
    pub fn unsent() -> Self {
        Self::new(0, Value::Null)
    }

    /// `false` for [`Response::unsent`] stand-ins.
    pub fn was_sent(&self) -> bool {
        self.status != 0
    }

    /// The `meta` block of list responses.
    ///
    /// `Ok(None)` only when the body carries no `meta` at all; a `meta`
    /// block that does not decode is an error.
    pub fn meta(&self) -> Result<Option<Meta>, Error> {
        match self.body.get("meta") {
            None | Some(Value::Null) => Ok(None),
            Some(meta) => Meta::deserialize(meta)
                .map(Some)
                .map_err(|e| deserialization_error(&e, &self.body)),
        }
    }

    /// Decode the whole body into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        T::deserialize(&self.body).map_err(|e| deserialization_error(&e, &self.body))
    }

    /// Decode the object stored under `key` (e.g. `"firewall"`).
    pub fn decode_field<T: DeserializeOwned>(&self, key: &str) -> Result<T, Error> {
        let value = self.body.get(key).ok_or_else(|| Error::Deserialization {
            message: format!("missing field `{key}` in response body"),
            body: self.body.to_string(),
        })?;
        T::deserialize(value).map_err(|e| deserialization_error(&e, &self.body))
    }
}

fn deserialization_error(err: &serde_json::Error, body: &Value) -> Error {
    let body = body.to_string();
    let preview: String = body.chars().take(200).collect();
    Error::Deserialization {
        message: format!("{err} (body preview: {preview:?})"),
        body,
    }
}

// ── Transport trait ─────────────────────────────────────────────────

/// Performs one request against the API.
///
/// Implementations own authentication, TLS and timeouts. They must not
/// retry on their own behalf unless the embedder asked for it; the resource
/// clients above never do.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: Request) -> Result<Response, Error>;
}

// ── Configuration ───────────────────────────────────────────────────

/// Settings for building an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub endpoint: Url,
    pub token: SecretString,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl TransportConfig {
    pub fn new(token: SecretString) -> Result<Self, Error> {
        Ok(Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
            token,
            timeout: Duration::from_secs(30),
            user_agent: None,
        })
    }

    /// Build a `reqwest::Client` that sends the bearer token on every request.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
            .map_err(|e| Error::InvalidToken(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let user_agent = self
            .user_agent
            .as_ref()
            .map_or_else(|| USER_AGENT.to_owned(), |ua| format!("{ua} {USER_AGENT}"));

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}

// ── HTTP transport ──────────────────────────────────────────────────

/// reqwest-backed [`Transport`].
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url: config.endpoint.clone(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append an endpoint-relative path (`/firewalls/1`) to the base URL,
    /// keeping any version prefix the base carries.
    fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }

    async fn handle_response(resp: reqwest::Response) -> Result<Response, Error> {
        let status = resp.status();
        let raw = resp.text().await?;

        if !status.is_success() {
            return Err(parse_error(status, &raw));
        }

        let body = if raw.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&raw).map_err(|e| {
                let preview: String = raw.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: raw.clone(),
                }
            })?
        };

        Ok(Response::new(status.as_u16(), body))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: Request) -> Result<Response, Error> {
        let url = self.url(&request.path);
        debug!(method = %request.method, %url, query = ?request.query, "sending request");

        let mut builder = self.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            trace!(%body, "request body");
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        Self::handle_response(resp).await
    }
}

/// Map a non-2xx response into [`Error::Api`], preferring the server's
/// error envelope and falling back to a code derived from the status.
fn parse_error(status: reqwest::StatusCode, raw: &str) -> Error {
    if let Ok(envelope) = serde_json::from_str::<ErrorResponse>(raw) {
        return Error::Api {
            status: status.as_u16(),
            code: ErrorCode::from_wire(&envelope.error.code),
            message: envelope.error.message,
            details: envelope.error.details,
        };
    }

    let code = match status.as_u16() {
        401 => ErrorCode::Unauthorized,
        403 => ErrorCode::Forbidden,
        404 => ErrorCode::NotFound,
        409 => ErrorCode::Conflict,
        423 => ErrorCode::Locked,
        429 => ErrorCode::RateLimitExceeded,
        500..=599 => ErrorCode::ServerError,
        other => ErrorCode::Other(format!("http_{other}")),
    };

    Error::Api {
        status: status.as_u16(),
        code,
        message: if raw.is_empty() {
            status.to_string()
        } else {
            raw.to_owned()
        },
        details: None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn url_keeps_version_prefix() {
        let transport =
            HttpTransport::from_reqwest("https://api.example.com/v1/", reqwest::Client::new())
                .unwrap();
        assert_eq!(
            transport.url("/firewalls/42").as_str(),
            "https://api.example.com/v1/firewalls/42"
        );
    }

    #[test]
    fn request_builders_encode_body_and_query() {
        let req = Request::post("/volumes", &json!({ "name": "data" }))
            .unwrap()
            .with_query([("page", "1")]);
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body, Some(json!({ "name": "data" })));
        assert_eq!(req.query, vec![("page".to_owned(), "1".to_owned())]);
    }

    #[test]
    fn decode_field_reports_missing_key() {
        let resp = Response::new(200, json!({ "volume": { "id": 1 } }));
        let err = resp.decode_field::<Value>("firewall").unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }

    #[test]
    fn meta_absent_on_single_resource_bodies() {
        let resp = Response::new(200, json!({ "firewall": {} }));
        assert_eq!(resp.meta().unwrap(), None);
    }

    #[test]
    fn unsent_response_is_distinguishable() {
        let resp = Response::unsent();
        assert!(!resp.was_sent());
        assert_eq!(resp.body, Value::Null);
        assert!(Response::new(404, Value::Null).was_sent());
    }

    #[test]
    fn malformed_meta_is_an_error() {
        let resp = Response::new(
            200,
            json!({ "meta": { "pagination": { "page": 1, "next_page": 2 } } }),
        );
        assert!(matches!(resp.meta(), Err(Error::Deserialization { .. })));
    }

    #[test]
    fn enveloped_errors_keep_code_and_message() {
        let raw = r#"{"error":{"code":"uniqueness_error","message":"name is already used"}}"#;
        let err = parse_error(reqwest::StatusCode::CONFLICT, raw);
        match err {
            Error::Api {
                status,
                code,
                message,
                ..
            } => {
                assert_eq!(status, 409);
                assert_eq!(code, ErrorCode::UniquenessError);
                assert_eq!(message, "name is already used");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bare_404_maps_to_not_found() {
        let err = parse_error(reqwest::StatusCode::NOT_FOUND, "");
        assert!(err.is_not_found());
    }
}

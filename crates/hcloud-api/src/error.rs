use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Machine-readable error code from the API error envelope.
///
/// Unknown codes are preserved verbatim in [`ErrorCode::Other`] so callers
/// can still branch on them.
#[derive(Debug, Clone, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    InvalidInput,
    JsonError,
    Forbidden,
    Unauthorized,
    Locked,
    Conflict,
    UniquenessError,
    Protected,
    Maintenance,
    RateLimitExceeded,
    ResourceLimitExceeded,
    ResourceUnavailable,
    ServiceError,
    ServerError,
    Timeout,
    #[strum(default)]
    Other(String),
}

impl ErrorCode {
    /// Parse a wire code, keeping unrecognized values.
    pub fn from_wire(raw: &str) -> Self {
        Self::from_str(raw).unwrap_or_else(|_| Self::Other(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::JsonError => "json_error",
            Self::Forbidden => "forbidden",
            Self::Unauthorized => "unauthorized",
            Self::Locked => "locked",
            Self::Conflict => "conflict",
            Self::UniquenessError => "uniqueness_error",
            Self::Protected => "protected",
            Self::Maintenance => "maintenance",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::ResourceLimitExceeded => "resource_limit_exceeded",
            Self::ResourceUnavailable => "resource_unavailable",
            Self::ServiceError => "service_error",
            Self::ServerError => "server_error",
            Self::Timeout => "timeout",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error type for the `hcloud-api` crate.
///
/// Covers transport failures, non-2xx API responses and payload decoding.
/// `hcloud-core` wraps these without rewriting them.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The bearer token could not be encoded as a header value.
    #[error("Invalid API token: {0}")]
    InvalidToken(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Structured error from the `{"error": {...}}` envelope.
    #[error("API error (HTTP {status}, {code}): {message}")]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
        details: Option<serde_json::Value>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { code, .. } => *code == ErrorCode::NotFound,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Extract the API error code, if available.
    pub fn api_code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// HTTP status attached to the failure, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for failures where a later attempt could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { code, .. } => matches!(
                code,
                ErrorCode::RateLimitExceeded
                    | ErrorCode::Locked
                    | ErrorCode::Conflict
                    | ErrorCode::Timeout
                    | ErrorCode::Maintenance
            ),
            _ => false,
        }
    }
}

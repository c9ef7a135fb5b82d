// ── Core error types ──
//
// Local failures (validation, malformed data, ambiguity, cancellation) get
// their own variants. Transport-layer errors pass through untouched so
// callers can still branch on the API error code.

use hcloud_api::ErrorCode;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Local, pre-network ───────────────────────────────────────────
    /// Create/update options rejected before any request was issued.
    #[error("{message}")]
    Validation { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    /// A wire value could not be represented in the domain model.
    #[error("malformed {field}: {reason}")]
    MalformedData { field: String, reason: String },

    /// A name lookup returned more than one entity.
    #[error("{matches} {kind}s share the name {name:?}")]
    AmbiguousName {
        kind: &'static str,
        name: String,
        matches: usize,
    },

    // ── Execution ────────────────────────────────────────────────────
    #[error("operation cancelled")]
    Cancelled,

    // ── Transport (passed through) ───────────────────────────────────
    #[error(transparent)]
    Api(#[from] hcloud_api::Error),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedData {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_not_found())
    }

    /// The API error code, when the failure came from the server.
    pub fn api_code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Api(e) => e.api_code(),
            _ => None,
        }
    }
}

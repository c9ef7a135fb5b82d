//! Wire-level access to the Hetzner Cloud API.
//!
//! - [`schema`] mirrors the JSON request and response payloads.
//! - [`Transport`] is the single-request seam the resource clients in
//!   `hcloud-core` drive; [`HttpTransport`] implements it over reqwest.
//! - [`Error`] carries the server's machine-readable [`ErrorCode`].

pub mod error;
pub mod schema;
pub mod transport;

pub use error::{Error, ErrorCode};
pub use transport::{
    DEFAULT_ENDPOINT, HttpTransport, Request, Response, Transport, TransportConfig,
};

pub use reqwest::Method;

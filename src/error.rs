//! Error types for the Graph API client.
//!
//! Every fallible operation in this crate returns [`Error`]. Failures the
//! remote service reports in a structured way are surfaced as typed values
//! ([`GraphError`], [`FqlError`]) so callers can branch on codes with a plain
//! `match` instead of inspecting strings.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A specialized `Result` type for Graph API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Graph API and FQL operations.
///
/// Nothing in this crate retries on its own; recovery policy is left to the
/// caller, who can use the predicates below to decide.
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON shape expected
    #[error("could not decode response into {target}: {message}")]
    Decode {
        /// Name of the type the body was decoded into
        target: &'static str,
        /// Parser message
        message: String,
        /// Raw response body, lossily converted to UTF-8
        body: String,
    },

    /// The Graph API answered with a non-200 status and an error payload
    #[error("{0}")]
    Graph(GraphError),

    /// The FQL endpoint answered with an error payload
    #[error("{0}")]
    Fql(FqlError),

    /// An FQL template and its arguments do not line up
    #[error("FQL template mismatch: {0}")]
    TemplateMismatch(String),

    /// No usable access token, or a token exchange failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A configured base URL could not be parsed
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// Returns `true` for network-level failures (connection refused,
    /// timeout, truncated body).
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Returns `true` if the remote service reported the failure itself.
    pub fn is_remote_error(&self) -> bool {
        matches!(self, Error::Graph(_) | Error::Fql(_))
    }

    /// Returns `true` if this error was caused by the caller rather than the
    /// network or the server.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Graph(e) => (400..500).contains(&e.http_status),
            Error::TemplateMismatch(_) | Error::InvalidInput(_) | Error::UrlParse(_) => true,
            _ => false,
        }
    }

    /// The remote error code, for Graph and FQL errors.
    ///
    /// # Example
    ///
    /// ```
    /// use facebook_rs::{Error, GraphError};
    ///
    /// let err = Error::Graph(GraphError {
    ///     code: 803,
    ///     message: "Some of the aliases you requested do not exist".into(),
    ///     ..Default::default()
    /// });
    /// assert_eq!(err.remote_code(), Some(803));
    /// ```
    pub fn remote_code(&self) -> Option<i64> {
        match self {
            Error::Graph(e) => Some(e.code),
            Error::Fql(e) => Some(e.code),
            _ => None,
        }
    }

    /// Build a decode error naming the target type.
    pub(crate) fn decode<T: ?Sized>(err: impl fmt::Display, body: &[u8]) -> Self {
        Error::Decode {
            target: std::any::type_name::<T>(),
            message: err.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Build an error from a non-200 Graph response.
    ///
    /// A body that does not carry the `{"error": {...}}` envelope becomes a
    /// [`Error::Decode`] naming [`GraphError`].
    pub(crate) fn from_graph_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<GraphErrorEnvelope>(body) {
            Ok(envelope) => {
                let mut error = envelope.error;
                error.http_status = status;
                Error::Graph(error)
            }
            Err(e) => Error::decode::<GraphError>(e, body),
        }
    }
}

/// A structured error returned by the Graph API.
///
/// See <https://developers.facebook.com/docs/graph-api/using-graph-api/error-handling>.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphError {
    /// Error code, e.g. `803` for an unknown alias
    #[serde(default)]
    pub code: i64,
    /// Finer-grained error code
    #[serde(default, rename = "error_subcode")]
    pub subcode: i64,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Error category, e.g. `OAuthException`
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Trace id to quote to Facebook support
    #[serde(default)]
    pub fbtrace_id: Option<String>,
    /// HTTP status of the response that carried this error
    #[serde(default, skip_deserializing)]
    pub http_status: u16,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph error {}", self.code)?;
        if self.subcode != 0 {
            write!(f, " (subcode {})", self.subcode)?;
        }
        if !self.kind.is_empty() {
            write!(f, " [{}]", self.kind)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for GraphError {}

#[derive(Deserialize)]
struct GraphErrorEnvelope {
    error: GraphError,
}

/// A structured error returned by the FQL endpoint.
///
/// The FQL endpoint uses a flat error schema distinct from the Graph API's.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FqlError {
    /// Error message
    #[serde(default, rename = "error_msg")]
    pub message: String,
    /// Error code; required, so an object without one is not taken for an
    /// FQL error
    #[serde(rename = "error_code")]
    pub code: i64,
    /// The query that failed, as echoed by the server
    #[serde(default)]
    pub query: String,
    /// The access token the query ran with, as echoed by the server
    #[serde(default)]
    pub access_token: String,
}

impl fmt::Display for FqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FQL error {}: {}", self.code, self.message)
    }
}

impl fmt::Debug for FqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FqlError")
            .field("message", &self.message)
            .field("code", &self.code)
            .field("query", &self.query)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl std::error::Error for FqlError {}

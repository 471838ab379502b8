//! Client configuration options.

use std::time::Duration;

use crate::GraphApiVersion;

/// Default Graph API host.
pub const GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Default FQL endpoint.
pub const FQL_ENDPOINT: &str = "https://api.facebook.com/method/fql.query";

/// Default number of array elements substituted into one FQL query before
/// the query is split.
pub const DEFAULT_FQL_MAX_BATCH_SIZE: usize = 1;

/// Configuration for the Graph API client.
///
/// # Example
///
/// ```
/// use facebook_rs::{ClientConfig, GraphApiVersion};
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_default_version(GraphApiVersion::latest())
///     .with_fql_max_batch_size(50);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Version used by requests that don't set one; `None` is unversioned
    pub default_version: Option<GraphApiVersion>,
    /// Scheme and host of the Graph API
    pub graph_base_url: String,
    /// Full URL of the FQL endpoint
    pub fql_endpoint: String,
    /// Default FQL batch size; `0` disables splitting
    pub fql_max_batch_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("facebook-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
            default_version: None,
            graph_base_url: GRAPH_BASE_URL.to_string(),
            fql_endpoint: FQL_ENDPOINT.to_string(),
            fql_max_batch_size: DEFAULT_FQL_MAX_BATCH_SIZE,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Pin requests to a Graph API version.
    pub fn with_default_version(mut self, version: GraphApiVersion) -> Self {
        self.default_version = Some(version);
        self
    }

    /// Point the client at a different Graph host.
    pub fn with_graph_base_url(mut self, url: impl Into<String>) -> Self {
        self.graph_base_url = url.into();
        self
    }

    /// Point the client at a different FQL endpoint.
    pub fn with_fql_endpoint(mut self, url: impl Into<String>) -> Self {
        self.fql_endpoint = url.into();
        self
    }

    /// Set the default FQL batch size.
    pub fn with_fql_max_batch_size(mut self, size: usize) -> Self {
        self.fql_max_batch_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.graph_base_url, "https://graph.facebook.com");
        assert!(config.default_version.is_none());
        assert_eq!(config.fql_max_batch_size, 1);
        assert!(config.user_agent.starts_with("facebook-rs/"));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_default_version(GraphApiVersion::new("v2.5").unwrap())
            .with_graph_base_url("http://127.0.0.1:8080")
            .with_fql_max_batch_size(0);

        assert_eq!(config.default_version.unwrap().as_str(), "v2.5");
        assert_eq!(config.graph_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.fql_max_batch_size, 0);
    }
}

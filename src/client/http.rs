//! HTTP client implementation for the Graph API.

use parking_lot::RwLock;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::api::{PagesService, UsersService};
use crate::auth::{AccessToken, TokenInfo};
use crate::fql::FqlService;
use crate::{Error, GraphQuery, HttpMethod, Result};

use super::config::ClientConfig;
use super::request::GraphRequest;

/// The main client for interacting with the Graph API.
///
/// The client holds the app credentials and the working access token, and
/// hands out requests and services that share its connection pool. Cloning
/// is cheap; clones share the same token.
///
/// # Example
///
/// ```no_run
/// use facebook_rs::GraphClient;
///
/// # async fn example() -> facebook_rs::Result<()> {
/// let client = GraphClient::new("app-id", "app-secret")?;
///
/// // Authenticate as the app itself
/// let token = client.app_access_token().await?;
/// client.set_access_token(token).await?;
///
/// let page = client.pages().get("starbucks").await?;
/// println!("{} has {:?} likes", page.name, page.likes);
/// # Ok(())
/// # }
/// ```
pub struct GraphClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
    pub(crate) app_id: String,
    pub(crate) app_secret: SecretString,
    pub(crate) access_token: RwLock<AccessToken>,
}

impl GraphClient {
    /// Create a client for the given app with the default configuration.
    ///
    /// Pass empty strings if you only need public requests or will set an
    /// arbitrary access token.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Result<Self> {
        Self::with_config(app_id, app_secret, ClientConfig::default())
    }

    /// Create a client with no app credentials.
    pub fn blank() -> Result<Self> {
        Self::new("", "")
    }

    /// Create a client with a custom configuration.
    pub fn with_config(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        // Reject unusable base URLs up front rather than on the first request.
        url::Url::parse(&config.graph_base_url)?;
        url::Url::parse(&config.fql_endpoint)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                app_id: app_id.into(),
                app_secret: SecretString::from(app_secret.into()),
                access_token: RwLock::new(AccessToken::default()),
            }),
        })
    }

    /// Build a request with the given method, path and query parameters.
    ///
    /// The held access token is attached as `access_token` unless `query`
    /// already carries one. The response is expected to be JSON.
    pub fn request(
        &self,
        method: HttpMethod,
        path: impl Into<String>,
        query: impl Into<Option<GraphQuery>>,
    ) -> GraphRequest {
        GraphRequest::new(
            self.inner.clone(),
            method,
            path.into(),
            query.into().unwrap_or_default(),
        )
    }

    /// Shorthand for a `GET` [`request`](Self::request).
    pub fn get(&self, path: impl Into<String>, query: impl Into<Option<GraphQuery>>) -> GraphRequest {
        self.request(HttpMethod::Get, path, query)
    }

    /// Shorthand for a `POST` [`request`](Self::request).
    pub fn post(&self, path: impl Into<String>, query: impl Into<Option<GraphQuery>>) -> GraphRequest {
        self.request(HttpMethod::Post, path, query)
    }

    /// Shorthand for a `PUT` [`request`](Self::request).
    pub fn put(&self, path: impl Into<String>, query: impl Into<Option<GraphQuery>>) -> GraphRequest {
        self.request(HttpMethod::Put, path, query)
    }

    /// Shorthand for a `DELETE` [`request`](Self::request).
    pub fn delete(&self, path: impl Into<String>, query: impl Into<Option<GraphQuery>>) -> GraphRequest {
        self.request(HttpMethod::Delete, path, query)
    }

    /// Get the pages service.
    pub fn pages(&self) -> PagesService {
        PagesService::new(self.inner.clone())
    }

    /// Get the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.inner.clone())
    }

    /// Get the FQL service.
    pub fn fql(&self) -> FqlService {
        FqlService::new(self.inner.clone())
    }

    /// A snapshot of the working access token.
    pub fn access_token(&self) -> AccessToken {
        self.inner.access_token.read().clone()
    }

    /// Replace the working access token and validate it immediately.
    ///
    /// The new token is stored before introspection runs, so it is used
    /// by later requests even if this returns an error; in that case its
    /// validity stays unknown (`is_valid() == false`).
    pub async fn set_access_token(&self, token: impl Into<String>) -> Result<()> {
        *self.inner.access_token.write() = AccessToken::new(token);
        self.lint_access_token().await
    }

    /// Refresh the validity, expiry and permissions of the working token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] without any network call if no
    /// token is set. Transport, decoding and Graph errors leave the cached
    /// state untouched.
    pub async fn lint_access_token(&self) -> Result<()> {
        let current = self.access_token();
        if current.is_empty() {
            return Err(Error::Authentication("access token not set".to_string()));
        }

        let info = self.inner.debug_token(current.expose_secret()).await?;

        let mut held = self.inner.access_token.write();
        // The token may have been replaced while introspection was in flight.
        if held.expose_secret() == current.expose_secret() {
            held.apply_introspection(&info);
        }
        Ok(())
    }

    /// Inspect an arbitrary token with the app's credentials.
    pub async fn debug_token(&self, input_token: &str) -> Result<TokenInfo> {
        self.inner.debug_token(input_token).await
    }

    /// Exchange the app ID and secret for an app access token.
    pub async fn app_access_token(&self) -> Result<String> {
        self.inner.app_access_token().await
    }

    /// The app ID the client was created with.
    pub fn app_id(&self) -> &str {
        &self.inner.app_id
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// The `app_id|app_secret` pair the Graph API accepts as an app token.
    pub(crate) fn app_token(&self) -> String {
        format!("{}|{}", self.app_id, self.app_secret.expose_secret())
    }
}

impl Clone for GraphClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient")
            .field("app_id", &self.inner.app_id)
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let client = GraphClient::new("1474599152759129", "app-secret-value").unwrap();
        let debug = format!("{:?}", client);

        assert!(debug.contains("1474599152759129"));
        assert!(!debug.contains("app-secret-value"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ClientConfig::default().with_graph_base_url("not a url");
        let result = GraphClient::with_config("", "", config);
        assert!(matches!(result, Err(Error::UrlParse(_))));
    }

    #[test]
    fn test_app_token_pair() {
        let client = GraphClient::new("123", "abc").unwrap();
        assert_eq!(client.inner.app_token(), "123|abc");
    }

    #[test]
    fn test_blank_client_has_no_token() {
        let client = GraphClient::blank().unwrap();
        assert!(client.access_token().is_empty());
        assert_eq!(client.app_id(), "");
    }
}

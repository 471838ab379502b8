//! Graph API requests.

use std::sync::Arc;

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use super::ClientInner;
use crate::{Error, GraphApiVersion, GraphQuery, HttpMethod, Result};

/// A single HTTP request to the Graph API.
///
/// Requests are built by [`GraphClient::request`](crate::GraphClient::request)
/// and its shorthands, adjusted with the builder methods below and sent with
/// [`exec`](Self::exec) or [`exec_raw`](Self::exec_raw).
///
/// # Example
///
/// ```no_run
/// use facebook_rs::{GraphApiVersion, GraphClient, GraphQuery};
///
/// # async fn example(client: GraphClient) -> facebook_rs::Result<()> {
/// #[derive(serde::Deserialize)]
/// struct Likes {
///     id: String,
///     likes: i64,
/// }
///
/// let likes: Likes = client
///     .get("/starbucks", GraphQuery::from([("fields", "id,likes")]))
///     .version(GraphApiVersion::new("v2.5")?)
///     .exec()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GraphRequest {
    inner: Arc<ClientInner>,
    method: HttpMethod,
    version: Option<GraphApiVersion>,
    path: String,
    query: GraphQuery,
    is_json: bool,
}

impl GraphRequest {
    pub(crate) fn new(
        inner: Arc<ClientInner>,
        method: HttpMethod,
        path: String,
        mut query: GraphQuery,
    ) -> Self {
        if !query.contains_key("access_token") {
            let token = inner.access_token.read();
            if !token.is_empty() {
                query.set("access_token", token.expose_secret());
            }
        }

        Self {
            version: inner.config.default_version.clone(),
            inner,
            method,
            path,
            query,
            is_json: true,
        }
    }

    /// Use a specific Graph API version for this request.
    pub fn version(mut self, version: GraphApiVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Send this request without a version segment.
    pub fn unversioned(mut self) -> Self {
        self.version = None;
        self
    }

    /// Declare whether the response is JSON.
    ///
    /// Non-JSON requests can only be read with [`exec_raw`](Self::exec_raw).
    pub fn json(mut self, is_json: bool) -> Self {
        self.is_json = is_json;
        self
    }

    /// Add a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(key, value);
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The path as given, before versioning and cleaning.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters, including any attached access token.
    pub fn query(&self) -> &GraphQuery {
        &self.query
    }

    /// The version segment, if any.
    pub fn api_version(&self) -> Option<&GraphApiVersion> {
        self.version.as_ref()
    }

    /// The cleaned request path, with the version segment when present.
    pub fn full_path(&self) -> String {
        match &self.version {
            Some(version) => clean_path(&format!("/{}/{}", version, self.path)),
            None => clean_path(&format!("/{}", self.path)),
        }
    }

    /// The absolute URL this request will be sent to.
    ///
    /// A path prefix on the configured base URL is kept in front of the
    /// request path.
    pub fn url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.inner.config.graph_base_url)?;
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}{}", prefix, self.full_path()));
        if !self.query.is_empty() {
            url.set_query(Some(&self.query.encode()));
        }
        Ok(url)
    }

    /// Execute the request and decode the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// - [`Error::Graph`] if the API answered with a non-200 status
    /// - [`Error::Decode`] if the body does not fit `T`
    /// - [`Error::InvalidInput`] if the request was marked non-JSON
    pub async fn exec<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_json {
            return Err(Error::InvalidInput(format!(
                "cannot decode a non-JSON response into {}",
                std::any::type_name::<T>()
            )));
        }

        let body = self.send().await?;
        serde_json::from_slice(&body).map_err(|e| Error::decode::<T>(e, &body))
    }

    /// Execute the request and return the raw response body.
    pub async fn exec_raw(&self) -> Result<Vec<u8>> {
        self.send().await
    }

    async fn send(&self) -> Result<Vec<u8>> {
        let url = self.url()?;
        tracing::debug!(method = %self.method, path = %url.path(), "sending Graph request");

        let mut request = self.inner.http.request(self.method.into(), url);
        if self.is_json {
            request = request.header(ACCEPT, "application/json");
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), "Graph request failed");
            return Err(Error::from_graph_response(status.as_u16(), &body));
        }

        Ok(body.to_vec())
    }
}

impl std::fmt::Debug for GraphRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphRequest")
            .field("method", &self.method)
            .field("version", &self.version)
            .field("path", &self.path)
            .field("is_json", &self.is_json)
            .finish()
    }
}

/// Lexically clean a rooted path: collapse repeated separators, drop `.`
/// segments and resolve `..` against the preceding segment.
pub(crate) fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientConfig, GraphClient};

    fn client(config: ClientConfig) -> GraphClient {
        GraphClient::with_config("app", "secret", config).unwrap()
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/v2.6//starbucks"), "/v2.6/starbucks");
        assert_eq!(clean_path("/me/"), "/me");
        assert_eq!(clean_path("/a/./b/../c"), "/a/c");
        assert_eq!(clean_path("/../x"), "/x");
        assert_eq!(clean_path("//"), "/");
    }

    #[test]
    fn test_versioned_path() {
        let client = client(ClientConfig::default().with_default_version(GraphApiVersion::latest()));

        let req = client.get("/starbucks", None);
        assert_eq!(req.full_path(), "/v2.6/starbucks");

        let req = req.version(GraphApiVersion::new("v2.5").unwrap());
        assert_eq!(req.full_path(), "/v2.5/starbucks");

        let req = req.unversioned();
        assert_eq!(req.full_path(), "/starbucks");
    }

    #[test]
    fn test_relative_path_is_rooted() {
        let client = client(ClientConfig::default());
        assert_eq!(client.get("me/permissions", None).full_path(), "/me/permissions");
    }

    #[test]
    fn test_url_includes_query() {
        let client = client(ClientConfig::default());
        let url = client
            .get("/starbucks", GraphQuery::from([("fields", "id,likes")]))
            .url()
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://graph.facebook.com/starbucks?fields=id%2Clikes"
        );
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let config = ClientConfig::default()
            .with_graph_base_url("http://proxy.local:8080/graph/")
            .with_default_version(GraphApiVersion::latest());
        let url = client(config).get("//starbucks", None).url().unwrap();

        assert_eq!(url.as_str(), "http://proxy.local:8080/graph/v2.6/starbucks");
    }

    #[test]
    fn test_no_token_attached_when_unset() {
        let client = client(ClientConfig::default());
        let req = client.get("/me", None);
        assert!(!req.query().contains_key("access_token"));
    }

    #[test]
    fn test_held_token_attached_and_explicit_token_kept() {
        let client = client(ClientConfig::default());
        *client.inner.access_token.write() = crate::AccessToken::new("held-token");

        let req = client.get("/me", None);
        assert_eq!(req.query().get("access_token"), Some("held-token"));

        let req = client.get("/me", GraphQuery::from([("access_token", "explicit")]));
        assert_eq!(req.query().get_all("access_token"), ["explicit"]);
    }

    #[test]
    fn test_debug_hides_query() {
        let client = client(ClientConfig::default());
        let req = client.get("/me", GraphQuery::from([("access_token", "secret-token")]));
        assert!(!format!("{:?}", req).contains("secret-token"));
    }

    #[tokio::test]
    async fn test_typed_exec_on_non_json_request_fails() {
        let client = client(ClientConfig::default());
        let result = client.get("/me", None).json(false).exec::<serde_json::Value>().await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}

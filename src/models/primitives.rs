//! Primitive types used to build Graph API requests.
//!
//! This module provides the API version tag, the HTTP method enum and the
//! multi-valued query string map that requests carry.

use std::collections::BTreeMap;
use std::fmt;

/// A Graph API version tag such as `v2.6`.
///
/// The Graph API versions its endpoints by prefixing the path with the
/// version segment (`/v2.6/me`). A client or request without a version uses
/// the unversioned path, which the server maps to the app's default version.
///
/// # Example
///
/// ```
/// use facebook_rs::GraphApiVersion;
///
/// let version = GraphApiVersion::new("v2.5").expect("valid version");
/// assert_eq!(version.as_str(), "v2.5");
/// assert_eq!(GraphApiVersion::latest().as_str(), "v2.6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphApiVersion(String);

impl GraphApiVersion {
    /// The most recent version this crate's models were written against.
    pub const LATEST: &'static str = "v2.6";

    /// Versions released at the time the models were written.
    pub const KNOWN: [&'static str; 8] =
        ["v1.0", "v2.0", "v2.1", "v2.2", "v2.3", "v2.4", "v2.5", "v2.6"];

    /// Create a new version tag, validating the `vMAJOR.MINOR` format.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is not of the form `v<digits>.<digits>`.
    pub fn new(version: &str) -> crate::Result<Self> {
        let invalid = || {
            crate::Error::InvalidInput(format!(
                "Invalid Graph API version: {}. Expected vMAJOR.MINOR",
                version
            ))
        };

        let rest = version.strip_prefix('v').ok_or_else(invalid)?;
        let (major, minor) = rest.split_once('.').ok_or_else(invalid)?;
        let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !numeric(major) || !numeric(minor) {
            return Err(invalid());
        }

        Ok(Self(version.to_string()))
    }

    /// The latest known version.
    pub fn latest() -> Self {
        Self(Self::LATEST.to_string())
    }

    /// Get the version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GraphApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for GraphApiVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// HTTP method of a Graph request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// Read a node or edge
    #[default]
    Get,
    /// Create or update
    Post,
    /// Replace
    Put,
    /// Remove a node or edge
    Delete,
}

impl HttpMethod {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Query string parameters of a Graph request.
///
/// Keys may carry several values and are encoded in sorted order, so the
/// same parameters always produce the same URL.
///
/// # Example
///
/// ```
/// use facebook_rs::GraphQuery;
///
/// let query = GraphQuery::new()
///     .with("fields", "id,name,likes")
///     .with("limit", "10");
/// assert_eq!(query.get("fields"), Some("id,name,likes"));
/// assert_eq!(query.encode(), "fields=id%2Cname%2Clikes&limit=10");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphQuery(BTreeMap<String, Vec<String>>);

impl GraphQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to `key`, keeping existing values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// Replace all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// The first value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// All values of `key`.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if `key` is present, even with no values.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in encoding order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    /// Encode as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for GraphQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = GraphQuery::new();
        for (k, v) in iter {
            query.add(k, v);
        }
        query
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for GraphQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_valid() {
        for tag in GraphApiVersion::KNOWN {
            assert_eq!(GraphApiVersion::new(tag).unwrap().as_str(), tag);
        }
        assert!(GraphApiVersion::new("v10.12").is_ok());
    }

    #[test]
    fn test_version_invalid() {
        assert!(GraphApiVersion::new("2.6").is_err());
        assert!(GraphApiVersion::new("v2").is_err());
        assert!(GraphApiVersion::new("v2.").is_err());
        assert!(GraphApiVersion::new("vX.Y").is_err());
        assert!(GraphApiVersion::new("").is_err());
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(HttpMethod::Delete), reqwest::Method::DELETE);
        assert_eq!(HttpMethod::default().as_str(), "GET");
    }

    #[test]
    fn test_query_multi_values_sorted() {
        let mut query = GraphQuery::from([("ids", "1"), ("fields", "name")]);
        query.add("ids", "2");

        assert_eq!(query.get_all("ids"), ["1", "2"]);
        assert_eq!(query.encode(), "fields=name&ids=1&ids=2");
    }

    #[test]
    fn test_query_set_replaces() {
        let mut query = GraphQuery::new().with("access_token", "a").with("access_token", "b");
        query.set("access_token", "c");

        assert_eq!(query.get_all("access_token"), ["c"]);
        assert!(query.contains_key("access_token"));
        assert!(!query.contains_key("fields"));
    }
}

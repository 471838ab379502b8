//! The working access token and its cached introspection state.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// A Graph API access token.
///
/// Besides the token itself, this caches what the last introspection call
/// reported: whether the token is valid, when it expires and which
/// permissions it carries. Nothing is re-validated automatically; call
/// [`GraphClient::lint_access_token`](crate::GraphClient::lint_access_token)
/// to refresh the cache.
#[derive(Clone)]
pub struct AccessToken {
    token: SecretString,
    valid: bool,
    expires_at: Option<DateTime<Utc>>,
    permissions: Vec<String>,
}

impl AccessToken {
    /// Wrap a raw token. Its validity is unknown until introspected.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            valid: false,
            expires_at: None,
            permissions: Vec::new(),
        }
    }

    /// The raw token.
    pub fn expose_secret(&self) -> &str {
        self.token.expose_secret()
    }

    /// Returns `true` if no token is set.
    pub fn is_empty(&self) -> bool {
        self.token.expose_secret().is_empty()
    }

    /// Validity as of the last introspection; `false` if never introspected.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Expiry as of the last introspection; `None` if unknown or the token
    /// never expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Permission scopes as of the last introspection.
    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    /// A one-line description including the token itself, its validity,
    /// expiry and permissions.
    pub fn info(&self) -> String {
        let expires = self
            .expires_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".to_string());
        format!(
            "{}, valid: {}, expires: {}, perms: [{}]",
            self.expose_secret(),
            self.valid,
            expires,
            self.permissions.join(" ")
        )
    }

    /// Overwrite the cached state from an introspection result.
    ///
    /// An invalid verdict clears expiry and permissions so nothing survives
    /// from an earlier successful validation.
    pub(crate) fn apply_introspection(&mut self, info: &TokenInfo) {
        if info.is_valid {
            self.valid = true;
            self.expires_at = info.expires_at();
            self.permissions = info.scopes.clone();
        } else {
            self.valid = false;
            self.expires_at = None;
            self.permissions.clear();
        }
    }
}

impl Default for AccessToken {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("valid", &self.valid)
            .field("expires_at", &self.expires_at)
            .field("permissions", &self.permissions)
            .finish()
    }
}

/// What the `debug_token` endpoint reports about a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// App the token belongs to
    #[serde(default)]
    pub app_id: String,
    /// Whether the token is currently valid
    #[serde(default)]
    pub is_valid: bool,
    /// Name of the app
    #[serde(default)]
    pub application: String,
    /// User the token was issued for; absent for app tokens
    #[serde(default)]
    pub user_id: Option<String>,
    /// Expiry in unix seconds; `0` means the token does not expire
    #[serde(default)]
    pub expires_at: i64,
    /// Granted permission scopes
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl TokenInfo {
    /// Expiry as a timestamp; `None` for non-expiring tokens.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.expires_at == 0 {
            return None;
        }
        Utc.timestamp_opt(self.expires_at, 0).single()
    }
}

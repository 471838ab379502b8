//! Access tokens and app authentication.
//!
//! The client holds one working [`AccessToken`]. Setting it triggers an
//! introspection call against `debug_token`, which needs the app's ID and
//! secret:
//!
//! ```no_run
//! use facebook_rs::GraphClient;
//!
//! # async fn example() -> facebook_rs::Result<()> {
//! let client = GraphClient::new("app-id", "app-secret")?;
//! client.set_access_token("user-access-token").await?;
//!
//! let token = client.access_token();
//! if token.is_valid() {
//!     println!("granted: {:?}", token.permissions());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! An app access token can be obtained from the app credentials alone with
//! [`GraphClient::app_access_token`](crate::GraphClient::app_access_token).

mod token;

pub use token::{AccessToken, TokenInfo};

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::client::{ClientInner, GraphRequest};
use crate::{Error, GraphQuery, HttpMethod, Result};

#[derive(Deserialize)]
struct DebugTokenResponse {
    data: TokenInfo,
}

#[derive(Deserialize)]
struct AppTokenResponse {
    #[serde(default)]
    access_token: String,
    #[allow(dead_code)]
    #[serde(default)]
    token_type: Option<String>,
}

impl ClientInner {
    /// `GET /debug_token` for `input_token`, authenticated as the app.
    pub(crate) async fn debug_token(self: &Arc<Self>, input_token: &str) -> Result<TokenInfo> {
        let query = GraphQuery::new()
            .with("input_token", input_token)
            .with("access_token", self.app_token());

        let response: DebugTokenResponse =
            GraphRequest::new(self.clone(), HttpMethod::Get, "/debug_token".into(), query)
                .exec()
                .await?;

        tracing::debug!(
            app_id = %response.data.app_id,
            is_valid = response.data.is_valid,
            scopes = response.data.scopes.len(),
            "introspected access token"
        );
        Ok(response.data)
    }

    /// `GET /oauth/access_token` with the client-credentials grant.
    ///
    /// Current API versions answer with JSON; older ones with a url-encoded
    /// form body. Both are accepted.
    pub(crate) async fn app_access_token(self: &Arc<Self>) -> Result<String> {
        let query = GraphQuery::new()
            .with("client_id", self.app_id.as_str())
            .with("client_secret", self.app_secret.expose_secret())
            .with("grant_type", "client_credentials");

        let body = GraphRequest::new(self.clone(), HttpMethod::Get, "/oauth/access_token".into(), query)
            .exec_raw()
            .await?;

        let token = parse_app_token(&body)?;
        tracing::debug!("obtained app access token");
        Ok(token)
    }
}

fn parse_app_token(body: &[u8]) -> Result<String> {
    let token = match serde_json::from_slice::<AppTokenResponse>(body) {
        Ok(response) => response.access_token,
        Err(_) => url::form_urlencoded::parse(body)
            .find(|(k, _)| k == "access_token")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default(),
    };

    if token.is_empty() {
        return Err(Error::Authentication(
            "access token wasn't in response".to_string(),
        ));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_app_token() {
        let body = br#"{"access_token":"123|abc","token_type":"bearer"}"#;
        assert_eq!(parse_app_token(body).unwrap(), "123|abc");
    }

    #[test]
    fn test_parse_form_app_token() {
        assert_eq!(
            parse_app_token(b"access_token=123%7Cabc").unwrap(),
            "123|abc"
        );
    }

    #[test]
    fn test_missing_app_token() {
        assert!(matches!(
            parse_app_token(br#"{"token_type":"bearer"}"#),
            Err(Error::Authentication(_))
        ));
        assert!(matches!(
            parse_app_token(b"expires=5183999"),
            Err(Error::Authentication(_))
        ));
    }
}

//! Users service.

use std::sync::Arc;

use crate::client::{ClientInner, GraphRequest};
use crate::models::User;
use crate::{GraphQuery, HttpMethod, Result};

/// Service for reading User nodes.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: facebook_rs::GraphClient) -> facebook_rs::Result<()> {
/// let user = client.users().get("15504121").await?;
/// println!("{}", user.name);
///
/// let me = client.users().get_fields("me", &["id", "name", "email"]).await?;
/// # Ok(())
/// # }
/// ```
pub struct UsersService {
    inner: Arc<ClientInner>,
}

impl UsersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a user by ID, or `me` for the token owner.
    pub async fn get(&self, user: &str) -> Result<User> {
        self.request(user, GraphQuery::new()).exec().await
    }

    /// Get a user, asking only for the listed fields.
    pub async fn get_fields(&self, user: &str, fields: &[&str]) -> Result<User> {
        self.request(user, GraphQuery::new().with("fields", fields.join(",")))
            .exec()
            .await
    }

    fn request(&self, user: &str, query: GraphQuery) -> GraphRequest {
        GraphRequest::new(self.inner.clone(), HttpMethod::Get, format!("/{}", user), query)
    }
}

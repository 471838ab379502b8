//! Pages service.

use std::sync::Arc;

use crate::client::{ClientInner, GraphRequest};
use crate::models::Page;
use crate::{GraphQuery, HttpMethod, Result};

/// Service for reading Page nodes.
///
/// # Example
///
/// ```no_run
/// # async fn example(client: facebook_rs::GraphClient) -> facebook_rs::Result<()> {
/// // By vanity name or by ID
/// let page = client.pages().get("starbucks").await?;
/// let same = client.pages().get("22092443056").await?;
/// assert_eq!(page.id, same.id);
/// # Ok(())
/// # }
/// ```
pub struct PagesService {
    inner: Arc<ClientInner>,
}

impl PagesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get a page by ID or username.
    pub async fn get(&self, page: &str) -> Result<Page> {
        self.request(page, GraphQuery::new()).exec().await
    }

    /// Get a page, asking only for the listed fields.
    pub async fn get_fields(&self, page: &str, fields: &[&str]) -> Result<Page> {
        self.request(page, GraphQuery::new().with("fields", fields.join(",")))
            .exec()
            .await
    }

    fn request(&self, page: &str, query: GraphQuery) -> GraphRequest {
        GraphRequest::new(self.inner.clone(), HttpMethod::Get, format!("/{}", page), query)
    }
}

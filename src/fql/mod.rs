//! Parameterized FQL queries.
//!
//! FQL is a SQL-like query language served by a separate endpoint from the
//! Graph API. This module builds queries from templates with typed
//! placeholders, sends them and flattens the returned records into a
//! [`ResultSet`].
//!
//! # Example
//!
//! ```no_run
//! use facebook_rs::fql;
//!
//! # async fn example(client: facebook_rs::GraphClient) -> facebook_rs::Result<()> {
//! let query = fql!(
//!     "SELECT uid, name FROM user WHERE uid IN (%D)",
//!     vec![15504121i64, 774070614],
//! )
//! .max_batch_size(50);
//!
//! let result = client.fql().execute(&query).await?;
//! for row in &result {
//!     println!("{:?}", row.values());
//! }
//! # Ok(())
//! # }
//! ```

mod param;
mod query;
mod result;

pub use param::{FqlParam, FqlValue};
pub use query::{scan, FqlQuery, Placeholder, PlaceholderKind};
pub use result::{ResultSet, Row};

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::Value;

use crate::client::ClientInner;
use crate::{Error, Result};
use result::FqlResponse;

/// Service for running FQL queries.
pub struct FqlService {
    inner: Arc<ClientInner>,
}

impl FqlService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Build and run a query.
    ///
    /// The built queries are sent one after another with the query's own
    /// token if it has one, else the client's. Their records are combined
    /// into a single result.
    ///
    /// # Errors
    ///
    /// - [`Error::TemplateMismatch`] before anything is sent
    /// - [`Error::Fql`] for the first built query the server rejects; the
    ///   remaining ones are not sent
    /// - [`Error::Http`] or [`Error::Decode`] for transport and body failures
    pub async fn execute(&self, query: &FqlQuery) -> Result<ResultSet> {
        let built = query.build_with_default(self.inner.config.fql_max_batch_size)?;

        let token = match query.token_override() {
            Some(token) => token.expose_secret().to_string(),
            None => self.inner.access_token.read().expose_secret().to_string(),
        };

        let mut records = Vec::new();
        for (n, text) in built.iter().enumerate() {
            tracing::debug!(part = n + 1, of = built.len(), query = %text, "sending FQL query");
            records.extend(self.send(text, &token).await?);
        }

        Ok(ResultSet::from_records(records))
    }

    /// Shorthand for building a query without placeholders and running it.
    pub async fn query(&self, text: &str) -> Result<ResultSet> {
        self.execute(&FqlQuery::new(text)).await
    }

    async fn send(&self, query: &str, token: &str) -> Result<Vec<Value>> {
        let response = self
            .inner
            .http
            .post(&self.inner.config.fql_endpoint)
            .form(&[("format", "json"), ("access_token", token), ("query", query)])
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        match serde_json::from_slice::<FqlResponse>(&body) {
            Ok(FqlResponse::Rows(rows)) => Ok(rows),
            Ok(FqlResponse::Error(error)) => {
                tracing::debug!(code = error.code, status = status.as_u16(), "FQL query failed");
                Err(Error::Fql(error))
            }
            Err(e) => Err(Error::decode::<FqlResponse>(e, &body)),
        }
    }
}

//! HTTP client and request layer for the Graph API.
//!
//! This module provides the main entry point [`GraphClient`] and the
//! [`GraphRequest`] builder it hands out.
//!
//! # Example
//!
//! ```no_run
//! use facebook_rs::{GraphClient, GraphQuery};
//!
//! # async fn example() -> facebook_rs::Result<()> {
//! let client = GraphClient::new("app-id", "app-secret")?;
//!
//! let raw = client
//!     .get("/starbucks", GraphQuery::from([("fields", "id,name")]))
//!     .exec_raw()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
mod request;

pub use config::{ClientConfig, DEFAULT_FQL_MAX_BATCH_SIZE, FQL_ENDPOINT, GRAPH_BASE_URL};
pub use http::GraphClient;
pub use request::GraphRequest;
pub(crate) use http::ClientInner;

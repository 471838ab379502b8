//! # facebook-rs
//!
//! An async Rust client for the Facebook Graph API and the legacy FQL query
//! endpoint.
//!
//! ## Features
//!
//! - **Authentication**: app access tokens and token introspection
//! - **Graph requests**: versioned GET/POST/PUT/DELETE with typed or raw responses
//! - **Typed models**: pages and users
//! - **FQL**: parameterized queries with automatic splitting of large arrays
//! - **Structured errors**: Graph and FQL failures surface as typed values
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use facebook_rs::{GraphApiVersion, GraphClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> facebook_rs::Result<()> {
//!     let config = ClientConfig::default().with_default_version(GraphApiVersion::latest());
//!     let client = GraphClient::with_config("app-id", "app-secret", config)?;
//!
//!     let token = client.app_access_token().await?;
//!     client.set_access_token(token).await?;
//!
//!     let page = client.pages().get("starbucks").await?;
//!     println!("{} ({:?} likes)", page.name, page.likes);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Handling Graph errors
//!
//! ```rust,no_run
//! use facebook_rs::{Error, GraphClient};
//!
//! # async fn example(client: GraphClient) {
//! match client.pages().get("1").await {
//!     Ok(page) => println!("{}", page.name),
//!     Err(Error::Graph(e)) if e.code == 803 => println!("no such alias"),
//!     Err(e) => eprintln!("request failed: {}", e),
//! }
//! # }
//! ```
//!
//! ## FQL
//!
//! ```rust,no_run
//! use facebook_rs::{fql, GraphClient};
//!
//! # async fn example(client: GraphClient) -> facebook_rs::Result<()> {
//! let query = fql!("SELECT uid, name FROM user WHERE uid IN (%d, %d)", 15504121i64, 774070614i64);
//! let result = client.fql().execute(&query).await?;
//! println!("{} rows with fields {:?}", result.len(), result.fields());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod fql;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, FqlError, GraphError, Result};
pub use models::{GraphApiVersion, GraphQuery, HttpMethod};
pub use client::{ClientConfig, GraphClient, GraphRequest};
pub use auth::{AccessToken, TokenInfo};

/// Prelude module for convenient imports.
///
/// ```rust
/// use facebook_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, FqlError, GraphError, Result};
    pub use crate::models::{
        // Request primitives
        GraphApiVersion, GraphQuery, HttpMethod,
        // Nodes
        Page, User, CoverPhoto, AgeRange, Gender, Birthday,
    };
    pub use crate::client::{ClientConfig, GraphClient, GraphRequest};
    pub use crate::auth::{AccessToken, TokenInfo};
    pub use crate::fql::{FqlParam, FqlQuery, FqlValue, ResultSet, Row};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_version() {
        assert_eq!(GraphApiVersion::latest().as_str(), GraphApiVersion::LATEST);
    }

    #[test]
    fn test_default_endpoints() {
        assert_eq!(client::GRAPH_BASE_URL, "https://graph.facebook.com");
        assert_eq!(
            client::FQL_ENDPOINT,
            "https://api.facebook.com/method/fql.query"
        );
    }

    #[test]
    fn test_query_from_pairs() {
        let query: GraphQuery = [("fields", "id,name")].into_iter().collect();
        assert_eq!(query.get("fields"), Some("id,name"));
    }
}

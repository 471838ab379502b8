//! Data models for the Graph API.
//!
//! - [`primitives`] - Versions, methods and query strings for requests
//! - [`common`] - Sub-objects shared across node types
//! - [`page`] - Page nodes
//! - [`user`] - User nodes

pub mod primitives;
pub mod common;
pub mod page;
pub mod user;

pub use primitives::*;
pub use common::*;
pub use page::*;
pub use user::*;

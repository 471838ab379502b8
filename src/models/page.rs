//! Page model.

use serde::{Deserialize, Serialize};

use super::CoverPhoto;

/// A Facebook Page.
///
/// Only commonly used fields are mapped; see
/// <https://developers.facebook.com/docs/graph-api/reference/page>.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page ID
    pub id: String,
    /// Page name
    #[serde(default)]
    pub name: String,
    /// Vanity alias, e.g. `Starbucks`
    #[serde(default)]
    pub username: Option<String>,
    /// Number of users who like the page
    #[serde(default)]
    pub likes: Option<i64>,
    /// Number of people talking about the page
    #[serde(default)]
    pub talking_about_count: Option<i64>,
    /// Short description
    #[serde(default)]
    pub about: Option<String>,
    /// Long description
    #[serde(default)]
    pub description: Option<String>,
    /// Page category
    #[serde(default)]
    pub category: Option<String>,
    /// URL of the page on Facebook
    #[serde(default)]
    pub link: Option<String>,
    /// External website
    #[serde(default)]
    pub website: Option<String>,
    /// Cover photo
    #[serde(default)]
    pub cover: Option<CoverPhoto>,
    /// Whether the viewer can post to the page
    #[serde(default)]
    pub can_post: bool,
    /// Whether the page is published
    #[serde(default)]
    pub is_published: bool,
}

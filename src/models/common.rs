//! Sub-objects shared by several node types.

use serde::{Deserialize, Serialize};

/// A cover photo attached to a page or user.
///
/// See <https://developers.facebook.com/docs/graph-api/reference/cover-photo/>.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverPhoto {
    /// Photo ID
    #[serde(default)]
    pub id: String,
    /// Image URL
    #[serde(default)]
    pub source: String,
    /// Horizontal offset, in percent
    #[serde(default)]
    pub offset_x: i32,
    /// Vertical offset, in percent
    #[serde(default)]
    pub offset_y: i32,
}

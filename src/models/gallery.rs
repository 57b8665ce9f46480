//! Gallery item model matching the frontend GalleryItem interface.

use serde::{Deserialize, Serialize};

/// A photo in the group's gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub created_at: String,
}

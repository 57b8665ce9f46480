//! Portal snapshot served to the frontend on load.

use serde::Serialize;

use super::{Event, ForumTopic, GalleryItem, Profile, Publication};

/// Fixed outbound links shown throughout the portal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalLinks {
    /// WhatsApp deep link for the group chat widget.
    pub whatsapp: String,
    /// The group's video channel.
    pub youtube: String,
}

/// Everything the frontend needs on first load, in one response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSnapshot {
    pub publications: Vec<Publication>,
    pub events: Vec<Event>,
    pub topics: Vec<ForumTopic>,
    pub gallery: Vec<GalleryItem>,
    pub members: Vec<Profile>,
    pub links: PortalLinks,
}

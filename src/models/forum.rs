//! Forum topic model matching the frontend ForumTopic interface.

use serde::{Deserialize, Serialize};

/// The six debate areas of the forum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ForumCategory {
    #[serde(rename = "Ética")]
    Etica,
    #[serde(rename = "Ontologia")]
    Ontologia,
    #[serde(rename = "Política")]
    Politica,
    #[serde(rename = "Epistemologia")]
    Epistemologia,
    #[serde(rename = "Metafísica")]
    Metafisica,
    #[serde(rename = "Teologia")]
    Teologia,
}

impl ForumCategory {
    pub const ALL: [ForumCategory; 6] = [
        ForumCategory::Etica,
        ForumCategory::Ontologia,
        ForumCategory::Politica,
        ForumCategory::Epistemologia,
        ForumCategory::Metafisica,
        ForumCategory::Teologia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ForumCategory::Etica => "Ética",
            ForumCategory::Ontologia => "Ontologia",
            ForumCategory::Politica => "Política",
            ForumCategory::Epistemologia => "Epistemologia",
            ForumCategory::Metafisica => "Metafísica",
            ForumCategory::Teologia => "Teologia",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Ética" => Some(ForumCategory::Etica),
            "Ontologia" => Some(ForumCategory::Ontologia),
            "Política" => Some(ForumCategory::Politica),
            "Epistemologia" => Some(ForumCategory::Epistemologia),
            "Metafísica" => Some(ForumCategory::Metafisica),
            "Teologia" => Some(ForumCategory::Teologia),
            _ => None,
        }
    }
}

/// A discussion topic opened by a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumTopic {
    pub id: String,
    pub category: ForumCategory,
    pub title: String,
    pub author_id: String,
    /// Author name denormalized at write time; never re-synced.
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

/// Request body for opening a new topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    pub category: ForumCategory,
    pub title: String,
    pub content: String,
}

//! Contact message model matching the frontend ContactMessage interface.

use serde::{Deserialize, Serialize};

/// A message left through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

/// Request body for the public contact form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactMessageRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

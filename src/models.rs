use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored note, serialized with the same attribute names it is persisted under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Note {
    /// Build a new note with a fresh v4 id and the current UTC time
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}

/// Response body for a successful create
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteResponse {
    pub message: String,
    pub id: String,
}

/// Response body carrying only a confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

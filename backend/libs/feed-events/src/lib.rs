//! Wire schema shared by the feed server and its clients
//!
//! Defines the events pushed over the WebSocket channel and the HTTP payload
//! shapes, so both sides agree on a single serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post state snapshot carried by the `postUpdated` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostUpdated {
    pub id: i64,
    pub likes: i64,
    pub shares: i64,
    pub timestamp: DateTime<Utc>,
}

/// Messages the server pushes to connected clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ServerMessage {
    /// A post's authoritative state changed
    PostUpdated(PostUpdated),

    /// Connection established confirmation
    Connected { timestamp: i64 },
}

impl ServerMessage {
    /// Create a post-updated event
    pub fn post_updated(id: i64, likes: i64, shares: i64, timestamp: DateTime<Utc>) -> Self {
        ServerMessage::PostUpdated(PostUpdated {
            id,
            likes,
            shares,
            timestamp,
        })
    }

    /// Create a connected message
    pub fn connected() -> Self {
        ServerMessage::Connected {
            timestamp: Utc::now().timestamp(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Body accepted when creating a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// One comment in a comments listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentEntry {
    pub text: String,
}

/// Response of the comments listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentEntry>,
}

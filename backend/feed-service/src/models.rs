use chrono::{DateTime, Utc};
use feed_events::PostUpdated;
use serde::{Deserialize, Serialize};

/// Post entity - a feed post with its interaction counters
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub likes: i64,
    pub shares: i64,
    pub timestamp: DateTime<Utc>,
}

/// Comment entity - a comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostUpdated {
    fn from(post: &Post) -> Self {
        PostUpdated {
            id: post.id,
            likes: post.likes,
            shares: post.shares,
            timestamp: post.timestamp,
        }
    }
}

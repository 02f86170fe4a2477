//! Post-interaction notifier
//!
//! Issues fire-and-forget interaction requests and applies server pushes to
//! the view. Network failures are logged and swallowed, leaving the view in
//! its prior state; the server's pushed state is the source of truth the
//! client reconciles to.

use feed_events::{CommentRequest, CommentsResponse, PostUpdated};
use std::sync::Arc;

use crate::time_display::render_post_time;
use crate::view::{PostView, ViewError, ViewSlot};

/// Interaction kinds a client can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Like,
    Share,
    CommentFetch,
}

impl Interaction {
    /// Path segment used by the interaction endpoints
    pub fn as_str(self) -> &'static str {
        match self {
            Interaction::Like => "like",
            Interaction::Share => "share",
            Interaction::CommentFetch => "comments",
        }
    }
}

/// Client for the feed API and its push events
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
    view: Arc<dyn PostView>,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>, view: Arc<dyn PostView>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            view,
        }
    }

    /// Request an interaction for a post, fire-and-forget.
    ///
    /// The response is logged; network failures are logged and swallowed.
    pub async fn interact(&self, post_id: i64, kind: Interaction) {
        if kind == Interaction::CommentFetch {
            if let Err(e) = self.show_comments(post_id).await {
                tracing::error!("Comment fetch for post {} failed: {}", post_id, e);
            }
            return;
        }

        let url = format!("{}/api/posts/{}/{}", self.base_url, post_id, kind.as_str());
        match self.http.post(&url).json(&serde_json::json!({})).send().await {
            Ok(response) => match response.text().await {
                Ok(body) => tracing::debug!("Interaction response: {}", body),
                Err(e) => tracing::error!("Error: {}", e),
            },
            Err(e) => tracing::error!("Error: {}", e),
        }
    }

    /// Add a comment to a post, fire-and-forget like `interact`
    pub async fn add_comment(&self, post_id: i64, text: &str) {
        let url = format!("{}/api/posts/{}/comment", self.base_url, post_id);
        let body = CommentRequest {
            text: text.to_string(),
        };

        match self.http.post(&url).json(&body).send().await {
            Ok(response) => match response.text().await {
                Ok(body) => tracing::debug!("Comment response: {}", body),
                Err(e) => tracing::error!("Error: {}", e),
            },
            Err(e) => tracing::error!("Error: {}", e),
        }
    }

    /// Apply a `postUpdated` push event to the view.
    ///
    /// Updates both counters and re-renders the relative time once; the
    /// periodic refresh stays owned by the post's `RefreshHandle`.
    pub fn on_post_updated(&self, update: &PostUpdated) -> Result<(), ViewError> {
        self.view.set_text(
            update.id,
            ViewSlot::LikesCount,
            &format!("{} Likes", update.likes),
        )?;
        self.view.set_text(
            update.id,
            ViewSlot::SharesCount,
            &format!("{} Shares", update.shares),
        )?;
        render_post_time(self.view.as_ref(), update.id, update.timestamp)
    }

    /// Fetch a post's comments and render them into its comments section.
    ///
    /// Network failures are logged and leave the view untouched; a missing
    /// display target is an error.
    pub async fn show_comments(&self, post_id: i64) -> Result<(), ViewError> {
        let url = format!("{}/api/posts/{}/comments", self.base_url, post_id);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error: {}", e);
                return Ok(());
            }
        };

        let listing: CommentsResponse = match response.json().await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!("Error: {}", e);
                return Ok(());
            }
        };

        self.view
            .set_text(post_id, ViewSlot::CommentsSection, &comment_lines(&listing))
    }
}

/// Render a comments listing as display lines
fn comment_lines(listing: &CommentsResponse) -> String {
    if listing.comments.is_empty() {
        "No comments yet.".to_string()
    } else {
        listing
            .comments
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

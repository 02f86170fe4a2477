use crate::repository::{CommentRepository, PostRepository};
use crate::websocket::UpdateHub;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub posts: PostRepository,
    pub comments: CommentRepository,
    pub hub: UpdateHub,
}

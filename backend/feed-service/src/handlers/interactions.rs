/// HTTP handlers for post interactions
///
/// Every mutation follows the same ordering: mutate, re-read, respond with
/// the full post, then broadcast the authoritative state to all connected
/// clients.
use actix_web::{web, HttpResponse};
use feed_events::{CommentEntry, CommentRequest, CommentsResponse, ServerMessage};
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Interaction kinds accepted by the POST endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Like,
    Share,
    Comment,
}

impl FromStr for InteractionKind {
    type Err = AppError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "like" => Ok(InteractionKind::Like),
            "share" => Ok(InteractionKind::Share),
            "comment" => Ok(InteractionKind::Comment),
            other => Err(AppError::Validation(format!(
                "unknown interaction kind: {}",
                other
            ))),
        }
    }
}

/// Apply an interaction to a post
///
/// Endpoint: POST /api/posts/{post_id}/{interaction}
pub async fn post_interaction(
    path: web::Path<(i64, String)>,
    body: Option<web::Json<CommentRequest>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (post_id, kind) = path.into_inner();
    let kind: InteractionKind = kind.parse()?;

    let post = match kind {
        InteractionKind::Like => state.posts.like(post_id).await?,
        InteractionKind::Share => state.posts.share(post_id).await?,
        InteractionKind::Comment => {
            let text = body
                .as_ref()
                .map(|b| b.text.trim())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| AppError::Validation("comment text is required".to_string()))?;

            state.comments.add(post_id, text).await?;
            state
                .posts
                .get(post_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?
        }
    };

    state
        .hub
        .broadcast(ServerMessage::PostUpdated((&post).into()))
        .await;

    Ok(HttpResponse::Ok().json(post))
}

/// List comments for a post
///
/// Endpoint: GET /api/posts/{post_id}/comments
pub async fn get_comments(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();

    let comments = state.comments.list_for_post(post_id).await?;
    let response = CommentsResponse {
        comments: comments
            .into_iter()
            .map(|c| CommentEntry { text: c.text })
            .collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Register interaction routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/posts")
            .route("/{post_id}/comments", web::get().to(get_comments))
            .route("/{post_id}/{interaction}", web::post().to(post_interaction)),
    );
}

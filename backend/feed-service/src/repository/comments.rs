use crate::error::{AppError, Result};
use crate::models::Comment;
use sqlx::PgPool;

// Postgres error code for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Repository for comment operations
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a comment to a post's sequence
    pub async fn add(&self, post_id: i64, text: &str) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, text)
            VALUES ($1, $2)
            RETURNING id, post_id, text, created_at
            "#,
        )
        .bind(post_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
                AppError::NotFound(format!("post {}", post_id))
            }
            _ => AppError::Database(e),
        })?;

        Ok(comment)
    }

    /// Get all comments for a post, in insertion order
    pub async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, text, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}

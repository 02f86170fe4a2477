use crate::error::{AppError, Result};
use crate::models::Post;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Repository for post interactions
///
/// Counters are only ever incremented, one statement per mutation. Every
/// mutation re-reads the row afterwards so callers always see the
/// authoritative state.
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Increment the like counter, then re-read the post
    pub async fn like(&self, post_id: i64) -> Result<Post> {
        let result = sqlx::query("UPDATE posts SET likes = likes + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }

        self.fetch(post_id).await
    }

    /// Increment the share counter, then re-read the post
    pub async fn share(&self, post_id: i64) -> Result<Post> {
        let result = sqlx::query("UPDATE posts SET shares = shares + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }

        self.fetch(post_id).await
    }

    /// Get a post by id
    pub async fn get(&self, post_id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, likes, shares, "timestamp"
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// Create a post with zeroed counters (seeding and tests)
    pub async fn create(&self, timestamp: DateTime<Utc>) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts ("timestamp")
            VALUES ($1)
            RETURNING id, likes, shares, "timestamp"
            "#,
        )
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn fetch(&self, post_id: i64) -> Result<Post> {
        self.get(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))
    }
}

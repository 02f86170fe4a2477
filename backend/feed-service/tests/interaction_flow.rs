//! End-to-end interaction properties against a live Postgres.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p feed-service -- --ignored

use chrono::Utc;
use feed_service::error::AppError;
use feed_service::repository::{CommentRepository, PostRepository};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

#[tokio::test]
#[ignore]
async fn like_increments_count_by_one() {
    let pool = test_pool().await;
    let posts = PostRepository::new(pool);

    let post = posts.create(Utc::now()).await.unwrap();

    // bring the post to a known non-zero count first
    for _ in 0..3 {
        posts.like(post.id).await.unwrap();
    }

    let updated = posts.like(post.id).await.unwrap();
    assert_eq!(updated.likes, 4);
    assert_eq!(updated.shares, 0);
}

#[tokio::test]
#[ignore]
async fn counts_never_decrease() {
    let pool = test_pool().await;
    let posts = PostRepository::new(pool);

    let post = posts.create(Utc::now()).await.unwrap();

    let mut last_likes = post.likes;
    let mut last_shares = post.shares;
    for _ in 0..5 {
        let after_like = posts.like(post.id).await.unwrap();
        assert!(after_like.likes > last_likes);
        assert!(after_like.shares >= last_shares);
        last_likes = after_like.likes;

        let after_share = posts.share(post.id).await.unwrap();
        assert!(after_share.shares > last_shares);
        assert!(after_share.likes >= last_likes);
        last_shares = after_share.shares;
    }
}

#[tokio::test]
#[ignore]
async fn like_and_share_are_independent() {
    let pool = test_pool().await;
    let posts = PostRepository::new(pool);

    let post = posts.create(Utc::now()).await.unwrap();

    posts.like(post.id).await.unwrap();
    posts.like(post.id).await.unwrap();
    let updated = posts.share(post.id).await.unwrap();

    assert_eq!(updated.likes, 2);
    assert_eq!(updated.shares, 1);
}

#[tokio::test]
#[ignore]
async fn comment_round_trip_preserves_insertion_order() {
    let pool = test_pool().await;
    let posts = PostRepository::new(pool.clone());
    let comments = CommentRepository::new(pool);

    let post = posts.create(Utc::now()).await.unwrap();

    comments.add(post.id, "first").await.unwrap();
    comments.add(post.id, "second").await.unwrap();
    comments.add(post.id, "third").await.unwrap();

    let listed = comments.list_for_post(post.id).await.unwrap();
    let texts: Vec<&str> = listed.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[tokio::test]
#[ignore]
async fn post_with_no_comments_lists_empty() {
    let pool = test_pool().await;
    let posts = PostRepository::new(pool.clone());
    let comments = CommentRepository::new(pool);

    let post = posts.create(Utc::now()).await.unwrap();

    let listed = comments.list_for_post(post.id).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
#[ignore]
async fn interactions_on_missing_post_are_not_found() {
    let pool = test_pool().await;
    let posts = PostRepository::new(pool.clone());
    let comments = CommentRepository::new(pool);

    assert!(matches!(
        posts.like(i64::MAX).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        posts.share(i64::MAX).await.unwrap_err(),
        AppError::NotFound(_)
    ));
    assert!(matches!(
        comments.add(i64::MAX, "hello").await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

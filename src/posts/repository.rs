// Database repository for posts

use sqlx::PgPool;

use crate::posts::models::Post;

#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, title: &str, content: &str) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, content) VALUES ($1, $2) \
             RETURNING id, title, content, created_at",
        )
        .bind(title)
        .bind(content)
        .fetch_one(&self.pool)
        .await
    }
}

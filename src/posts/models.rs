// Post data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Post database model
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Post creation request DTO
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(max = 500))]
    pub content: String,
}

/// Post creation response DTO
#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for CreatePostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_length_limits() {
        let empty = CreatePostRequest {
            title: String::new(),
            content: "hello".to_string(),
        };
        assert!(empty.validate().is_err());

        let too_long = CreatePostRequest {
            title: "a".repeat(101),
            content: "hello".to_string(),
        };
        assert!(too_long.validate().is_err());

        let ok = CreatePostRequest {
            title: "a".repeat(100),
            content: "hello".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_content_length_limit() {
        let too_long = CreatePostRequest {
            title: "title".to_string(),
            content: "a".repeat(501),
        };
        assert!(too_long.validate().is_err());

        let ok = CreatePostRequest {
            title: "title".to_string(),
            content: "a".repeat(500),
        };
        assert!(ok.validate().is_ok());
    }
}

// HTTP handlers for post endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::posts::models::{CreatePostRequest, CreatePostResponse};
use crate::AppState;

/// Handler for POST /posts
/// Requires a valid bearer token; the principal is only logged here
pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    tracing::info!(
        user_id = user.id,
        username = %user.username,
        role = %user.role,
        "creating post"
    );

    payload.validate()?;

    let post = state.posts.create(&payload.title, &payload.content).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

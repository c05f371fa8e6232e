// HTTP handlers for login and token refresh

use axum::{extract::State, Json};

use crate::auth::{
    error::AuthError,
    models::{LoginRequest, RefreshRequest, TokenPair},
};
use crate::AppState;

/// Handler for POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    tracing::debug!("login attempt for username: {}", payload.username);

    let pair = state.auth.login(&payload.username, &payload.password).await?;
    Ok(Json(pair))
}

/// Handler for POST /token/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    let pair = state.auth.refresh(&payload.refresh_token).await?;
    Ok(Json(pair))
}

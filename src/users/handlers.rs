// HTTP handlers for user registration endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::users::{
    error::UserError,
    models::{CreateAdminUserRequest, CreateUserRequest, CreateUserResponse},
};
use crate::AppState;

/// Handler for POST /users
/// Registers a new user with the requested role
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = CreateUserResponse),
        (status = 400, description = "Field rule violation or duplicate username/email"),
        (status = 422, description = "Malformed request body or email")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), UserError> {
    tracing::debug!("registering user: {}", payload.username);

    payload.validate()?;

    let user = state.users.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Handler for POST /users/create-admin-user
/// Same shape as registration minus the role, which is forced to admin
#[utoipa::path(
    post,
    path = "/users/create-admin-user",
    request_body = CreateAdminUserRequest,
    responses(
        (status = 201, description = "Admin user created successfully", body = CreateUserResponse),
        (status = 400, description = "Field rule violation or duplicate username/email"),
        (status = 422, description = "Malformed request body or email")
    ),
    tag = "users"
)]
pub async fn create_admin_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdminUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), UserError> {
    tracing::debug!("registering admin user: {}", payload.username);

    payload.validate()?;

    let user = state.users.register_admin(payload).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// Registration business logic

use tracing::info;

use crate::auth::password::PasswordService;
use crate::users::{
    error::UserError,
    models::{CreateAdminUserRequest, CreateUserRequest, User, UserRole},
    repository::UserRepository,
};
use crate::validation;

/// Service layer for user registration.
///
/// Field rules run before any lookup or write (validate-then-construct);
/// duplicate checks run email-first.
#[derive(Clone)]
pub struct UserService {
    repository: UserRepository,
}

impl UserService {
    pub fn new(repository: UserRepository) -> Self {
        Self { repository }
    }

    /// Register a new user with the role given in the request.
    pub async fn register(&self, request: CreateUserRequest) -> Result<User, UserError> {
        self.create(
            request.username,
            request.email,
            request.password,
            request.role,
            request.phone,
        )
        .await
    }

    /// Register a new user with the role forced to admin.
    pub async fn register_admin(
        &self,
        request: CreateAdminUserRequest,
    ) -> Result<User, UserError> {
        self.create(
            request.username,
            request.email,
            request.password,
            UserRole::Admin,
            request.phone,
        )
        .await
    }

    async fn create(
        &self,
        username: String,
        email: String,
        password: String,
        role: UserRole,
        phone: Option<String>,
    ) -> Result<User, UserError> {
        validation::validate_username(&username)?;
        validation::validate_password(&password)?;
        if let Some(phone) = phone.as_deref() {
            validation::validate_phone(phone)?;
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::AlreadyRegisteredEmail);
        }
        if self.repository.find_by_username(&username).await?.is_some() {
            return Err(UserError::AlreadyRegisteredUsername);
        }

        let password_hash = PasswordService::hash(&password)?;

        let user = self
            .repository
            .create_user(
                &username,
                &email,
                &password_hash,
                role.as_str(),
                phone.as_deref(),
            )
            .await?;

        info!(user_id = user.id, role = %role, "registered new user");
        Ok(user)
    }
}

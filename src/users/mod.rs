// User registration module
// Registration with field validation, duplicate checks and an admin variant

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::UserError;
pub use models::{
    CreateAdminUserRequest, CreateUserRequest, CreateUserResponse, User, UserRole,
};
pub use repository::UserRepository;
pub use service::UserService;

// Posts module

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{CreatePostRequest, CreatePostResponse, Post};
pub use repository::PostRepository;

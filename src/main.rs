mod auth;
mod config;
mod db;
mod error;
mod posts;
mod users;
mod validation;

use axum::{routing::post, Router};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, RevocationStore, TokenService};
use config::Config;
use posts::PostRepository;
use users::{UserRepository, UserService};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        users::handlers::create_user,
        users::handlers::create_admin_user,
    ),
    components(
        schemas(
            users::CreateUserRequest,
            users::CreateAdminUserRequest,
            users::CreateUserResponse,
            users::UserRole,
        )
    ),
    tags(
        (name = "users", description = "User registration endpoints")
    ),
    info(
        title = "Shop API",
        version = "1.0.0",
        description = "User registration, JWT login and refresh-token rotation"
    )
)]
struct ApiDoc;

/// Application state shared across handlers.
/// Store handles are created once in `main` and injected here; the flows
/// hold no other mutable state.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: TokenService,
    pub users: UserService,
    pub auth: AuthService,
    pub posts: PostRepository,
}

/// Creates and configures the application router
fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/users", post(users::handlers::create_user))
        .route(
            "/users/create-admin-user",
            post(users::handlers::create_admin_user),
        )
        .route("/login", post(auth::handlers::login))
        .route("/token/refresh", post(auth::handlers::refresh_token))
        .route("/posts", post(posts::handlers::create_post))
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from the configured origin list ("*" allows any)
fn build_cors(origins: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.trim() == "*" {
        layer.allow_origin(Any)
    } else {
        let origins = origins
            .split(',')
            .map(|origin| {
                origin
                    .trim()
                    .parse()
                    .expect("CORS_ORIGINS entries must be valid origins")
            })
            .collect::<Vec<_>>();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Shop API - Starting...");

    let config = Config::from_env();

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database.url, config.database.pool_size)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Connect to the refresh-token revocation store
    let redis_manager = db::create_redis_manager(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");

    let tokens = TokenService::new(
        config.jwt.secret.clone(),
        config.jwt.access_expire_minutes,
        config.jwt.refresh_expire_days,
    );
    let user_repository = UserRepository::new(db_pool.clone());
    let state = AppState {
        db: db_pool.clone(),
        tokens: tokens.clone(),
        users: UserService::new(user_repository.clone()),
        auth: AuthService::new(
            user_repository,
            RevocationStore::new(redis_manager),
            tokens,
        ),
        posts: PostRepository::new(db_pool),
    };

    let cors = build_cors(&config.cors.origins);
    let app = create_router(state, cors);

    // Start the Axum server
    let addr = format!("{}:{}", config.web.host, config.web.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Shop API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

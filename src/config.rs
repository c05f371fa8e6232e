// Application configuration, sourced from environment variables once at
// startup. Store handles built from it are injected into the flows that
// need them; nothing here is a global.

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

/// Key-value store connection settings
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Token signing settings. The secret is process-wide and never rotated
/// mid-process.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_expire_minutes: i64,
    pub refresh_expire_days: i64,
}

/// CORS policy: comma-separated origins, or "*" for any
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub origins: String,
}

/// Bind address settings
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from the environment. Called once from `main`;
    /// missing required variables abort startup.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig {
                url: required("DATABASE_URL"),
                pool_size: required_parsed("DB_POOL_SIZE"),
            },
            redis: RedisConfig {
                url: required("REDIS_URL"),
            },
            jwt: JwtConfig {
                secret: required("JWT_SECRET"),
                access_expire_minutes: required_parsed("ACCESS_TOKEN_EXPIRE_MINUTES"),
                refresh_expire_days: required_parsed("REFRESH_TOKEN_EXPIRE_DAYS"),
            },
            cors: CorsConfig {
                origins: std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            },
            web: WebConfig {
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .expect("PORT must be a valid port number"),
            },
        }
    }
}

fn required(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{} must be set in environment", name))
}

fn required_parsed<T>(name: &str) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Debug,
{
    required(name)
        .parse()
        .unwrap_or_else(|e| panic!("{} must be a valid number: {:?}", name, e))
}

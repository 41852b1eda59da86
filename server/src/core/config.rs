//! Server Configuration
//!
//! Loaded once from the environment in `main` and passed down to the
//! components that need it. Mandatory variables abort startup with an
//! error naming the first missing one.
//!
//! | Variable | Required | Default | Notes |
//! |----------|----------|---------|-------|
//! | DATABASE_URL | yes | | SQLite path, `sqlite:` prefix optional |
//! | SERVER_PORT | yes | | HTTP listen port |
//! | JWT_SECRET | yes | | HS256 signing key, min 32 chars |
//! | JWT_EXPIRES_IN | yes | | token lifetime in seconds |
//! | JWT_ISSUER | yes | | `iss` claim |
//! | SERVER_HOST | no | 127.0.0.1 | listen address |
//! | CORS_ORIGIN | no | * | allowed origin |
//! | LOG_DIR | no | logs | daily-rotated file output |
//! | RUST_ENV | no | development | development \| production |

use shared::error::AppError;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL
    pub database_url: String,
    /// HTTP listen address
    pub server_host: String,
    /// HTTP listen port
    pub server_port: u16,
    /// JWT signing secret (HS256)
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expires_in: i64,
    /// Token issuer (`iss` claim)
    pub jwt_issuer: String,
    /// Allowed CORS origin (`*` for any)
    pub cors_origin: String,
    /// Directory for rotated log files
    pub log_dir: String,
    /// Runtime environment: development | production
    pub environment: String,
}

fn required(name: &'static str) -> Result<String, AppError> {
    std::env::var(name)
        .map_err(|_| AppError::config(format!("Missing required environment variable: {name}")))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = required("DATABASE_URL")?;

        let server_port = required("SERVER_PORT")?
            .parse::<u16>()
            .map_err(|_| AppError::config("SERVER_PORT must be a valid port number"))?;

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.len() < 32 {
            return Err(AppError::config(
                "JWT_SECRET must be at least 32 characters long",
            ));
        }

        let jwt_expires_in = required("JWT_EXPIRES_IN")?
            .parse::<i64>()
            .map_err(|_| AppError::config("JWT_EXPIRES_IN must be a number of seconds"))?;
        if jwt_expires_in <= 0 {
            return Err(AppError::config("JWT_EXPIRES_IN must be positive"));
        }

        let jwt_issuer = required("JWT_ISSUER")?;

        Ok(Self {
            database_url,
            server_host: std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            server_port,
            jwt_secret,
            jwt_expires_in,
            jwt_issuer,
            cors_origin: std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".into()),
            log_dir: std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()),
            environment: std::env::var("RUST_ENV").unwrap_or_else(|_| "development".into()),
        })
    }

    /// Whether we are running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

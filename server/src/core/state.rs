//! Server state

use std::sync::Arc;

use shared::error::AppError;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Shared server state, cheap to clone (Arc / pool handles)
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Open the database (migrations + seed) and build the JWT service
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url).await?;
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
            config.jwt_expires_in,
        ));

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            jwt_service,
        })
    }
}

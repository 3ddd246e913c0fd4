use std::sync::Arc;

use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::media::{self, ImageStore};

/// Server state - shared by every request handler
///
/// Cloning is cheap: the pool and the services are reference counted.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | immutable configuration |
/// | pool | SQLite connection pool |
/// | jwt_service | token issuing / validation |
/// | images | image storage backend (S3 or local disk) |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub images: Arc<dyn ImageStore>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("environment", &self.config.environment)
            .field("database_url", &self.config.database_url)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// Assemble state from already-initialized parts
    pub fn new(config: Config, pool: SqlitePool, images: Arc<dyn ImageStore>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config: Arc::new(config),
            pool,
            jwt_service,
            images,
        }
    }

    /// Initialize server state
    ///
    /// 1. Open the database (runs migrations)
    /// 2. Build the image store (S3 when a bucket is configured)
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let images = media::build_store(&config.images)
            .await
            .map_err(|e| ServerError::Storage(e.to_string()))?;

        Ok(Self::new(config.clone(), db.pool, images))
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Business time zone for analytics day boundaries
    pub fn timezone(&self) -> Tz {
        self.config.business_timezone
    }
}

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::auth::TokenCodec;
use crate::config::ApplicationSettings;
use crate::errors::InternalError;

/// Centralized application data following the main-owned pattern: the
/// connection pool, the settings and the token codec are created once at
/// startup, treated as immutable, and shared via `Arc`.
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: ApplicationSettings,
    pub token_codec: Arc<TokenCodec>,
}

impl AppData {
    /// Connect to the database, run pending migrations and build the shared
    /// state.
    pub async fn init(settings: ApplicationSettings) -> Result<Self, InternalError> {
        let db = Database::connect(&settings.database.url)
            .await
            .map_err(|e| InternalError::database("connect_database", e))?;
        tracing::debug!("connected to database");

        Migrator::up(&db, None)
            .await
            .map_err(|e| InternalError::database("run_migrations", e))?;
        tracing::debug!("database migrations completed");

        let token_codec = Arc::new(TokenCodec::new(
            settings.jwt.secret.clone(),
            settings.jwt.expire_minutes,
        ));

        Ok(Self {
            db,
            settings,
            token_codec,
        })
    }
}

use std::sync::Arc;

use crate::{
    config::Config,
    error::AppError,
    sheets::{client::GoogleSheetsMirror, RemoteMirror},
};

/// Connects to the SQLite database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up-to-date. For file-backed
/// databases the parent directory is created first. This function must complete
/// successfully before the application can access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    if let Some(path) = config.database_url.strip_prefix("sqlite://") {
        let path = path.split('?').next().unwrap_or(path);
        if let Some(dir) = std::path::Path::new(path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
    }

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the Google Sheets mirror from configuration.
///
/// Returns `None` when the mirror is not configured or its private key cannot be
/// parsed; either way the service runs local-only and reservations are unaffected.
///
/// # Arguments
/// - `config` - Application configuration with optional mirror settings
///
/// # Returns
/// - `Some(Arc<dyn RemoteMirror>)` - Ready mirror client
/// - `None` - Mirror disabled or misconfigured (logged)
pub fn setup_mirror(config: &Config) -> Option<Arc<dyn RemoteMirror>> {
    let sheets = config.sheets.as_ref()?;

    match GoogleSheetsMirror::new(sheets.clone()) {
        Ok(mirror) => Some(Arc::new(mirror)),
        Err(err) => {
            tracing::warn!("Google Sheets mirror disabled: {}", err);
            None
        }
    }
}

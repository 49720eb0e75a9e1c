use crate::config::BackendConfig;
use crate::error::{AppError, AppResult};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

/// Handle on the externally-managed data store.
///
/// Constructed once in `main` and injected into every service. When either
/// backend credential is missing the handle carries no connection and every
/// caller sees `AppError::BackendUnavailable`; pages then render their
/// placeholder instead of data and mutations report a tagged error.
#[derive(Clone)]
pub struct Backend {
    conn: Option<Arc<DatabaseConnection>>,
}

impl Backend {
    pub async fn connect(config: &BackendConfig) -> AppResult<Self> {
        if !config.is_configured() {
            log::warn!("backend credentials missing, running in degraded mode");
            return Ok(Self::unavailable());
        }

        // is_configured() guarantees the url is present.
        let url = config
            .database_url
            .clone()
            .ok_or(AppError::BackendUnavailable)?;

        let mut options = ConnectOptions::new(url);
        options.max_connections(config.max_connections);

        let conn = Database::connect(options).await?;
        Ok(Self {
            conn: Some(Arc::new(conn)),
        })
    }

    pub fn unavailable() -> Self {
        Self { conn: None }
    }

    /// Wrap an existing connection. Used by tests with a mock database.
    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self {
            conn: Some(Arc::new(conn)),
        }
    }

    pub fn is_available(&self) -> bool {
        self.conn.is_some()
    }

    pub fn conn(&self) -> AppResult<&DatabaseConnection> {
        self.conn.as_deref().ok_or(AppError::BackendUnavailable)
    }
}

use std::sync::Arc;

use tooldir_db::directory::Directory;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool and directory share one connection pool and the
/// config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by write paths.
    pub pool: tooldir_db::DbPool,
    /// Degrading read service over the same pool.
    pub directory: Directory,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: tooldir_db::DbPool, config: ServerConfig) -> Self {
        Self {
            directory: Directory::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}

use std::sync::Arc;

use recordstore_core::db::{open_db, open_existing_db, DbError};
use recordstore_core::{
    with_record_service, Access, Config, RecordService, RepoResult, SqliteRecordRepository,
};

use crate::error::ApiError;

/// Immutable per-process server state.
///
/// Holds configuration only; every request opens its own connection, so no
/// record data or connection handle is shared between requests.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    /// Creates and migrates the store if needed, then freezes `config`.
    ///
    /// This is the only place the server may create the database file.
    pub fn new(config: Config) -> Result<Arc<Self>, DbError> {
        drop(open_db(&config.db_path)?);
        Ok(Arc::new(Self { config }))
    }

    /// Runs one unit of work against the store on the blocking pool.
    pub async fn run<T, F>(&self, access: Access, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&RecordService<SqliteRecordRepository<'_>>) -> RepoResult<T> + Send + 'static,
    {
        let db_path = self.config.db_path.clone();

        let outcome = tokio::task::spawn_blocking(move || -> RepoResult<T> {
            // Why: a fresh connection per request keeps no connection state
            // between requests; opening without CREATE turns a vanished file
            // into `StoreUnavailable` instead of a silently empty store.
            let mut conn = open_existing_db(&db_path)?;
            with_record_service(&mut conn, access, f)
        })
        .await
        .map_err(|err| ApiError::store_failure("worker", err))?;

        Ok(outcome?)
    }
}

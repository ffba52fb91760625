//! Record use-case service.
//!
//! # Responsibility
//! - Provide the list/create/delete entry points used by transports.
//! - Delegate persistence to an injected repository.
//!
//! # Invariants
//! - Every operation answers with the full collection as the store sees it
//!   after the operation.
//! - Drafts are validated before the repository is touched.
//! - Deleting an unknown id succeeds and leaves the collection unchanged.

use crate::model::record::{Record, RecordDraft, RecordId};
use crate::repo::record_repo::{RecordRepository, RepoResult, SqliteRecordRepository};
use log::{info, warn};
use rusqlite::{Connection, TransactionBehavior};

/// Whether a unit of work mutates the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Use-case service over a single record collection.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns every record in insertion order. Empty store yields empty vec.
    pub fn list_all(&self) -> RepoResult<Vec<Record>> {
        let records = self.repo.find_all()?;
        info!(
            "event=record_list module=service status=ok count={}",
            records.len()
        );
        Ok(records)
    }

    /// Validates `draft`, persists it and returns the updated collection.
    ///
    /// # Errors
    /// - `RepoError::Validation` when the draft is rejected; nothing is written.
    /// - `RepoError::Db` when persistence fails.
    pub fn create(&self, draft: &RecordDraft) -> RepoResult<Vec<Record>> {
        let new_record = draft.validate().map_err(|err| {
            warn!(
                "event=record_create module=service status=rejected reason={:?}",
                err
            );
            err
        })?;

        let created = self.repo.insert(&new_record)?;
        let records = self.repo.find_all()?;
        info!(
            "event=record_create module=service status=ok id={} count={}",
            created.id,
            records.len()
        );
        Ok(records)
    }

    /// Removes the record with `id` and returns the updated collection.
    ///
    /// A missing `id` is not an error: the unchanged collection is returned.
    pub fn delete(&self, id: RecordId) -> RepoResult<Vec<Record>> {
        let removed = self.repo.remove_by_id(id)?;
        let records = self.repo.find_all()?;
        info!(
            "event=record_delete module=service status={} id={} count={}",
            if removed { "ok" } else { "noop" },
            id,
            records.len()
        );
        Ok(records)
    }
}

/// Runs `f` against a SQLite-backed service inside one transaction.
///
/// Writes take the database lock up front (`BEGIN IMMEDIATE`), so the
/// collection a mutation answers with always contains that mutation and no
/// half-applied concurrent one. The transaction rolls back when `f` fails.
pub fn with_record_service<T>(
    conn: &mut Connection,
    access: Access,
    f: impl FnOnce(&RecordService<SqliteRecordRepository<'_>>) -> RepoResult<T>,
) -> RepoResult<T> {
    // Why: a deferred write transaction would upgrade its lock mid-flight and
    // can fail with SQLITE_BUSY past the busy timeout; IMMEDIATE queues writers.
    let behavior = match access {
        Access::Read => TransactionBehavior::Deferred,
        Access::Write => TransactionBehavior::Immediate,
    };
    let tx = conn.transaction_with_behavior(behavior)?;
    let value = {
        let service = RecordService::new(SqliteRecordRepository::new(&tx));
        f(&service)?
    };
    tx.commit()?;
    Ok(value)
}

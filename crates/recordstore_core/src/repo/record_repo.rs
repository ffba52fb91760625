//! Record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Expose the three store primitives the service builds on.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `find_all` returns records in insertion order (`id ASC`).
//! - `insert` only accepts a validated `NewRecord`.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::record::{NewRecord, Record, RecordId, RecordValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORD_SELECT_SQL: &str = "SELECT id, text, done FROM records";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error surfaced by repository and service operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store primitives consumed by `RecordService`.
pub trait RecordRepository {
    /// Every record currently stored, oldest first.
    fn find_all(&self) -> RepoResult<Vec<Record>>;
    /// Persists `record` and returns it with its assigned id.
    fn insert(&self, record: &NewRecord) -> RepoResult<Record>;
    /// Returns `true` when a row was removed.
    fn remove_by_id(&self, id: RecordId) -> RepoResult<bool>;
}

/// SQLite-backed record repository.
///
/// Borrows the connection, so a `rusqlite::Transaction` can be passed in
/// through deref to scope several calls to one transaction.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{RECORD_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    fn insert(&self, record: &NewRecord) -> RepoResult<Record> {
        self.conn.execute(
            "INSERT INTO records (text, done) VALUES (?1, ?2);",
            params![record.text(), bool_to_int(record.done())],
        )?;

        Ok(Record {
            id: self.conn.last_insert_rowid(),
            text: record.text().to_string(),
            done: record.done(),
        })
    }

    fn remove_by_id(&self, id: RecordId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<Record> {
    let id: RecordId = row.get("id")?;
    let text: String = row.get("text")?;
    if text.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "blank text in records.text for id {id}"
        )));
    }

    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in records.done for id {id}"
            )));
        }
    };

    Ok(Record { id, text, done })
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

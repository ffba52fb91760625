use recordstore_core::db::migrations::latest_version;
use recordstore_core::db::{open_db, open_db_in_memory, open_existing_db, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "records");
}

#[test]
fn reopening_a_file_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute("INSERT INTO records (text) VALUES ('survives reopen');", [])
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM records;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn done_defaults_to_zero_at_the_schema_level() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO records (text) VALUES ('x');", [])
        .unwrap();

    let done: i64 = conn
        .query_row("SELECT done FROM records;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(done, 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

#[test]
fn open_existing_db_refuses_to_create_a_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-provisioned.sqlite3");

    let err = open_existing_db(&path).unwrap_err();

    assert!(matches!(err, DbError::Sqlite(_)));
    assert!(!path.exists());
}

#[test]
fn open_existing_db_reads_a_provisioned_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.sqlite3");
    drop(open_db(&path).unwrap());

    let conn = open_existing_db(&path).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn records_table_holds_only_the_wire_columns() {
    let conn = open_db_in_memory().unwrap();

    let mut stmt = conn.prepare("PRAGMA table_info(records);").unwrap();
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(columns, ["id", "text", "done"]);
}

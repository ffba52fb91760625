use recordstore_core::db::open_db_in_memory;
use recordstore_core::{RecordDraft, RecordRepository, RepoError, SqliteRecordRepository};
use std::collections::HashSet;

#[test]
fn find_all_on_empty_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn insert_assigns_sequential_ids_and_applies_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let first = repo
        .insert(&RecordDraft::with_text("buy milk").validate().unwrap())
        .unwrap();
    let second = repo
        .insert(&RecordDraft::with_text("walk dog").validate().unwrap())
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(!first.done);
    assert_eq!(repo.find_all().unwrap(), vec![first, second]);
}

#[test]
fn insert_persists_explicit_done() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let draft = RecordDraft {
        text: Some("already done".to_string()),
        done: Some(true),
    };
    repo.insert(&draft.validate().unwrap()).unwrap();

    let loaded = repo.find_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].done);
}

#[test]
fn remove_by_id_reports_whether_a_row_went_away() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);
    let record = repo
        .insert(&RecordDraft::with_text("short lived").validate().unwrap())
        .unwrap();

    assert!(repo.remove_by_id(record.id).unwrap());
    assert!(!repo.remove_by_id(record.id).unwrap());
    assert!(!repo.remove_by_id(9_999).unwrap());
    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn ids_are_never_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let mut seen = HashSet::new();
    for round in 0..5 {
        let record = repo
            .insert(&RecordDraft::with_text(format!("item {round}")).validate().unwrap())
            .unwrap();
        assert!(seen.insert(record.id), "id {} was reused", record.id);
        repo.remove_by_id(record.id).unwrap();
    }
}

#[test]
fn invalid_done_value_is_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO records (text, done) VALUES ('corrupt', 7);",
    )
    .unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let err = repo.find_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("done")));
}

#[test]
fn schema_rejects_blank_text_written_around_validation() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute("INSERT INTO records (text) VALUES ('   ');", []);

    assert!(result.is_err());
}

use jotpad_core::db::migrations::latest_version;
use jotpad_core::db::open_db_in_memory;
use jotpad_core::{Note, NoteRepository, NoteService, NoteServiceError, RepoError, SqliteNoteRepository};
use rusqlite::Connection;

#[test]
fn insert_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id = repo.insert_note(&Note::new("Groceries", "Milk, eggs")).unwrap();

    let notes = repo.list_all().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, Some(id));
    assert_eq!(notes[0].title, "Groceries");
    assert_eq!(notes[0].content, "Milk, eggs");
}

#[test]
fn first_insert_is_assigned_id_one() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id = repo.insert_note(&Note::new("Groceries", "Milk, eggs")).unwrap();
    assert_eq!(id, 1);
}

#[test]
fn list_orders_by_id_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id_a = repo.insert_note(&Note::new("A", "a")).unwrap();
    let id_b = repo.insert_note(&Note::new("B", "b")).unwrap();

    let notes = repo.list_all().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, Some(id_b));
    assert_eq!(notes[0].title, "B");
    assert_eq!(notes[1].id, Some(id_a));
    assert_eq!(notes[1].title, "A");
}

#[test]
fn update_overwrites_matching_row_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id_a = repo.insert_note(&Note::new("A", "a")).unwrap();
    let id_b = repo.insert_note(&Note::new("B", "b")).unwrap();

    let affected = repo.update_note(&Note::with_id(id_a, "A2", "a2")).unwrap();
    assert_eq!(affected, 1);

    let notes = repo.list_all().unwrap();
    assert_eq!(notes[0].id, Some(id_b));
    assert_eq!(notes[0].title, "B");
    assert_eq!(notes[0].content, "b");
    assert_eq!(notes[1].id, Some(id_a));
    assert_eq!(notes[1].title, "A2");
    assert_eq!(notes[1].content, "a2");
}

#[test]
fn update_to_same_values_leaves_list_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id = repo.insert_note(&Note::new("same", "body")).unwrap();
    let before = repo.list_all().unwrap();

    let affected = repo.update_note(&Note::with_id(id, "same", "body")).unwrap();
    assert_eq!(affected, 1);
    assert_eq!(repo.list_all().unwrap(), before);
}

#[test]
fn update_missing_row_returns_zero_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    repo.insert_note(&Note::new("A", "a")).unwrap();
    let before = repo.list_all().unwrap();

    let affected = repo.update_note(&Note::with_id(999, "X", "x")).unwrap();
    assert_eq!(affected, 0);
    assert_eq!(repo.list_all().unwrap(), before);
}

#[test]
fn update_without_id_fails_loudly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let err = repo.update_note(&Note::new("draft", "body")).unwrap_err();
    assert!(matches!(err, RepoError::MissingId));
}

#[test]
fn insert_with_id_fails_loudly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let err = repo.insert_note(&Note::with_id(5, "t", "c")).unwrap_err();
    assert!(matches!(err, RepoError::AlreadyPersisted(5)));
}

#[test]
fn delete_removes_row_permanently() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let id_a = repo.insert_note(&Note::new("A", "a")).unwrap();
    let id_b = repo.insert_note(&Note::new("B", "b")).unwrap();

    let affected = repo.delete_note(id_b).unwrap();
    assert_eq!(affected, 1);

    let notes = repo.list_all().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, Some(id_a));
    assert!(notes.iter().all(|note| note.id != Some(id_b)));
}

#[test]
fn delete_missing_row_returns_zero() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let affected = repo.delete_note(999).unwrap();
    assert_eq!(affected, 0);
}

// Scenario sequence: insert A, insert B, update 1, delete 2.
#[test]
fn crud_sequence_matches_expected_snapshots() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    assert_eq!(repo.insert_note(&Note::new("A", "a")).unwrap(), 1);
    assert_eq!(repo.insert_note(&Note::new("B", "b")).unwrap(), 2);
    assert_eq!(
        repo.list_all().unwrap(),
        vec![Note::with_id(2, "B", "b"), Note::with_id(1, "A", "a")]
    );

    assert_eq!(repo.update_note(&Note::with_id(1, "A2", "a2")).unwrap(), 1);
    assert_eq!(
        repo.list_all().unwrap(),
        vec![Note::with_id(2, "B", "b"), Note::with_id(1, "A2", "a2")]
    );

    assert_eq!(repo.delete_note(2).unwrap(), 1);
    assert_eq!(repo.list_all().unwrap(), vec![Note::with_id(1, "A2", "a2")]);
}

#[test]
fn service_validates_before_touching_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let err = service.create_note("   ", "body").unwrap_err();
    assert!(matches!(err, NoteServiceError::Validation(_)));

    let err = service.create_note("title", " ").unwrap_err();
    assert!(matches!(err, NoteServiceError::Validation(_)));

    assert!(service.list_notes().unwrap().is_empty());
}

#[test]
fn service_trims_persisted_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(repo);

    let id = service.create_note("  Groceries ", " Milk, eggs\n").unwrap();

    let notes = service.list_notes().unwrap();
    assert_eq!(notes[0].id, Some(id));
    assert_eq!(notes[0].title, "Groceries");
    assert_eq!(notes[0].content, "Milk, eggs");
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteNoteRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_notes_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteNoteRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("notes"))));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteNoteRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "notes",
            column: "content"
        })
    ));
}

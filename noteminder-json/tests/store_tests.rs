use chrono::NaiveDate;
use noteminder_core::{open_notebook, save_notebook, CoreError, NoteRepository, Notebook, NotesFile};
use noteminder_json::{export_file, import_file, parse_notes_file, JsonStore};
use std::fs;
use tempfile::tempdir;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn store_in(dir: &std::path::Path, keep: usize) -> JsonStore {
    JsonStore::open_with(dir.join("data/notes.json"), dir.join("data/backups"), keep).unwrap()
}

#[test]
fn missing_store_loads_empty() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path(), 3);
    assert_eq!(store.load().unwrap(), NotesFile::default());
    assert!(!store.path().exists());
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path(), 3);

    let mut book = Notebook::new();
    book.create("Rust", "ownership", vec!["lang".into()], day()).unwrap();
    book.create("Go", "goroutines", vec![], day()).unwrap();
    save_notebook(&store, &book).unwrap();

    let reopened = open_notebook(&store).unwrap();
    assert_eq!(reopened.to_file(), book.to_file());

    let backups = fs::read_dir(dir.path().join("data/backups")).unwrap().count();
    assert!(backups >= 1 && backups <= 3);
}

#[test]
fn stored_dates_are_iso_calendar_dates() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path(), 1);
    let mut book = Notebook::new();
    book.create("t", "c", vec![], day()).unwrap();
    save_notebook(&store, &book).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw["note_id_counter"], 2);
    assert_eq!(raw["notes"][0]["created"], "2024-03-10");
    assert_eq!(raw["notes"][0]["next_review"], "2024-03-11");
    assert_eq!(raw["notes"][0]["streak"], 0);
}

#[test]
fn corrupt_store_is_a_format_error() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path(), 1);
    fs::write(store.path(), "{ not json").unwrap();
    assert!(matches!(store.load(), Err(CoreError::Format(_))));
}

#[test]
fn parse_requires_both_keys() {
    let missing_counter = r#"{ "notes": [] }"#;
    let err = parse_notes_file(missing_counter).unwrap_err();
    assert!(matches!(err, CoreError::Format(ref m) if m.contains("note_id_counter")));

    let missing_notes = r#"{ "note_id_counter": 4 }"#;
    assert!(matches!(parse_notes_file(missing_notes), Err(CoreError::Format(_))));

    assert!(matches!(parse_notes_file("[]"), Err(CoreError::Format(_))));

    let ok = parse_notes_file(r#"{ "notes": [], "note_id_counter": 1 }"#).unwrap();
    assert_eq!(ok, NotesFile::default());
}

#[test]
fn bad_import_keeps_existing_notebook() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(
        &bad,
        r#"{ "notes": [{ "id": 1, "title": "x", "tags": [], "content": "y",
             "created": "2024-01-01", "last_reviewed": "2024-01-01",
             "next_review": "2024-01-02", "streak": 0 }] }"#,
    )
    .unwrap();

    let mut book = Notebook::new();
    book.create("keep", "me", vec![], day()).unwrap();
    let before = book.to_file();

    let result = import_file(&bad).and_then(|file| book.replace(file));
    assert!(matches!(result, Err(CoreError::Format(_))));
    assert_eq!(book.to_file(), before);
}

#[test]
fn export_then_import_replaces_collection() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("exports/notes.json");

    let mut src = Notebook::new();
    src.create("a", "b", vec![], day()).unwrap();
    src.create("c", "d", vec!["t".into()], day()).unwrap();
    export_file(&out, &src.to_file()).unwrap();

    let mut dst = Notebook::new();
    dst.create("gone", "soon", vec![], day()).unwrap();
    dst.replace(import_file(&out).unwrap()).unwrap();
    assert_eq!(dst.to_file(), src.to_file());
}

#[test]
fn import_of_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        import_file(&dir.path().join("nope.json")),
        Err(CoreError::Io(_))
    ));
}

#[test]
fn unreadable_store_is_copied_aside() {
    let dir = tempdir().unwrap();
    let store = store_in(dir.path(), 1);
    assert_eq!(store.preserve_unreadable().unwrap(), None);

    fs::write(store.path(), "{ broken").unwrap();
    let copy = store.preserve_unreadable().unwrap().unwrap();
    assert!(copy.starts_with(store.backups_dir()));
    assert_eq!(fs::read_to_string(&copy).unwrap(), "{ broken");

    // Later saves and rotation leave the copy alone.
    let mut book = Notebook::new();
    book.create("t", "c", vec![], day()).unwrap();
    save_notebook(&store, &book).unwrap();
    save_notebook(&store, &book).unwrap();
    assert_eq!(fs::read_to_string(&copy).unwrap(), "{ broken");
}

#[test]
fn stores_sharing_a_backups_dir_rotate_independently() {
    let dir = tempdir().unwrap();
    let backups = dir.path().join("backups");
    let a = JsonStore::open_with(dir.path().join("a.json"), backups.clone(), 1).unwrap();
    let b = JsonStore::open_with(dir.path().join("a-b.json"), backups.clone(), 1).unwrap();

    let mut book = Notebook::new();
    book.create("t", "c", vec![], day()).unwrap();
    save_notebook(&a, &book).unwrap();
    save_notebook(&b, &book).unwrap();
    save_notebook(&a, &book).unwrap();

    let names: Vec<String> = fs::read_dir(&backups)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".json"))
        .collect();
    assert_eq!(names.len(), 2, "{names:?}");
    assert!(names.iter().any(|n| n.starts_with("a-b-")));
    assert!(names.iter().any(|n| n.starts_with("a-2")));
}

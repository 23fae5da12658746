use lazydto_core::{CacheState, ContainerError, SyncedList, SyncedMap};
use rusqlite::{params, Connection};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE profiles (
            id INTEGER PRIMARY KEY,
            tags TEXT NOT NULL,
            limits TEXT
        );",
    )
    .unwrap();
    conn
}

#[test]
fn container_persists_as_text_column() {
    let conn = setup();
    let mut tags = SyncedList::<String>::new();
    tags.add("rust".to_string()).unwrap();
    tags.add("sqlite".to_string()).unwrap();

    conn.execute(
        "INSERT INTO profiles (id, tags) VALUES (?1, ?2);",
        params![1, tags],
    )
    .unwrap();

    let raw: String = conn
        .query_row("SELECT tags FROM profiles WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(raw, r#"["rust","sqlite"]"#);
}

#[test]
fn loaded_container_decodes_on_first_read() {
    let conn = setup();
    conn.execute(
        "INSERT INTO profiles (id, tags) VALUES (1, '[\"a\",\"b\"]');",
        [],
    )
    .unwrap();

    let mut tags: SyncedList<String> = conn
        .query_row("SELECT tags FROM profiles WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();

    assert_eq!(tags.state(), CacheState::TextOnly);
    assert_eq!(
        tags.structured().unwrap().into_owned(),
        vec!["a".to_string(), "b".to_string()]
    );
}

#[test]
fn writing_does_not_fill_caches() {
    let conn = setup();
    let mut tags = SyncedList::<String>::from_structured(vec!["x".to_string()]).unwrap();
    tags.invalidate_text();
    assert_eq!(tags.state(), CacheState::StructOnly);

    conn.execute(
        "INSERT INTO profiles (id, tags) VALUES (?1, ?2);",
        params![7, tags],
    )
    .unwrap();

    assert_eq!(tags.state(), CacheState::StructOnly);
    let raw: String = conn
        .query_row("SELECT tags FROM profiles WHERE id = 7;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(raw, r#"["x"]"#);
}

#[test]
fn nullable_column_maps_to_option() {
    let conn = setup();
    let limits = SyncedMap::<String, u32>::from_text(r#"{"cpu":2}"#);

    conn.execute(
        "INSERT INTO profiles (id, tags, limits) VALUES (1, '[]', ?1), (2, '[]', NULL);",
        params![limits],
    )
    .unwrap();

    let mut stmt = conn
        .prepare("SELECT limits FROM profiles ORDER BY id ASC;")
        .unwrap();
    let rows: Vec<Option<SyncedMap<String, u32>>> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(rows.len(), 2);
    let mut first = rows[0].clone().unwrap();
    assert_eq!(first.get(&"cpu".to_string()).unwrap(), Some(2));
    assert!(rows[1].is_none());
}

#[test]
fn malformed_persisted_text_surfaces_on_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profiles.db");

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE profiles (id INTEGER PRIMARY KEY, tags TEXT NOT NULL);
             INSERT INTO profiles (id, tags) VALUES (1, '{broken');",
        )
        .unwrap();
    }

    let conn = Connection::open(&path).unwrap();
    let mut tags: SyncedList<String> = conn
        .query_row("SELECT tags FROM profiles WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();

    let err = tags.structured().unwrap_err();
    assert!(matches!(err, ContainerError::Decode { .. }));
}

use castdb_core::db::{open_db, open_db_in_memory, populate, SCHEMA_SQL};
use castdb_core::{CharacterRepository, SqliteCharacterRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_installs_schema_with_foreign_keys() {
    let conn = open_db_in_memory().unwrap();

    assert_table_exists(&conn, "actors");
    assert_table_exists(&conn, "characters");
    assert_table_exists(&conn, "scene_characters");

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn populate_loads_grail_fixture() {
    let mut conn = open_db_in_memory().unwrap();
    populate(&mut conn).unwrap();

    assert_eq!(count(&conn, "actors"), 39);
    assert_eq!(count(&conn, "characters"), 81);
    assert_eq!(count(&conn, "scene_characters"), 24);
}

#[test]
fn populate_twice_fails_and_keeps_first_load() {
    let mut conn = open_db_in_memory().unwrap();
    populate(&mut conn).unwrap();

    assert!(populate(&mut conn).is_err());
    assert_eq!(count(&conn, "characters"), 81);
}

#[test]
fn reopening_file_database_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("castdb.sqlite3");

    let mut conn = open_db(&path).unwrap();
    populate(&mut conn).unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    let repo = SqliteCharacterRepository::try_new(&conn).unwrap();
    assert_eq!(repo.list_characters(None).unwrap().len(), 81);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    assert_table_exists(&conn, "characters");
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
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

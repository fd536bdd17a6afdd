use dbsnap_store::db;
use rusqlite::Connection;

pub const SCHEMA: &str = r#"
    CREATE TABLE important_table (
        id INTEGER PRIMARY KEY,
        name TEXT
    );
    CREATE TABLE ignored_table (
        id INTEGER PRIMARY KEY,
        value TEXT
    );
    CREATE TABLE dynamic_table (
        id INTEGER PRIMARY KEY,
        description TEXT
    );
"#;

/// In-memory database with the three fixture tables, all empty
#[allow(dead_code)]
pub fn setup_db() -> Connection {
    let conn = db::open_in_memory().unwrap();
    db::execute_batch(&conn, SCHEMA).unwrap();
    conn
}

/// Seed `important_table` with its initial row
#[allow(dead_code)]
pub fn setup_data(conn: &Connection) -> dbsnap_store::Result<()> {
    db::execute_batch(
        conn,
        "INSERT INTO important_table (id, name) VALUES (1, 'Initial Name');",
    )
}

#[allow(dead_code)]
pub fn exec(conn: &Connection, sql: &str) {
    conn.execute_batch(sql).unwrap();
}

#[allow(dead_code)]
pub fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

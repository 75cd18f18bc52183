//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. The connection slot starts
//! empty so the app window can come up before the (possibly slow) first open.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared connection slot handed to repositories
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
}

impl DbState {
    pub fn new() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for DbState {
    fn default() -> Self {
        Self::new()
    }
}

/// Open (or create) the database and bring the schema up to date.
/// `:memory:` opens an in-memory database, used by tests.
pub fn open_and_migrate(db_path: &Path) -> Result<Connection, String> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory().map_err(|e| format!("Failed to open in-memory db: {}", e))?
    } else {
        Connection::open(db_path).map_err(|e| format!("Failed to open db: {}", e))?
    };

    run_migrations(&conn)?;
    Ok(conn)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS workspaces (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS nodes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            workspace_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            parent_id INTEGER,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Indexes for the two hot lookups: children-of-parent and whole-workspace
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_nodes_parent ON nodes(parent_id)",
        [],
    )
    .map_err(|e| e.to_string())?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_nodes_workspace ON nodes(workspace_id)",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Seed a default workspace so a fresh install has somewhere to put pages
    conn.execute(
        "INSERT INTO workspaces (name)
         SELECT 'Personal' WHERE NOT EXISTS (SELECT 1 FROM workspaces)",
        [],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}

//! SQLite access: one connection per request, schema bootstrap on startup.
//!
//! The server never shares a `Connection` between requests. Handlers call
//! [`Database::connect`] inside `web::block`, use the connection for the
//! duration of the request and drop it on every exit path.

use log::{debug, info};
use rusqlite::Connection;
use std::path::PathBuf;

/// Tables for templates, their fields, content items and their values.
///
/// Field and value rows cascade from their owner. `content_values.value`
/// holds the JSON text of the payload.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS page_templates (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL UNIQUE,
    description TEXT
);

CREATE TABLE IF NOT EXISTS template_fields (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL,
    data_type   TEXT    NOT NULL,
    required    INTEGER NOT NULL DEFAULT 1,
    template_id INTEGER NOT NULL REFERENCES page_templates(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS ix_template_fields_template_id ON template_fields(template_id);

CREATE TABLE IF NOT EXISTS content_items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT    NOT NULL,
    created_at  TEXT    NOT NULL,
    template_id INTEGER NOT NULL REFERENCES page_templates(id)
);
CREATE INDEX IF NOT EXISTS ix_content_items_title ON content_items(title);

CREATE TABLE IF NOT EXISTS content_values (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    item_id  INTEGER NOT NULL REFERENCES content_items(id) ON DELETE CASCADE,
    field_id INTEGER NOT NULL REFERENCES template_fields(id),
    value    TEXT
);
CREATE INDEX IF NOT EXISTS ix_content_values_item_id ON content_values(item_id);
";

/// Handle to the SQLite file, shared with handlers as `web::Data<Database>`.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens a fresh connection with foreign keys enforced.
    pub fn connect(&self) -> rusqlite::Result<Connection> {
        debug!("Opening SQLite connection to {}", self.path.display());
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }

    /// Creates any missing tables. Safe to call on every start.
    pub fn init(&self) -> rusqlite::Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        info!("Database ready at {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Database;
    use tempfile::TempDir;

    /// A migrated database in a throwaway directory. Keep the `TempDir` alive
    /// for as long as the database is used.
    pub(crate) fn temp_database() -> (TempDir, Database) {
        let dir = TempDir::new().expect("temp dir");
        let db = Database::new(dir.path().join("blog-test.db"));
        db.init().expect("schema");
        (dir, db)
    }
}

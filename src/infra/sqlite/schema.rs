use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS video (
            id            TEXT PRIMARY KEY,
            position      INTEGER NOT NULL,
            title         TEXT NOT NULL,
            description   TEXT NOT NULL,
            status        TEXT NOT NULL,
            upload_date   TEXT NOT NULL,
            thumbnail_url TEXT,
            duration      TEXT,
            views         INTEGER,
            updated_at    TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS video_tag (
            video_id  TEXT NOT NULL,
            tag_idx   INTEGER NOT NULL,
            tag       TEXT NOT NULL,
            PRIMARY KEY (video_id, tag_idx),
            FOREIGN KEY (video_id) REFERENCES video(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_video_position
            ON video(position);

        CREATE INDEX IF NOT EXISTS idx_video_status_position
            ON video(status, position);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}

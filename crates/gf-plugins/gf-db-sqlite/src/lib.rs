//! # gf-db-sqlite
//!
//! SQLite implementation of the gf-core storage ports, mapping between the
//! relational schema and the domain models. UUIDs are stored as 16-byte
//! BLOBs; block lists and member-id lists are stored as JSON TEXT.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

mod comms;
mod content;
mod meetings;
mod tasks;
mod users;

pub use comms::{SqliteAnnouncementRepo, SqliteReportRepo};
pub use content::SqliteContentRepo;
pub use meetings::{SqliteMeetingRepo, SqliteReflectionRepo};
pub use tasks::{SqliteTaskRepo, SqliteTeamRepo};
pub use users::SqliteUserRepo;

// Helpers for UUID conversion
pub(crate) fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

pub(crate) fn blob_to_uuid(blob: &[u8]) -> Uuid {
    Uuid::from_slice(blob).unwrap_or_default()
}

/// Opens (creating if missing) the database at `url` and bootstraps the
/// schema. `sqlite::memory:` is capped at one connection, since each SQLite
/// memory database is private to its connection.
pub async fn connect(url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let max_connections = if url.contains(":memory:") { 1 } else { 5 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id            BLOB PRIMARY KEY,
        name          TEXT NOT NULL,
        email         TEXT NOT NULL UNIQUE,
        role          TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at    TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS meetings (
        id          BLOB PRIMARY KEY,
        title       TEXT NOT NULL,
        theme       TEXT,
        date        TEXT NOT NULL,
        location    TEXT,
        description TEXT,
        created_at  TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS registrations (
        id                BLOB PRIMARY KEY,
        meeting_id        BLOB NOT NULL REFERENCES meetings(id) ON DELETE CASCADE,
        user_id           BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        role              TEXT,
        speech_title      TEXT,
        speech_objectives TEXT,
        attended          INTEGER NOT NULL DEFAULT 0,
        created_at        TEXT NOT NULL,
        updated_at        TEXT NOT NULL,
        UNIQUE (meeting_id, user_id)
    )",
    "CREATE TABLE IF NOT EXISTS reflections (
        id         BLOB PRIMARY KEY,
        meeting_id BLOB NOT NULL REFERENCES meetings(id) ON DELETE CASCADE,
        user_id    BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        content    TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    // Slugs are intentionally NOT unique; readers resolve a slug to the most
    // recently modified match.
    "CREATE TABLE IF NOT EXISTS pages (
        id            BLOB PRIMARY KEY,
        title         TEXT NOT NULL,
        slug          TEXT NOT NULL,
        blocks        TEXT NOT NULL,
        status        TEXT NOT NULL,
        is_published  INTEGER NOT NULL,
        last_modified TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_pages_slug ON pages (slug)",
    "CREATE TABLE IF NOT EXISTS teams (
        id          BLOB PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT,
        member_ids  TEXT NOT NULL,
        created_at  TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS tasks (
        id          BLOB PRIMARY KEY,
        title       TEXT NOT NULL,
        description TEXT,
        status      TEXT NOT NULL,
        team_id     BLOB REFERENCES teams(id) ON DELETE SET NULL,
        assignee_id BLOB REFERENCES users(id) ON DELETE SET NULL,
        due_date    TEXT,
        created_at  TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS announcements (
        id         BLOB PRIMARY KEY,
        title      TEXT NOT NULL,
        body       TEXT NOT NULL,
        created_by BLOB NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS reports (
        id         BLOB PRIMARY KEY,
        meeting_id BLOB NOT NULL REFERENCES meetings(id) ON DELETE CASCADE,
        title      TEXT NOT NULL,
        body       TEXT NOT NULL,
        created_by BLOB NOT NULL,
        created_at TEXT NOT NULL
    )",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_bootstraps_schema_on_memory_database() {
        let pool = connect("sqlite::memory:").await.unwrap();
        // All tables exist and are empty.
        for table in [
            "users",
            "meetings",
            "registrations",
            "reflections",
            "pages",
            "teams",
            "tasks",
            "announcements",
            "reports",
        ] {
            let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(&pool)
                .await
                .unwrap();
            assert_eq!(count.0, 0, "{table} should exist and be empty");
        }
    }

    #[test]
    fn uuid_blob_round_trip() {
        let id = Uuid::now_v7();
        assert_eq!(blob_to_uuid(&uuid_to_blob(id)), id);
        assert_eq!(blob_to_uuid(b"short"), Uuid::nil());
    }
}

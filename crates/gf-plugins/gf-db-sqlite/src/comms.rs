//! Announcements and meeting reports.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use gf_core::models::{Announcement, Report};
use gf_core::traits::{AnnouncementRepo, ReportRepo};

use crate::{blob_to_uuid, uuid_to_blob};

pub struct SqliteAnnouncementRepo {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_announcement(row: &SqliteRow) -> Announcement {
    Announcement {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        title: row.get("title"),
        body: row.get("body"),
        created_by: blob_to_uuid(row.get::<Vec<u8>, _>("created_by").as_slice()),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl AnnouncementRepo for SqliteAnnouncementRepo {
    async fn create_announcement(&self, announcement: &Announcement) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO announcements (id, title, body, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(announcement.id))
        .bind(&announcement.title)
        .bind(&announcement.body)
        .bind(uuid_to_blob(announcement.created_by))
        .bind(announcement.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn announcement_by_id(&self, id: Uuid) -> anyhow::Result<Option<Announcement>> {
        let row = sqlx::query("SELECT * FROM announcements WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_announcement))
    }

    async fn list_announcements(&self) -> anyhow::Result<Vec<Announcement>> {
        let rows = sqlx::query("SELECT * FROM announcements ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_announcement).collect())
    }

    async fn update_announcement(&self, announcement: &Announcement) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE announcements SET title = ?, body = ? WHERE id = ?")
            .bind(&announcement.title)
            .bind(&announcement.body)
            .bind(uuid_to_blob(announcement.id))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_announcement(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct SqliteReportRepo {
    pool: SqlitePool,
}

impl SqliteReportRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_report(row: &SqliteRow) -> Report {
    Report {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        meeting_id: blob_to_uuid(row.get::<Vec<u8>, _>("meeting_id").as_slice()),
        title: row.get("title"),
        body: row.get("body"),
        created_by: blob_to_uuid(row.get::<Vec<u8>, _>("created_by").as_slice()),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ReportRepo for SqliteReportRepo {
    async fn create_report(&self, report: &Report) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO reports (id, meeting_id, title, body, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(report.id))
        .bind(uuid_to_blob(report.meeting_id))
        .bind(&report.title)
        .bind(&report.body)
        .bind(uuid_to_blob(report.created_by))
        .bind(report.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn report_by_id(&self, id: Uuid) -> anyhow::Result<Option<Report>> {
        let row = sqlx::query("SELECT * FROM reports WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_report))
    }

    async fn list_reports(&self, meeting_id: Option<Uuid>) -> anyhow::Result<Vec<Report>> {
        let rows = match meeting_id {
            Some(meeting_id) => {
                sqlx::query("SELECT * FROM reports WHERE meeting_id = ? ORDER BY created_at DESC")
                    .bind(uuid_to_blob(meeting_id))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT * FROM reports ORDER BY created_at DESC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows.iter().map(map_report).collect())
    }
}

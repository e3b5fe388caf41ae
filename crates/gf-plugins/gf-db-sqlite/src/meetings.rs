//! Meetings, per-meeting registrations, and reflections.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use gf_core::models::{Meeting, Reflection, Registration};
use gf_core::traits::{MeetingRepo, ReflectionRepo};

use crate::{blob_to_uuid, uuid_to_blob};

pub struct SqliteMeetingRepo {
    pool: SqlitePool,
}

impl SqliteMeetingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_meeting(row: &SqliteRow) -> Meeting {
    Meeting {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        title: row.get("title"),
        theme: row.get("theme"),
        date: row.get("date"),
        location: row.get("location"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

/// Rows here come from a join with `users`, aliased as `user_name`.
fn map_registration(row: &SqliteRow) -> Registration {
    Registration {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        meeting_id: blob_to_uuid(row.get::<Vec<u8>, _>("meeting_id").as_slice()),
        user_id: blob_to_uuid(row.get::<Vec<u8>, _>("user_id").as_slice()),
        user_name: row.get("user_name"),
        role: row.get("role"),
        speech_title: row.get("speech_title"),
        speech_objectives: row.get("speech_objectives"),
        attended: row.get("attended"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl MeetingRepo for SqliteMeetingRepo {
    async fn create_meeting(&self, meeting: &Meeting) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO meetings (id, title, theme, date, location, description, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(meeting.id))
        .bind(&meeting.title)
        .bind(&meeting.theme)
        .bind(meeting.date)
        .bind(&meeting.location)
        .bind(&meeting.description)
        .bind(meeting.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn meeting_by_id(&self, id: Uuid) -> anyhow::Result<Option<Meeting>> {
        let row = sqlx::query("SELECT * FROM meetings WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_meeting))
    }

    async fn list_meetings(&self) -> anyhow::Result<Vec<Meeting>> {
        let rows = sqlx::query("SELECT * FROM meetings ORDER BY date ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_meeting).collect())
    }

    async fn update_meeting(&self, meeting: &Meeting) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE meetings SET title = ?, theme = ?, date = ?, location = ?, description = ? \
             WHERE id = ?",
        )
        .bind(&meeting.title)
        .bind(&meeting.theme)
        .bind(meeting.date)
        .bind(&meeting.location)
        .bind(&meeting.description)
        .bind(uuid_to_blob(meeting.id))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_meeting(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_registration(&self, registration: &Registration) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO registrations \
             (id, meeting_id, user_id, role, speech_title, speech_objectives, attended, \
              created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(registration.id))
        .bind(uuid_to_blob(registration.meeting_id))
        .bind(uuid_to_blob(registration.user_id))
        .bind(&registration.role)
        .bind(&registration.speech_title)
        .bind(&registration.speech_objectives)
        .bind(registration.attended)
        .bind(registration.created_at)
        .bind(registration.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn registration_for(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Registration>> {
        let row = sqlx::query(
            "SELECT r.*, u.name AS user_name FROM registrations r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.meeting_id = ? AND r.user_id = ?",
        )
        .bind(uuid_to_blob(meeting_id))
        .bind(uuid_to_blob(user_id))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_registration))
    }

    async fn update_registration(&self, registration: &Registration) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE registrations SET role = ?, speech_title = ?, speech_objectives = ?, \
             attended = ?, updated_at = ? \
             WHERE meeting_id = ? AND user_id = ?",
        )
        .bind(&registration.role)
        .bind(&registration.speech_title)
        .bind(&registration.speech_objectives)
        .bind(registration.attended)
        .bind(registration.updated_at)
        .bind(uuid_to_blob(registration.meeting_id))
        .bind(uuid_to_blob(registration.user_id))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn registrations_for_meeting(
        &self,
        meeting_id: Uuid,
    ) -> anyhow::Result<Vec<Registration>> {
        let rows = sqlx::query(
            "SELECT r.*, u.name AS user_name FROM registrations r \
             JOIN users u ON u.id = r.user_id \
             WHERE r.meeting_id = ? \
             ORDER BY r.created_at ASC",
        )
        .bind(uuid_to_blob(meeting_id))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_registration).collect())
    }

    async fn set_attendance(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        attended: bool,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE registrations SET attended = ?, updated_at = ? \
             WHERE meeting_id = ? AND user_id = ?",
        )
        .bind(attended)
        .bind(Utc::now())
        .bind(uuid_to_blob(meeting_id))
        .bind(uuid_to_blob(user_id))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct SqliteReflectionRepo {
    pool: SqlitePool,
}

impl SqliteReflectionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_reflection(row: &SqliteRow) -> Reflection {
    Reflection {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        meeting_id: blob_to_uuid(row.get::<Vec<u8>, _>("meeting_id").as_slice()),
        user_id: blob_to_uuid(row.get::<Vec<u8>, _>("user_id").as_slice()),
        user_name: row.get("user_name"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ReflectionRepo for SqliteReflectionRepo {
    async fn add_reflection(&self, reflection: &Reflection) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO reflections (id, meeting_id, user_id, content, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(reflection.id))
        .bind(uuid_to_blob(reflection.meeting_id))
        .bind(uuid_to_blob(reflection.user_id))
        .bind(&reflection.content)
        .bind(reflection.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn reflections(&self, meeting_id: Option<Uuid>) -> anyhow::Result<Vec<Reflection>> {
        let rows = match meeting_id {
            Some(meeting_id) => {
                sqlx::query(
                    "SELECT f.*, u.name AS user_name FROM reflections f \
                     JOIN users u ON u.id = f.user_id \
                     WHERE f.meeting_id = ? \
                     ORDER BY f.created_at DESC",
                )
                .bind(uuid_to_blob(meeting_id))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    "SELECT f.*, u.name AS user_name FROM reflections f \
                     JOIN users u ON u.id = f.user_id \
                     ORDER BY f.created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows.iter().map(map_reflection).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect;
    use crate::users::tests::seed_user;

    async fn seed_meeting(pool: &SqlitePool, title: &str) -> Meeting {
        let meeting = Meeting {
            id: Uuid::now_v7(),
            title: title.into(),
            theme: Some("Growth".into()),
            date: Utc::now(),
            location: Some("Room 2".into()),
            description: None,
            created_at: Utc::now(),
        };
        SqliteMeetingRepo::new(pool.clone())
            .create_meeting(&meeting)
            .await
            .unwrap();
        meeting
    }

    fn registration(meeting_id: Uuid, user_id: Uuid) -> Registration {
        Registration {
            id: Uuid::now_v7(),
            meeting_id,
            user_id,
            user_name: String::new(),
            role: Some("Speaker".into()),
            speech_title: Some("My Icebreaker".into()),
            speech_objectives: Some("Introduce yourself".into()),
            attended: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn register_then_list_with_joined_user_name() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteMeetingRepo::new(pool.clone());
        let user = seed_user(&pool, "Kai", "kai@club.org").await;
        let meeting = seed_meeting(&pool, "May Meeting").await;

        repo.create_registration(&registration(meeting.id, user.id))
            .await
            .unwrap();

        let roster = repo.registrations_for_meeting(meeting.id).await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].user_name, "Kai");
        assert_eq!(roster[0].role.as_deref(), Some("Speaker"));
        assert!(!roster[0].attended);
    }

    #[tokio::test]
    async fn second_registration_for_same_pair_violates_uniqueness() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteMeetingRepo::new(pool.clone());
        let user = seed_user(&pool, "Kai", "kai@club.org").await;
        let meeting = seed_meeting(&pool, "May Meeting").await;

        repo.create_registration(&registration(meeting.id, user.id))
            .await
            .unwrap();
        assert!(repo
            .create_registration(&registration(meeting.id, user.id))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn update_replaces_role_and_speech_fields() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteMeetingRepo::new(pool.clone());
        let user = seed_user(&pool, "Kai", "kai@club.org").await;
        let meeting = seed_meeting(&pool, "May Meeting").await;

        repo.create_registration(&registration(meeting.id, user.id))
            .await
            .unwrap();

        let mut changed = registration(meeting.id, user.id);
        changed.role = Some("Evaluator".into());
        changed.speech_title = None;
        changed.speech_objectives = None;
        assert!(repo.update_registration(&changed).await.unwrap());

        let stored = repo
            .registration_for(meeting.id, user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.role.as_deref(), Some("Evaluator"));
        assert_eq!(stored.speech_title, None);
    }

    #[tokio::test]
    async fn attendance_only_updates_existing_registrations() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteMeetingRepo::new(pool.clone());
        let user = seed_user(&pool, "Kai", "kai@club.org").await;
        let stranger = seed_user(&pool, "Noor", "noor@club.org").await;
        let meeting = seed_meeting(&pool, "May Meeting").await;

        repo.create_registration(&registration(meeting.id, user.id))
            .await
            .unwrap();

        assert!(repo.set_attendance(meeting.id, user.id, true).await.unwrap());
        assert!(!repo
            .set_attendance(meeting.id, stranger.id, true)
            .await
            .unwrap());

        let stored = repo
            .registration_for(meeting.id, user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.attended);
    }

    #[tokio::test]
    async fn deleting_a_meeting_cascades_to_registrations() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteMeetingRepo::new(pool.clone());
        let user = seed_user(&pool, "Kai", "kai@club.org").await;
        let meeting = seed_meeting(&pool, "May Meeting").await;

        repo.create_registration(&registration(meeting.id, user.id))
            .await
            .unwrap();
        assert!(repo.delete_meeting(meeting.id).await.unwrap());

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn reflections_filter_by_meeting() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteReflectionRepo::new(pool.clone());
        let user = seed_user(&pool, "Kai", "kai@club.org").await;
        let first = seed_meeting(&pool, "May Meeting").await;
        let second = seed_meeting(&pool, "June Meeting").await;

        for (meeting, text) in [(&first, "Great table topics"), (&second, "Strong evaluations")] {
            repo.add_reflection(&Reflection {
                id: Uuid::now_v7(),
                meeting_id: meeting.id,
                user_id: user.id,
                user_name: String::new(),
                content: text.into(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        }

        assert_eq!(repo.reflections(None).await.unwrap().len(), 2);
        let scoped = repo.reflections(Some(first.id)).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].content, "Great table topics");
        assert_eq!(scoped[0].user_name, "Kai");
    }
}

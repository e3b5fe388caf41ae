//! Kanban tasks and the teams they belong to. Task rows join the team name
//! in so boards render without a second query; team membership is a JSON
//! array of user ids, not a join table.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use gf_core::models::{Task, TaskStatus, Team, TeamRef};
use gf_core::traits::{TaskRepo, TeamRepo};

use crate::{blob_to_uuid, uuid_to_blob};

pub struct SqliteTaskRepo {
    pool: SqlitePool,
}

impl SqliteTaskRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const TASK_SELECT: &str = "SELECT t.*, teams.name AS team_name FROM tasks t \
                           LEFT JOIN teams ON teams.id = t.team_id";

fn map_task(row: &SqliteRow) -> Task {
    let team = row
        .get::<Option<Vec<u8>>, _>("team_id")
        .map(|blob| TeamRef {
            id: blob_to_uuid(&blob),
            name: row.get::<Option<String>, _>("team_name").unwrap_or_default(),
        });
    Task {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        title: row.get("title"),
        description: row.get("description"),
        status: TaskStatus::parse(&row.get::<String, _>("status")).unwrap_or(TaskStatus::Todo),
        team,
        assignee_id: row
            .get::<Option<Vec<u8>>, _>("assignee_id")
            .map(|blob| blob_to_uuid(&blob)),
        due_date: row.get("due_date"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl TaskRepo for SqliteTaskRepo {
    async fn create_task(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO tasks \
             (id, title, description, status, team_id, assignee_id, due_date, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(task.id))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.team.as_ref().map(|t| uuid_to_blob(t.id)))
        .bind(task.assignee_id.map(uuid_to_blob))
        .bind(task.due_date)
        .bind(task.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn task_by_id(&self, id: Uuid) -> anyhow::Result<Option<Task>> {
        let row = sqlx::query(&format!("{TASK_SELECT} WHERE t.id = ?"))
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_task))
    }

    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>> {
        let rows = sqlx::query(&format!("{TASK_SELECT} ORDER BY t.created_at ASC"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_task).collect())
    }

    async fn update_task(&self, task: &Task) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, status = ?, team_id = ?, \
             assignee_id = ?, due_date = ? \
             WHERE id = ?",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(task.team.as_ref().map(|t| uuid_to_blob(t.id)))
        .bind(task.assignee_id.map(uuid_to_blob))
        .bind(task.due_date)
        .bind(uuid_to_blob(task.id))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_task(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

pub struct SqliteTeamRepo {
    pool: SqlitePool,
}

impl SqliteTeamRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_team(row: &SqliteRow) -> Team {
    Team {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        name: row.get("name"),
        description: row.get("description"),
        member_ids: serde_json::from_str(&row.get::<String, _>("member_ids")).unwrap_or_default(),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl TeamRepo for SqliteTeamRepo {
    async fn create_team(&self, team: &Team) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO teams (id, name, description, member_ids, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(team.id))
        .bind(&team.name)
        .bind(&team.description)
        .bind(serde_json::to_string(&team.member_ids)?)
        .bind(team.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn team_by_id(&self, id: Uuid) -> anyhow::Result<Option<Team>> {
        let row = sqlx::query("SELECT * FROM teams WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_team))
    }

    async fn list_teams(&self) -> anyhow::Result<Vec<Team>> {
        let rows = sqlx::query("SELECT * FROM teams ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_team).collect())
    }

    async fn update_team(&self, team: &Team) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE teams SET name = ?, description = ?, member_ids = ? WHERE id = ?",
        )
        .bind(&team.name)
        .bind(&team.description)
        .bind(serde_json::to_string(&team.member_ids)?)
        .bind(uuid_to_blob(team.id))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_team(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

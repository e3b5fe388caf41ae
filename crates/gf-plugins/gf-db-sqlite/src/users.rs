//! Account storage over the `users` table.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use gf_core::models::{User, UserRole};
use gf_core::traits::UserRepo;

use crate::{blob_to_uuid, uuid_to_blob};

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_user(row: &SqliteRow) -> User {
    User {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        name: row.get("name"),
        email: row.get("email"),
        role: UserRole::parse(&row.get::<String, _>("role")).unwrap_or(UserRole::Member),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl UserRepo for SqliteUserRepo {
    async fn create_user(&self, user: &User, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO users (id, name, email, role, password_hash, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(user.id))
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn credentials_by_email(&self, email: &str) -> anyhow::Result<Option<(User, String)>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row
            .as_ref()
            .map(|row| (map_user(row), row.get("password_hash"))))
    }

    async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_user).collect())
    }

    async fn update_user(&self, user: &User, password_hash: Option<&str>) -> anyhow::Result<bool> {
        let result = match password_hash {
            Some(hash) => {
                sqlx::query(
                    "UPDATE users SET name = ?, email = ?, role = ?, password_hash = ? \
                     WHERE id = ?",
                )
                .bind(&user.name)
                .bind(&user.email)
                .bind(user.role.as_str())
                .bind(hash)
                .bind(uuid_to_blob(user.id))
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query("UPDATE users SET name = ?, email = ?, role = ? WHERE id = ?")
                    .bind(&user.name)
                    .bind(&user.email)
                    .bind(user.role.as_str())
                    .bind(uuid_to_blob(user.id))
                    .execute(&self.pool)
                    .await?
            }
        };
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

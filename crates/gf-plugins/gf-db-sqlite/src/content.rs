//! CMS page storage. Block lists are persisted as a JSON TEXT column; the
//! relational layer never looks inside them.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use gf_core::models::{ContentPage, PageStatus};
use gf_core::traits::ContentRepo;

use crate::{blob_to_uuid, uuid_to_blob};

pub struct SqliteContentRepo {
    pool: SqlitePool,
}

impl SqliteContentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_page(row: &SqliteRow) -> ContentPage {
    ContentPage {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        title: row.get("title"),
        slug: row.get("slug"),
        blocks: serde_json::from_str(&row.get::<String, _>("blocks")).unwrap_or_default(),
        status: PageStatus::parse(&row.get::<String, _>("status")).unwrap_or(PageStatus::Draft),
        is_published: row.get("is_published"),
        last_modified: row.get("last_modified"),
    }
}

#[async_trait]
impl ContentRepo for SqliteContentRepo {
    async fn create_page(&self, page: &ContentPage) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO pages (id, title, slug, blocks, status, is_published, last_modified) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(page.id))
        .bind(&page.title)
        .bind(&page.slug)
        .bind(serde_json::to_string(&page.blocks)?)
        .bind(page.status.as_str())
        .bind(page.is_published)
        .bind(page.last_modified)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn replace_page(&self, page: &ContentPage) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE pages SET title = ?, slug = ?, blocks = ?, status = ?, is_published = ?, \
             last_modified = ? \
             WHERE id = ?",
        )
        .bind(&page.title)
        .bind(&page.slug)
        .bind(serde_json::to_string(&page.blocks)?)
        .bind(page.status.as_str())
        .bind(page.is_published)
        .bind(page.last_modified)
        .bind(uuid_to_blob(page.id))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn page_by_id(&self, id: Uuid) -> anyhow::Result<Option<ContentPage>> {
        let row = sqlx::query("SELECT * FROM pages WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_page))
    }

    async fn page_by_slug(
        &self,
        slug: &str,
        published_only: bool,
    ) -> anyhow::Result<Option<ContentPage>> {
        // Slugs can collide; the most recently modified page wins.
        let sql = if published_only {
            "SELECT * FROM pages WHERE slug = ? AND is_published = 1 \
             ORDER BY last_modified DESC LIMIT 1"
        } else {
            "SELECT * FROM pages WHERE slug = ? ORDER BY last_modified DESC LIMIT 1"
        };
        let row = sqlx::query(sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_page))
    }

    async fn list_pages(&self) -> anyhow::Result<Vec<ContentPage>> {
        let rows = sqlx::query("SELECT * FROM pages ORDER BY last_modified DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(map_page).collect())
    }

    async fn delete_page(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM pages WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect;
    use chrono::{Duration, Utc};
    use gf_core::blocks::{BlockPayload, ContentBlock};

    fn page(title: &str, status: PageStatus) -> ContentPage {
        ContentPage {
            id: Uuid::now_v7(),
            title: title.into(),
            slug: gf_core::models::slugify(title),
            blocks: vec![
                ContentBlock {
                    id: "1".into(),
                    payload: BlockPayload::Title {
                        title: title.into(),
                    },
                },
                ContentBlock {
                    id: "2".into(),
                    payload: BlockPayload::Text {
                        body: "We meet fortnightly.".into(),
                    },
                },
            ],
            status,
            is_published: status == PageStatus::Published,
            last_modified: Utc::now(),
        }
    }

    #[tokio::test]
    async fn blocks_survive_the_json_column() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteContentRepo::new(pool);
        let original = page("About Us", PageStatus::Published);
        repo.create_page(&original).await.unwrap();

        let stored = repo.page_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.blocks, original.blocks);
        assert_eq!(stored.slug, "about-us");
        assert!(stored.is_published);
    }

    #[tokio::test]
    async fn slug_lookup_honors_published_only() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteContentRepo::new(pool);
        let draft = page("Mentoring", PageStatus::Draft);
        repo.create_page(&draft).await.unwrap();

        assert!(repo
            .page_by_slug("mentoring", true)
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .page_by_slug("mentoring", false)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn colliding_slugs_resolve_to_most_recently_modified() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteContentRepo::new(pool);

        let mut older = page("About Us", PageStatus::Published);
        older.last_modified = Utc::now() - Duration::hours(2);
        let newer = page("About Us", PageStatus::Published);
        repo.create_page(&older).await.unwrap();
        repo.create_page(&newer).await.unwrap();

        let found = repo.page_by_slug("about-us", true).await.unwrap().unwrap();
        assert_eq!(found.id, newer.id);
    }

    #[tokio::test]
    async fn replace_rewrites_every_field() {
        let pool = connect("sqlite::memory:").await.unwrap();
        let repo = SqliteContentRepo::new(pool);
        let mut stored = page("About Us", PageStatus::Draft);
        repo.create_page(&stored).await.unwrap();

        stored.title = "About the Club".into();
        stored.slug = "about-the-club".into();
        stored.blocks.pop();
        stored = stored.with_status(PageStatus::Published);
        assert!(repo.replace_page(&stored).await.unwrap());

        let fetched = repo.page_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "About the Club");
        assert_eq!(fetched.blocks.len(), 1);
        assert_eq!(fetched.status, PageStatus::Published);

        let ghost = page("Ghost", PageStatus::Draft);
        assert!(!repo.replace_page(&ghost).await.unwrap());
    }
}

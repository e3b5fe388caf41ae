//! CMS pages: block-based editing, previews, and the public read side.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;

use gf_core::error::AppError;
use gf_core::models::{slugify, ContentPage, PageSave, PageStatus};

use crate::error::{ApiError, ApiResult};
use crate::extract::CurrentUser;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<ContentPage>>> {
    user.require_exco()?;
    Ok(Json(state.content.list_pages().await?))
}

pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<PageSave>,
) -> ApiResult<(StatusCode, Json<ContentPage>)> {
    user.require_exco()?;
    req.validate()?;

    // Clients send slug and lastModified too; both are recomputed here so a
    // stale editor tab cannot smuggle in its own values.
    let title = req.title.trim().to_string();
    let page = ContentPage {
        id: Uuid::now_v7(),
        slug: slugify(&title),
        title,
        blocks: req.blocks,
        status: PageStatus::Draft,
        is_published: false,
        last_modified: Utc::now(),
    }
    .with_status(req.resolved_status());

    state.content.create_page(&page).await?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// Resolves `/api/content/{key}`: a UUID key is an id lookup (drafts
/// included, token required), anything else is a slug lookup that only sees
/// drafts when the caller is authenticated.
pub async fn show(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(key): Path<String>,
) -> ApiResult<Json<ContentPage>> {
    let page = match Uuid::parse_str(&key) {
        Ok(id) => {
            if user.is_none() {
                return Err(AppError::Unauthorized("Authentication required".into()).into());
            }
            state.content.page_by_id(id).await?
        }
        Err(_) => {
            state
                .content
                .page_by_slug(&key, user.is_none())
                .await?
        }
    };
    let page = page.ok_or_else(|| AppError::not_found("Page"))?;
    Ok(Json(page))
}

/// Wholesale replace. The editor always submits the full ordered block list.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(key): Path<String>,
    Json(req): Json<PageSave>,
) -> ApiResult<Json<ContentPage>> {
    user.require_exco()?;
    let id = Uuid::parse_str(&key).map_err(|_| AppError::not_found("Page"))?;
    req.validate()?;

    let existing = state
        .content
        .page_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Page"))?;

    let title = req.title.trim().to_string();
    let page = ContentPage {
        id: existing.id,
        slug: slugify(&title),
        title,
        blocks: req.blocks,
        status: PageStatus::Draft,
        is_published: false,
        last_modified: Utc::now(),
    }
    .with_status(req.resolved_status());

    if !state.content.replace_page(&page).await? {
        return Err(AppError::not_found("Page").into());
    }
    Ok(Json(page))
}

pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(key): Path<String>,
) -> ApiResult<StatusCode> {
    user.require_exco()?;
    let id = Uuid::parse_str(&key).map_err(|_| AppError::not_found("Page"))?;
    if !state.content.delete_page(id).await? {
        return Err(AppError::not_found("Page").into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Draft-safe HTML preview for the editor's preview pane.
pub async fn preview(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(key): Path<String>,
) -> ApiResult<Html<String>> {
    user.require_exco()?;
    let id = Uuid::parse_str(&key).map_err(|_| AppError::not_found("Page"))?;
    let page = state
        .content
        .page_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Page"))?;

    let html = gf_ui::render_preview(&page)
        .map_err(|err| ApiError(AppError::Internal(err.to_string())))?;
    Ok(Html(html))
}

/// The public server-rendered page. Drafts do not exist on this surface.
pub async fn public_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Html<String>> {
    let page = state
        .content
        .page_by_slug(&slug, true)
        .await?
        .ok_or_else(|| AppError::not_found("Page"))?;

    let html = gf_ui::render_page(&page)
        .map_err(|err| ApiError(AppError::Internal(err.to_string())))?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use gf_core::blocks::{BlockPayload, ContentBlock};
    use gf_core::models::UserRole;

    use super::*;
    use crate::router;
    use crate::test_support::{authorize, request, Mocks};

    fn published_page(slug: &str) -> ContentPage {
        ContentPage {
            id: Uuid::now_v7(),
            title: "About Us".into(),
            slug: slug.into(),
            blocks: vec![ContentBlock {
                id: "1".into(),
                payload: BlockPayload::Title {
                    title: "About Us".into(),
                },
            }],
            status: PageStatus::Draft,
            is_published: false,
            last_modified: Utc::now(),
        }
        .with_status(PageStatus::Published)
    }

    #[tokio::test]
    async fn create_recomputes_slug_and_ignores_client_values() {
        let mut mocks = Mocks::default();
        authorize(&mut mocks, UserRole::Exco);
        mocks.content.expect_create_page().returning(|_| Ok(()));

        let body = json!({
            "title": "  Meeting Notes 2026 ",
            "slug": "attacker-chosen",
            "blocks": [],
            "status": "published",
            "lastModified": "1999-01-01T00:00:00Z"
        });
        let (status, body) = request(
            router(mocks.build()),
            "POST",
            "/api/content",
            Some("token"),
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["slug"], "meeting-notes-2026");
        assert_eq!(body["title"], "Meeting Notes 2026");
        assert_eq!(body["isPublished"], true);
        assert_ne!(body["lastModified"], "1999-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn anonymous_slug_read_sees_published_only() {
        let mut mocks = Mocks::default();
        mocks
            .content
            .expect_page_by_slug()
            .withf(|slug, published_only| slug == "about-us" && *published_only)
            .returning(|slug, _| Ok(Some(published_page(slug))));

        let (status, body) = request(
            router(mocks.build()),
            "GET",
            "/api/content/about-us",
            None,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slug"], "about-us");
        assert_eq!(body["status"], "published");
    }

    #[tokio::test]
    async fn anonymous_id_read_is_unauthorized() {
        let mocks = Mocks::default();
        let (status, body) = request(
            router(mocks.build()),
            "GET",
            &format!("/api/content/{}", Uuid::now_v7()),
            None,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Authentication required");
    }

    #[tokio::test]
    async fn authenticated_slug_read_includes_drafts() {
        let mut mocks = Mocks::default();
        authorize(&mut mocks, UserRole::Member);
        mocks
            .content
            .expect_page_by_slug()
            .withf(|slug, published_only| slug == "draft-page" && !*published_only)
            .returning(|slug, _| {
                Ok(Some(
                    published_page(slug).with_status(PageStatus::Draft),
                ))
            });

        let (status, body) = request(
            router(mocks.build()),
            "GET",
            "/api/content/draft-page",
            Some("token"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "draft");
        assert_eq!(body["isPublished"], false);
    }

    #[tokio::test]
    async fn public_page_renders_html() {
        let mut mocks = Mocks::default();
        mocks
            .content
            .expect_page_by_slug()
            .returning(|slug, _| Ok(Some(published_page(slug))));

        let (status, body) =
            request(router(mocks.build()), "GET", "/pages/about-us", None, None).await;

        assert_eq!(status, StatusCode::OK);
        let html = body.as_str().unwrap_or_default().to_string();
        assert!(html.contains("<h1 class=\"block-heading\">About Us</h1>"));
        assert!(html.contains("About Us | GavelFlow"));
    }

    #[tokio::test]
    async fn public_page_hides_drafts() {
        let mut mocks = Mocks::default();
        mocks
            .content
            .expect_page_by_slug()
            .withf(|_, published_only| *published_only)
            .returning(|_, _| Ok(None));

        let (status, body) =
            request(router(mocks.build()), "GET", "/pages/secret-draft", None, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Page not found");
    }

    #[tokio::test]
    async fn preview_is_committee_only() {
        let mut mocks = Mocks::default();
        authorize(&mut mocks, UserRole::Member);

        let (status, _) = request(
            router(mocks.build()),
            "GET",
            &format!("/api/content/{}/preview", Uuid::now_v7()),
            Some("token"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

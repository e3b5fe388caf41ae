//! # gf-api
//!
//! The REST routing and orchestration layer for GavelFlow.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::services::ServeDir;

use gf_core::traits::{
    AnnouncementRepo, Authenticator, ContentRepo, MediaStore, MeetingRepo, ReflectionRepo,
    ReportRepo, TaskRepo, TeamRepo, UserRepo,
};

/// State shared across all handlers. Every port is a trait object so the
/// binary decides which plugins to wire in.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub meetings: Arc<dyn MeetingRepo>,
    pub reflections: Arc<dyn ReflectionRepo>,
    pub content: Arc<dyn ContentRepo>,
    pub tasks: Arc<dyn TaskRepo>,
    pub teams: Arc<dyn TeamRepo>,
    pub announcements: Arc<dyn AnnouncementRepo>,
    pub reports: Arc<dyn ReportRepo>,
    pub auth: Arc<dyn Authenticator>,
    pub media: Arc<dyn MediaStore>,
}

/// Builds the REST router.
///
/// Content reads live on two surfaces: `/api/content/{key}` accepts a page id
/// or a slug, and `/pages/{slug}` is the server-rendered public view.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/users", get(handlers::users::list))
        .route(
            "/api/users/{id}",
            get(handlers::users::show)
                .put(handlers::users::update)
                .delete(handlers::users::remove),
        )
        .route(
            "/api/meetings",
            get(handlers::meetings::list).post(handlers::meetings::create),
        )
        .route(
            "/api/meetings/{id}",
            get(handlers::meetings::show)
                .put(handlers::meetings::update)
                .delete(handlers::meetings::remove),
        )
        .route(
            "/api/meetings/{id}/register",
            post(handlers::meetings::register).put(handlers::meetings::update_registration),
        )
        .route(
            "/api/meetings/{id}/registrations",
            get(handlers::meetings::registrations),
        )
        .route(
            "/api/meetings/{id}/attendance",
            put(handlers::meetings::attendance),
        )
        .route(
            "/api/reflections",
            get(handlers::reflections::list).post(handlers::reflections::create),
        )
        .route(
            "/api/content",
            get(handlers::content::list).post(handlers::content::create),
        )
        .route(
            "/api/content/{key}",
            get(handlers::content::show)
                .put(handlers::content::update)
                .delete(handlers::content::remove),
        )
        .route(
            "/api/content/{key}/preview",
            get(handlers::content::preview),
        )
        .route("/pages/{slug}", get(handlers::content::public_page))
        .route(
            "/api/tasks",
            get(handlers::tasks::list).post(handlers::tasks::create),
        )
        .route(
            "/api/tasks/{id}",
            put(handlers::tasks::update).delete(handlers::tasks::remove),
        )
        .route(
            "/api/teams",
            get(handlers::teams::list).post(handlers::teams::create),
        )
        .route(
            "/api/teams/{id}",
            put(handlers::teams::update).delete(handlers::teams::remove),
        )
        .route(
            "/api/announcements",
            get(handlers::announcements::list).post(handlers::announcements::create),
        )
        .route(
            "/api/announcements/{id}",
            put(handlers::announcements::update).delete(handlers::announcements::remove),
        )
        .route(
            "/api/reports",
            get(handlers::reports::list).post(handlers::reports::create),
        )
        .route("/api/reports/{id}", get(handlers::reports::show))
        .route("/api/uploads", post(handlers::uploads::create))
        .layer(middleware::trace_layer())
        .layer(middleware::cors_policy())
        .with_state(state)
}

/// The full application: the REST API plus the public uploads tree.
pub fn app(state: AppState, uploads_root: &Path) -> Router {
    router(state).nest_service("/static/uploads", ServeDir::new(uploads_root))
}

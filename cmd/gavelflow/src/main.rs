//! # GavelFlow Binary
//!
//! The entry point that assembles the application from its plugin crates.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use gf_api::AppState;
use gf_auth_jwt::JwtAuthenticator;
use gf_config::Settings;
use gf_db_sqlite::{
    connect, SqliteAnnouncementRepo, SqliteContentRepo, SqliteMeetingRepo, SqliteReflectionRepo,
    SqliteReportRepo, SqliteTaskRepo, SqliteTeamRepo, SqliteUserRepo,
};
use gf_storage_local::LocalMediaStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration first; it also loads .env.
    let settings = Settings::load().context("loading configuration")?;
    init_tracing(&settings);
    if settings.auth.uses_dev_secret() {
        tracing::warn!("auth.jwt_secret is the built-in development default");
    }

    // 2. Database pool; the schema is bootstrapped on connect.
    let pool = connect(&settings.database.url)
        .await
        .context("opening database")?;

    // 3. Plugin assembly behind the core ports.
    let auth = JwtAuthenticator::new(
        settings.auth.jwt_secret.expose_secret().as_bytes(),
        settings.auth.token_ttl_hours,
    );
    let media = LocalMediaStore::new(
        settings.media.root.clone(),
        settings.media.url_prefix.clone(),
    );
    let state = AppState {
        users: Arc::new(SqliteUserRepo::new(pool.clone())),
        meetings: Arc::new(SqliteMeetingRepo::new(pool.clone())),
        reflections: Arc::new(SqliteReflectionRepo::new(pool.clone())),
        content: Arc::new(SqliteContentRepo::new(pool.clone())),
        tasks: Arc::new(SqliteTaskRepo::new(pool.clone())),
        teams: Arc::new(SqliteTeamRepo::new(pool.clone())),
        announcements: Arc::new(SqliteAnnouncementRepo::new(pool.clone())),
        reports: Arc::new(SqliteReportRepo::new(pool)),
        auth: Arc::new(auth),
        media: Arc::new(media),
    };

    // 4. Serve.
    let app = gf_api::app(state, &settings.media.root);
    let addr = settings.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("🚀 GavelFlow listening on http://{addr}");
    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if settings.log.json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

//! gavelflow/crates/gf-config/src/lib.rs
//!
//! Layered runtime configuration: built-in defaults, then an optional
//! `gavelflow.toml`, then `GAVELFLOW__*` environment variables (for example
//! `GAVELFLOW__SERVER__PORT=9000`). A `.env` file is honored when present.

use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::PathBuf;

const DEV_JWT_SECRET: &str = "gavelflow-dev-secret";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub media: MediaSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// sqlx connection URL, e.g. `sqlite://gavelflow.db` or `sqlite::memory:`.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,
    pub token_ttl_hours: i64,
}

impl AuthSettings {
    /// True while running on the built-in development secret. The binary
    /// logs a warning for this after tracing is up.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret.expose_secret() == DEV_JWT_SECRET
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaSettings {
    /// Directory uploads are written under.
    pub root: PathBuf,
    /// Public URL prefix the same files are served from.
    pub url_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Settings {
    /// Loads settings from defaults, `gavelflow.toml` (if present) and the
    /// `GAVELFLOW` environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "sqlite://gavelflow.db")?
            .set_default("auth.jwt_secret", DEV_JWT_SECRET)?
            .set_default("auth.token_ttl_hours", 24)?
            .set_default("media.root", "data/uploads")?
            .set_default("media.url_prefix", "/static/uploads")?
            .set_default("log.json", false)?
            .add_source(File::with_name("gavelflow").required(false))
            .add_source(Environment::with_prefix("GAVELFLOW").separator("__"))
            .build()?
            .try_deserialize()
    }
}

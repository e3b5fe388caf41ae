//! Boots the full server stack on an OS-assigned port and hands back typed
//! clients, wired the same way the operator binary wires it.

#![allow(dead_code)] // not every test binary uses every helper

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::net::TcpListener;
use uuid::Uuid;

use gf_api::AppState;
use gf_auth_jwt::JwtAuthenticator;
use gf_client::ApiClient;
use gf_core::models::{User, UserRole};
use gf_core::traits::{Authenticator, UserRepo};
use gf_db_sqlite::{
    connect, SqliteAnnouncementRepo, SqliteContentRepo, SqliteMeetingRepo, SqliteReflectionRepo,
    SqliteReportRepo, SqliteTaskRepo, SqliteTeamRepo, SqliteUserRepo,
};
use gf_storage_local::LocalMediaStore;

pub const EXCO_EMAIL: &str = "chair@club.test";
pub const EXCO_PASSWORD: &str = "chair-pass-1";

pub struct TestServer {
    pub addr: SocketAddr,
    pub uploads_root: PathBuf,
}

pub async fn spawn_server() -> TestServer {
    let pool = connect("sqlite::memory:").await.expect("in-memory database");
    let uploads_root = std::env::temp_dir().join(format!("gavelflow-e2e-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&uploads_root).expect("uploads dir");

    let auth = JwtAuthenticator::new(b"e2e-secret", 1);

    // The committee account is provisioned out of band, like cmd/seed does;
    // the register route only ever creates regular members.
    let users = SqliteUserRepo::new(pool.clone());
    let chair = User {
        id: Uuid::now_v7(),
        name: "Priya Sharma".into(),
        email: EXCO_EMAIL.into(),
        role: UserRole::Exco,
        created_at: Utc::now(),
    };
    let hash = auth.hash_password(EXCO_PASSWORD).expect("hash");
    users.create_user(&chair, &hash).await.expect("seed exco");

    let state = AppState {
        users: Arc::new(users),
        meetings: Arc::new(SqliteMeetingRepo::new(pool.clone())),
        reflections: Arc::new(SqliteReflectionRepo::new(pool.clone())),
        content: Arc::new(SqliteContentRepo::new(pool.clone())),
        tasks: Arc::new(SqliteTaskRepo::new(pool.clone())),
        teams: Arc::new(SqliteTeamRepo::new(pool.clone())),
        announcements: Arc::new(SqliteAnnouncementRepo::new(pool.clone())),
        reports: Arc::new(SqliteReportRepo::new(pool)),
        auth: Arc::new(auth),
        media: Arc::new(LocalMediaStore::new(
            uploads_root.clone(),
            "/static/uploads".into(),
        )),
    };

    let app = gf_api::app(state, &uploads_root);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server task");
    });

    TestServer { addr, uploads_root }
}

impl TestServer {
    /// A fresh client with no token attached.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(format!("http://{}", self.addr))
    }

    /// Logged in as the seeded committee chair.
    pub async fn exco(&self) -> ApiClient {
        let mut client = self.client();
        client
            .login(EXCO_EMAIL, EXCO_PASSWORD)
            .await
            .expect("exco login");
        client
    }

    /// Registers a brand-new member and returns their logged-in client.
    pub async fn member(&self, name: &str, email: &str) -> ApiClient {
        let mut client = self.client();
        client
            .register(name, email, "member-pass-1")
            .await
            .expect("member signup");
        client
    }
}

//! # gf-client
//!
//! Typed REST client for the GavelFlow API. Used by operator tooling and the
//! end-to-end tests; one method per route, bearer token carried after login.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use gf_core::models::{
    Announcement, AnnouncementCreate, AnnouncementUpdate, AttendanceUpdate, AuthResponse,
    ContentPage, LoginRequest, Meeting, MeetingCreate, MeetingUpdate, PageSave, Reflection,
    ReflectionCreate, RegisterRequest, Registration, RegistrationCreate, RegistrationUpdate,
    Report, ReportCreate, Task, TaskCreate, TaskUpdate, Team, TeamCreate, TeamUpdate,
    UploadedFile, User, UserUpdate,
};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error body; `message` is what a UI would
    /// show the member.
    #[error("{message} (HTTP {status})")]
    Api { status: StatusCode, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// One client per base URL. `register`/`login` store the returned token, so
/// a freshly authenticated client can go straight to protected routes.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(ClientError::Api { status, message })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(self.http.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .execute(self.http.post(self.url(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .execute(self.http.put(self.url(path)).json(body))
            .await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.execute(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    // ── Auth ────────────────────────────────────────────────────────────

    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let body = RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        };
        let auth: AuthResponse = self.post_json("/api/auth/register", &body).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            email: email.into(),
            password: password.into(),
        };
        let auth: AuthResponse = self.post_json("/api/auth/login", &body).await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn me(&self) -> Result<User> {
        self.get_json("/api/auth/me").await
    }

    // ── Members ─────────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.get_json("/api/users").await
    }

    pub async fn user(&self, id: Uuid) -> Result<User> {
        self.get_json(&format!("/api/users/{id}")).await
    }

    pub async fn update_user(&self, id: Uuid, patch: &UserUpdate) -> Result<User> {
        self.put_json(&format!("/api/users/{id}"), patch).await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/users/{id}")).await
    }

    // ── Meetings ────────────────────────────────────────────────────────

    pub async fn create_meeting(&self, meeting: &MeetingCreate) -> Result<Meeting> {
        self.post_json("/api/meetings", meeting).await
    }

    pub async fn list_meetings(&self) -> Result<Vec<Meeting>> {
        self.get_json("/api/meetings").await
    }

    pub async fn meeting(&self, id: Uuid) -> Result<Meeting> {
        self.get_json(&format!("/api/meetings/{id}")).await
    }

    pub async fn update_meeting(&self, id: Uuid, patch: &MeetingUpdate) -> Result<Meeting> {
        self.put_json(&format!("/api/meetings/{id}"), patch).await
    }

    pub async fn delete_meeting(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/meetings/{id}")).await
    }

    pub async fn register_for_meeting(
        &self,
        meeting_id: Uuid,
        signup: &RegistrationCreate,
    ) -> Result<Registration> {
        self.post_json(&format!("/api/meetings/{meeting_id}/register"), signup)
            .await
    }

    pub async fn update_registration(
        &self,
        meeting_id: Uuid,
        update: &RegistrationUpdate,
    ) -> Result<Registration> {
        self.put_json(&format!("/api/meetings/{meeting_id}/register"), update)
            .await
    }

    pub async fn registrations(&self, meeting_id: Uuid) -> Result<Vec<Registration>> {
        self.get_json(&format!("/api/meetings/{meeting_id}/registrations"))
            .await
    }

    pub async fn set_attendance(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
        attended: bool,
    ) -> Result<()> {
        let body = AttendanceUpdate {
            user_id: Some(user_id),
            attended,
        };
        self.execute(
            self.http
                .put(self.url(&format!("/api/meetings/{meeting_id}/attendance")))
                .json(&body),
        )
        .await?;
        Ok(())
    }

    // ── Reflections ─────────────────────────────────────────────────────

    pub async fn add_reflection(&self, reflection: &ReflectionCreate) -> Result<Reflection> {
        self.post_json("/api/reflections", reflection).await
    }

    pub async fn reflections(&self, meeting_id: Option<Uuid>) -> Result<Vec<Reflection>> {
        let request = self.http.get(self.url("/api/reflections"));
        let request = match meeting_id {
            Some(id) => request.query(&[("meetingId", id.to_string())]),
            None => request,
        };
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    // ── Content pages ───────────────────────────────────────────────────

    pub async fn create_page(&self, page: &PageSave) -> Result<ContentPage> {
        self.post_json("/api/content", page).await
    }

    pub async fn list_pages(&self) -> Result<Vec<ContentPage>> {
        self.get_json("/api/content").await
    }

    /// `key` is a page id or a slug; the server decides.
    pub async fn page(&self, key: &str) -> Result<ContentPage> {
        self.get_json(&format!("/api/content/{key}")).await
    }

    pub async fn update_page(&self, id: Uuid, page: &PageSave) -> Result<ContentPage> {
        self.put_json(&format!("/api/content/{id}"), page).await
    }

    pub async fn delete_page(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/content/{id}")).await
    }

    pub async fn preview_html(&self, id: Uuid) -> Result<String> {
        let response = self
            .execute(self.http.get(self.url(&format!("/api/content/{id}/preview"))))
            .await?;
        Ok(response.text().await?)
    }

    /// The public server-rendered page.
    pub async fn public_page_html(&self, slug: &str) -> Result<String> {
        let response = self
            .execute(self.http.get(self.url(&format!("/pages/{slug}"))))
            .await?;
        Ok(response.text().await?)
    }

    // ── Tasks and teams ─────────────────────────────────────────────────

    pub async fn create_task(&self, task: &TaskCreate) -> Result<Task> {
        self.post_json("/api/tasks", task).await
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.get_json("/api/tasks").await
    }

    pub async fn update_task(&self, id: Uuid, patch: &TaskUpdate) -> Result<Task> {
        self.put_json(&format!("/api/tasks/{id}"), patch).await
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/tasks/{id}")).await
    }

    pub async fn create_team(&self, team: &TeamCreate) -> Result<Team> {
        self.post_json("/api/teams", team).await
    }

    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        self.get_json("/api/teams").await
    }

    pub async fn update_team(&self, id: Uuid, patch: &TeamUpdate) -> Result<Team> {
        self.put_json(&format!("/api/teams/{id}"), patch).await
    }

    pub async fn delete_team(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/teams/{id}")).await
    }

    // ── Announcements and reports ───────────────────────────────────────

    pub async fn create_announcement(
        &self,
        announcement: &AnnouncementCreate,
    ) -> Result<Announcement> {
        self.post_json("/api/announcements", announcement).await
    }

    pub async fn list_announcements(&self) -> Result<Vec<Announcement>> {
        self.get_json("/api/announcements").await
    }

    pub async fn update_announcement(
        &self,
        id: Uuid,
        patch: &AnnouncementUpdate,
    ) -> Result<Announcement> {
        self.put_json(&format!("/api/announcements/{id}"), patch).await
    }

    pub async fn delete_announcement(&self, id: Uuid) -> Result<()> {
        self.delete(&format!("/api/announcements/{id}")).await
    }

    pub async fn create_report(&self, report: &ReportCreate) -> Result<Report> {
        self.post_json("/api/reports", report).await
    }

    pub async fn report(&self, id: Uuid) -> Result<Report> {
        self.get_json(&format!("/api/reports/{id}")).await
    }

    pub async fn reports(&self, meeting_id: Option<Uuid>) -> Result<Vec<Report>> {
        let request = self.http.get(self.url("/api/reports"));
        let request = match meeting_id {
            Some(id) => request.query(&[("meetingId", id.to_string())]),
            None => request,
        };
        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    // ── Uploads ─────────────────────────────────────────────────────────

    pub async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<UploadedFile> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .execute(self.http.post(self.url("/api/uploads")).multipart(form))
            .await?;
        Ok(response.json().await?)
    }
}

//! # Ports
//!
//! The traits the HTTP layer talks to. Adapters live in `gf-plugins`;
//! tests substitute mockall doubles (enable the `testing` feature).

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Announcement, ContentPage, Meeting, Reflection, Registration, Report, Task, Team, TokenClaims,
    User,
};

/// Account storage. Password hashes never ride on the [`User`] model; they
/// are passed alongside it and only surface through `credentials_by_email`.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create_user(&self, user: &User, password_hash: &str) -> Result<()>;
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// The user plus their stored password hash, for login verification.
    async fn credentials_by_email(&self, email: &str) -> Result<Option<(User, String)>>;
    async fn list_users(&self) -> Result<Vec<User>>;
    /// Wholesale profile update; a new password hash replaces the old one
    /// only when given. False when no such user exists.
    async fn update_user(&self, user: &User, password_hash: Option<&str>) -> Result<bool>;
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
}

/// Meetings plus their per-user registrations and attendance marks.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait MeetingRepo: Send + Sync {
    async fn create_meeting(&self, meeting: &Meeting) -> Result<()>;
    async fn meeting_by_id(&self, id: Uuid) -> Result<Option<Meeting>>;
    async fn list_meetings(&self) -> Result<Vec<Meeting>>;
    async fn update_meeting(&self, meeting: &Meeting) -> Result<bool>;
    async fn delete_meeting(&self, id: Uuid) -> Result<bool>;

    async fn create_registration(&self, registration: &Registration) -> Result<()>;
    async fn registration_for(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Registration>>;
    async fn update_registration(&self, registration: &Registration) -> Result<bool>;
    async fn registrations_for_meeting(&self, meeting_id: Uuid) -> Result<Vec<Registration>>;
    /// Marks a registration attended or absent. False when the user never
    /// registered for the meeting.
    async fn set_attendance(&self, meeting_id: Uuid, user_id: Uuid, attended: bool)
        -> Result<bool>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ReflectionRepo: Send + Sync {
    async fn add_reflection(&self, reflection: &Reflection) -> Result<()>;
    /// All reflections, newest first, optionally scoped to one meeting.
    async fn reflections(&self, meeting_id: Option<Uuid>) -> Result<Vec<Reflection>>;
}

/// CMS page storage. Slugs are not unique; `page_by_slug` resolves to the
/// most recently modified match.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ContentRepo: Send + Sync {
    async fn create_page(&self, page: &ContentPage) -> Result<()>;
    /// Replaces every stored field of the page. False when the id is unknown.
    async fn replace_page(&self, page: &ContentPage) -> Result<bool>;
    async fn page_by_id(&self, id: Uuid) -> Result<Option<ContentPage>>;
    async fn page_by_slug(&self, slug: &str, published_only: bool) -> Result<Option<ContentPage>>;
    async fn list_pages(&self) -> Result<Vec<ContentPage>>;
    async fn delete_page(&self, id: Uuid) -> Result<bool>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait TaskRepo: Send + Sync {
    async fn create_task(&self, task: &Task) -> Result<()>;
    async fn task_by_id(&self, id: Uuid) -> Result<Option<Task>>;
    async fn list_tasks(&self) -> Result<Vec<Task>>;
    async fn update_task(&self, task: &Task) -> Result<bool>;
    async fn delete_task(&self, id: Uuid) -> Result<bool>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait TeamRepo: Send + Sync {
    async fn create_team(&self, team: &Team) -> Result<()>;
    async fn team_by_id(&self, id: Uuid) -> Result<Option<Team>>;
    async fn list_teams(&self) -> Result<Vec<Team>>;
    async fn update_team(&self, team: &Team) -> Result<bool>;
    async fn delete_team(&self, id: Uuid) -> Result<bool>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait AnnouncementRepo: Send + Sync {
    async fn create_announcement(&self, announcement: &Announcement) -> Result<()>;
    async fn announcement_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    async fn list_announcements(&self) -> Result<Vec<Announcement>>;
    async fn update_announcement(&self, announcement: &Announcement) -> Result<bool>;
    async fn delete_announcement(&self, id: Uuid) -> Result<bool>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ReportRepo: Send + Sync {
    async fn create_report(&self, report: &Report) -> Result<()>;
    async fn report_by_id(&self, id: Uuid) -> Result<Option<Report>>;
    /// All reports, newest first, optionally scoped to one meeting.
    async fn list_reports(&self, meeting_id: Option<Uuid>) -> Result<Vec<Report>>;
}

/// Binary upload storage. Returns the public URL the file is served from.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn save_upload(&self, bytes: Vec<u8>, original_name: &str) -> Result<String>;
}

/// Password hashing and bearer-token issuance/verification.
#[cfg_attr(feature = "testing", mockall::automock)]
pub trait Authenticator: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;
    fn verify_password(&self, password: &str, hash: &str) -> bool;
    fn issue_token(&self, user: &User) -> Result<String>;
    /// Decodes and validates a bearer token. Any failure (bad signature,
    /// expired, malformed) is an error; callers map it to 401.
    fn verify_token(&self, token: &str) -> Result<TokenClaims>;
}

//! # Domain Models
//!
//! These structs represent the core entities of GavelFlow and double as the
//! REST wire shapes, so everything serializes camelCase to match the API
//! contract the clubs' frontends already speak.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blocks::ContentBlock;
use crate::error::{AppError, Result};

/// Permission tier. ExCo (Executive Committee) members manage meetings,
/// content, and users; everyone else is a regular member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Member,
    Exco,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Exco => "exco",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "member" => Some(Self::Member),
            "exco" => Some(Self::Exco),
            _ => None,
        }
    }
}

/// A registered club member. The password hash lives only in storage and is
/// never part of this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// A scheduled club meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: Uuid,
    pub title: String,
    /// Optional meeting theme (e.g., "Growth"), shown on the agenda
    pub theme: Option<String>,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A member's signup record for a specific meeting. At most one exists per
/// (user, meeting) pair; speech fields are only meaningful for speaker roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub user_id: Uuid,
    /// Joined from the users table for roster display; not stored
    pub user_name: String,
    pub role: Option<String>,
    pub speech_title: Option<String>,
    pub speech_objectives: Option<String>,
    pub attended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A member's written reflection on a meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub user_id: Uuid,
    /// Joined from the users table; not stored
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Publication state of a content page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Draft,
    Published,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            _ => None,
        }
    }
}

/// A CMS page assembled from an ordered list of typed content blocks.
///
/// `status` and `is_published` say the same thing twice; both are kept
/// because the wire contract exposes both, and they are only ever written
/// together (see `ContentPage::with_status`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage {
    pub id: Uuid,
    pub title: String,
    /// Derived from the title; the external identifier for public reads
    pub slug: String,
    pub blocks: Vec<ContentBlock>,
    pub status: PageStatus,
    pub is_published: bool,
    pub last_modified: DateTime<Utc>,
}

impl ContentPage {
    /// Sets `status` and its `is_published` mirror in one step.
    pub fn with_status(mut self, status: PageStatus) -> Self {
        self.status = status;
        self.is_published = status == PageStatus::Published;
        self
    }
}

/// Kanban lane a task sits in. Any lane may transition to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "in-progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Team reference embedded in task responses so boards can show and filter
/// by team without a second fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: Uuid,
    pub name: String,
}

/// A unit of committee work tracked on the kanban board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub team: Option<TeamRef>,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A working group of members.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Member user ids, stored as a JSON array column (not a join table)
    pub member_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A club-wide notice posted by the ExCo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Meeting report/minutes written after a meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub meeting_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// What the uploads endpoint hands back for use in image/attachment blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    pub name: String,
    pub size: u64,
}

/// Claims carried in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Derives a page slug: lower-cased title with whitespace runs replaced by
/// hyphens. Slugs are not deduplicated; public URLs depend on the exact
/// transform, so keep it stable.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

// ---------------------------------------------------------------------------
// Request payloads
//
// One Create/Update struct per mutating route. String fields default to ""
// so a missing required field becomes a validation error with a proper
// `{"message": ...}` body instead of a deserializer rejection.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(AppError::validation("Valid email is required"));
        }
        if self.password.len() < 6 {
            return Err(AppError::validation(
                "Password must be at least 6 characters",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }
        Ok(())
    }
}

/// Login/registration response: the bearer token plus the user it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingCreate {
    #[serde(default)]
    pub title: String,
    pub theme: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl MeetingCreate {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        if self.date.is_none() {
            return Err(AppError::validation("Date is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingUpdate {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Create payload for `POST /api/meetings/{id}/register`. Everything is
/// optional: a member may sign up without a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCreate {
    pub role: Option<String>,
    pub speech_title: Option<String>,
    pub speech_objectives: Option<String>,
}

/// Update payload for the same route. Replaces role/speech fields wholesale;
/// the registration form always submits all three together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationUpdate {
    pub role: Option<String>,
    pub speech_title: Option<String>,
    pub speech_objectives: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub attended: bool,
}

impl AttendanceUpdate {
    pub fn validate(&self) -> Result<Uuid> {
        self.user_id
            .ok_or_else(|| AppError::validation("User is required"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionCreate {
    pub meeting_id: Option<Uuid>,
    #[serde(default)]
    pub content: String,
}

impl ReflectionCreate {
    pub fn validate(&self) -> Result<Uuid> {
        if self.content.trim().is_empty() {
            return Err(AppError::validation("Content is required"));
        }
        self.meeting_id
            .ok_or_else(|| AppError::validation("Meeting is required"))
    }
}

/// The full-page save payload: the editor always sends the complete ordered
/// block list, and the server replaces the stored page wholesale.
///
/// Clients may send `slug` and `lastModified` too, but the server recomputes
/// both on every write; the stored values are authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSave {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    pub is_published: Option<bool>,
    pub status: Option<PageStatus>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl PageSave {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        Ok(())
    }

    /// `status` wins when both are present; a bare `isPublished` flag is
    /// honored for older clients; neither means draft.
    pub fn resolved_status(&self) -> PageStatus {
        match (self.status, self.is_published) {
            (Some(status), _) => status,
            (None, Some(true)) => PageStatus::Published,
            _ => PageStatus::Draft,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreate {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub team_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskCreate {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        Ok(())
    }
}

/// Partial task update; absent fields are left unchanged. Status transitions
/// from the board arrive here as a lone `status` field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub team_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCreate {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<Uuid>,
}

impl TeamCreate {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub member_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementCreate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl AnnouncementCreate {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        if self.body.trim().is_empty() {
            return Err(AppError::validation("Body is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreate {
    pub meeting_id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl ReportCreate {
    pub fn validate(&self) -> Result<Uuid> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        if self.body.trim().is_empty() {
            return Err(AppError::validation("Body is required"));
        }
        self.meeting_id
            .ok_or_else(|| AppError::validation("Meeting is required"))
    }
}

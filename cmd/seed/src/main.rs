//! Seeds a demo club so a fresh checkout has something to click around:
//! one ExCo account, three members, a meeting with signups, a team with a
//! small board, a published About page, and a welcome announcement.
//!
//! Safe to run twice: if the ExCo account already exists, nothing is touched.

use anyhow::Context;
use chrono::{Duration, Utc};
use secrecy::ExposeSecret;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use gf_auth_jwt::JwtAuthenticator;
use gf_config::Settings;
use gf_core::blocks::{BlockPayload, ContentBlock};
use gf_core::models::{
    Announcement, ContentPage, Meeting, PageStatus, Registration, Task, TaskStatus, Team, TeamRef,
    User, UserRole,
};
use gf_core::traits::{
    AnnouncementRepo, Authenticator, ContentRepo, MeetingRepo, TaskRepo, TeamRepo, UserRepo,
};
use gf_db_sqlite::{
    connect, SqliteAnnouncementRepo, SqliteContentRepo, SqliteMeetingRepo, SqliteTaskRepo,
    SqliteTeamRepo, SqliteUserRepo,
};

const EXCO_EMAIL: &str = "chair@gavelflow.club";
const DEMO_PASSWORD: &str = "gavel123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load().context("loading configuration")?;
    let pool = connect(&settings.database.url)
        .await
        .context("opening database")?;

    let users = SqliteUserRepo::new(pool.clone());
    let meetings = SqliteMeetingRepo::new(pool.clone());
    let content = SqliteContentRepo::new(pool.clone());
    let tasks = SqliteTaskRepo::new(pool.clone());
    let teams = SqliteTeamRepo::new(pool.clone());
    let announcements = SqliteAnnouncementRepo::new(pool);
    let auth = JwtAuthenticator::new(
        settings.auth.jwt_secret.expose_secret().as_bytes(),
        settings.auth.token_ttl_hours,
    );

    if users.user_by_email(EXCO_EMAIL).await?.is_some() {
        tracing::info!("demo club already seeded, leaving the database alone");
        return Ok(());
    }

    let now = Utc::now();
    let hash = auth.hash_password(DEMO_PASSWORD)?;

    // Accounts. Everyone shares the demo password.
    let chair = new_user("Priya Sharma", EXCO_EMAIL, UserRole::Exco, now);
    let marcus = new_user("Marcus Lim", "marcus@gavelflow.club", UserRole::Member, now);
    let elena = new_user("Elena Rodriguez", "elena@gavelflow.club", UserRole::Member, now);
    let wei = new_user("Wei Ting Tan", "weiting@gavelflow.club", UserRole::Member, now);
    for user in [&chair, &marcus, &elena, &wei] {
        users.create_user(user, &hash).await?;
    }

    // Next month's meeting plus its signups.
    let meeting = Meeting {
        id: Uuid::now_v7(),
        title: "June Chapter Meeting".into(),
        theme: Some("Finding Your Voice".into()),
        date: now + Duration::days(7),
        location: Some("Community Hall, Room 2".into()),
        description: Some("Prepared speeches and table topics. Guests welcome.".into()),
        created_at: now,
    };
    meetings.create_meeting(&meeting).await?;

    let signups = [
        (
            &marcus,
            Some("Speaker"),
            Some("Icebreaker: Hello, Me"),
            Some("Introduce yourself and find your natural speaking style"),
        ),
        (&elena, Some("Evaluator"), None, None),
        (&wei, None, None, None),
    ];
    for (user, role, title, objectives) in signups {
        meetings
            .create_registration(&Registration {
                id: Uuid::now_v7(),
                meeting_id: meeting.id,
                user_id: user.id,
                user_name: user.name.clone(),
                role: role.map(Into::into),
                speech_title: title.map(Into::into),
                speech_objectives: objectives.map(Into::into),
                attended: false,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }

    // A team and a small board for it.
    let team = Team {
        id: Uuid::now_v7(),
        name: "Programme Quality".into(),
        description: Some("Keeps meetings running and speeches scheduled.".into()),
        member_ids: vec![marcus.id, elena.id],
        created_at: now,
    };
    teams.create_team(&team).await?;

    let team_ref = TeamRef {
        id: team.id,
        name: team.name.clone(),
    };
    let board = [
        ("Book the hall", TaskStatus::Todo, Some(marcus.id), Some(5)),
        ("Print agendas", TaskStatus::InProgress, Some(elena.id), Some(6)),
        ("Confirm May speakers", TaskStatus::Done, None, None),
    ];
    for (title, status, assignee_id, due_in_days) in board {
        tasks
            .create_task(&Task {
                id: Uuid::now_v7(),
                title: title.into(),
                description: None,
                status,
                team: Some(team_ref.clone()),
                assignee_id,
                due_date: due_in_days.map(|days| now + Duration::days(days)),
                created_at: now,
            })
            .await?;
    }

    // The public About page.
    let page = ContentPage {
        id: Uuid::now_v7(),
        title: "About Us".into(),
        slug: "about-us".into(),
        blocks: vec![
            ContentBlock {
                id: "1".into(),
                payload: BlockPayload::Title {
                    title: "About Us".into(),
                },
            },
            ContentBlock {
                id: "2".into(),
                payload: BlockPayload::Text {
                    body: "We meet every first Saturday to practise public speaking and \
                           leadership in a friendly room.\nGuests are always welcome."
                        .into(),
                },
            },
        ],
        status: PageStatus::Draft,
        is_published: false,
        last_modified: now,
    }
    .with_status(PageStatus::Published);
    content.create_page(&page).await?;

    announcements
        .create_announcement(&Announcement {
            id: Uuid::now_v7(),
            title: "Welcome to GavelFlow".into(),
            body: "Sign up for the June meeting from the meetings page, and say hello \
                   on Saturday!"
                .into(),
            created_by: chair.id,
            created_at: now,
        })
        .await?;

    tracing::info!(
        exco = EXCO_EMAIL,
        password = DEMO_PASSWORD,
        "demo club seeded: 4 accounts, 1 meeting, 3 signups, 1 team, 3 tasks, 1 page, 1 announcement"
    );
    Ok(())
}

fn new_user(name: &str, email: &str, role: UserRole, created_at: chrono::DateTime<Utc>) -> User {
    User {
        id: Uuid::now_v7(),
        name: name.into(),
        email: email.into(),
        role,
        created_at,
    }
}

//! Announcements and meeting reports: the committee writes, the club reads.

mod common;

use chrono::{Duration, Utc};
use gf_client::ClientError;
use gf_core::models::{
    AnnouncementCreate, AnnouncementUpdate, MeetingCreate, ReportCreate,
};
use uuid::Uuid;

#[tokio::test]
async fn committee_posts_members_read() {
    let server = common::spawn_server().await;
    let exco = server.exco().await;
    let member = server.member("Wei Ting Tan", "weiting@club.test").await;

    let posted = exco
        .create_announcement(&AnnouncementCreate {
            title: "Venue change".into(),
            body: "June's meeting moves to Room 2B.".into(),
        })
        .await
        .expect("post announcement");

    // Members see it but cannot post their own.
    let seen = member.list_announcements().await.expect("member list");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].title, "Venue change");

    let err = member
        .create_announcement(&AnnouncementCreate {
            title: "Unofficial".into(),
            body: "Pizza after the meeting?".into(),
        })
        .await
        .expect_err("posting is committee only");
    match err {
        ClientError::Api { status, .. } => assert_eq!(status.as_u16(), 403),
        other => panic!("unexpected error: {other}"),
    }

    // The committee can amend and retract.
    let amended = exco
        .update_announcement(
            posted.id,
            &AnnouncementUpdate {
                body: Some("June's meeting moves to the main hall.".into()),
                ..AnnouncementUpdate::default()
            },
        )
        .await
        .expect("amend");
    assert_eq!(amended.title, "Venue change");
    assert!(amended.body.contains("main hall"));

    exco.delete_announcement(posted.id).await.expect("retract");
    assert!(member.list_announcements().await.expect("list").is_empty());
}

#[tokio::test]
async fn reports_attach_to_meetings() {
    let server = common::spawn_server().await;
    let exco = server.exco().await;

    let june = exco
        .create_meeting(&MeetingCreate {
            title: "June Chapter Meeting".into(),
            theme: None,
            date: Some(Utc::now() + Duration::days(7)),
            location: None,
            description: None,
        })
        .await
        .expect("june");
    let july = exco
        .create_meeting(&MeetingCreate {
            title: "July Chapter Meeting".into(),
            theme: None,
            date: Some(Utc::now() + Duration::days(35)),
            location: None,
            description: None,
        })
        .await
        .expect("july");

    let report = exco
        .create_report(&ReportCreate {
            meeting_id: Some(june.id),
            title: "June minutes".into(),
            body: "Three speeches, two evaluations, full house.".into(),
        })
        .await
        .expect("write report");

    let june_reports = exco.reports(Some(june.id)).await.expect("filtered");
    assert_eq!(june_reports.len(), 1);
    assert_eq!(june_reports[0].id, report.id);
    assert!(exco
        .reports(Some(july.id))
        .await
        .expect("other meeting")
        .is_empty());

    let fetched = exco.report(report.id).await.expect("by id");
    assert_eq!(fetched.title, "June minutes");
    assert_eq!(fetched.meeting_id, june.id);
}

#[tokio::test]
async fn reports_require_a_real_meeting() {
    let server = common::spawn_server().await;
    let exco = server.exco().await;

    let err = exco
        .create_report(&ReportCreate {
            meeting_id: Some(Uuid::now_v7()),
            title: "Minutes for nothing".into(),
            body: "x".into(),
        })
        .await
        .expect_err("unknown meeting");
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Meeting not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

//! Integration tests for per-user announcement read and hidden state.

use chrono::{Duration, Utc};
use cityvetcare_core::status::{AnnouncementCategory, AnnouncementStatus};
use cityvetcare_db::models::announcement::{Announcement, AnnouncementScope, SaveAnnouncement};
use cityvetcare_db::models::user::CreateUser;
use cityvetcare_db::repositories::announcement_repo::AnnouncementFields;
use cityvetcare_db::repositories::{AnnouncementRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str, role: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@cityvet.test"),
            password_hash: "not-a-real-hash".to_string(),
            full_name: None,
            contact_number: None,
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn new_announcement(
    pool: &PgPool,
    author: i64,
    title: &str,
    status: AnnouncementStatus,
    days_from_now: i64,
) -> Announcement {
    let input = SaveAnnouncement {
        title: title.to_string(),
        body: "Free anti-rabies vaccination at the barangay hall.".to_string(),
        category: None,
        priority: None,
        status: None,
        publish_date: Some(Utc::now() + Duration::days(days_from_now)),
        attachments: vec![],
    };
    let fields = AnnouncementFields {
        category: Some(AnnouncementCategory::Campaign),
        priority: None,
        status: Some(status),
    };
    AnnouncementRepo::create(pool, author, &input, fields)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unread_count_only_counts_visible(pool: PgPool) {
    let admin = new_user(&pool, "admin", "admin").await;
    let citizen = new_user(&pool, "juan", "citizen").await;

    new_announcement(&pool, admin, "Live", AnnouncementStatus::Published, -1).await;
    new_announcement(&pool, admin, "Draft", AnnouncementStatus::Draft, -1).await;
    new_announcement(&pool, admin, "Future", AnnouncementStatus::Published, 3).await;

    let count = AnnouncementRepo::unread_count(&pool, citizen).await.unwrap();
    assert_eq!(count, 1, "only published, already-live announcements count");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read_decrements_exactly_once(pool: PgPool) {
    let admin = new_user(&pool, "admin", "admin").await;
    let citizen = new_user(&pool, "juan", "citizen").await;
    let first = new_announcement(&pool, admin, "One", AnnouncementStatus::Published, -1).await;
    new_announcement(&pool, admin, "Two", AnnouncementStatus::Published, -1).await;

    assert_eq!(AnnouncementRepo::unread_count(&pool, citizen).await.unwrap(), 2);

    let changed = AnnouncementRepo::mark_read(&pool, first.id, citizen).await.unwrap();
    assert!(changed, "first read should change state");
    assert_eq!(AnnouncementRepo::unread_count(&pool, citizen).await.unwrap(), 1);

    let changed = AnnouncementRepo::mark_read(&pool, first.id, citizen).await.unwrap();
    assert!(!changed, "second read should be a no-op");
    assert_eq!(AnnouncementRepo::unread_count(&pool, citizen).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_read_state_is_per_user(pool: PgPool) {
    let admin = new_user(&pool, "admin", "admin").await;
    let juan = new_user(&pool, "juan", "citizen").await;
    let maria = new_user(&pool, "maria", "citizen").await;
    let a = new_announcement(&pool, admin, "Shared", AnnouncementStatus::Published, -1).await;

    AnnouncementRepo::mark_read(&pool, a.id, juan).await.unwrap();

    assert_eq!(AnnouncementRepo::unread_count(&pool, juan).await.unwrap(), 0);
    assert_eq!(AnnouncementRepo::unread_count(&pool, maria).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_all_read(pool: PgPool) {
    let admin = new_user(&pool, "admin", "admin").await;
    let citizen = new_user(&pool, "juan", "citizen").await;
    let one = new_announcement(&pool, admin, "One", AnnouncementStatus::Published, -2).await;
    new_announcement(&pool, admin, "Two", AnnouncementStatus::Published, -1).await;
    AnnouncementRepo::mark_read(&pool, one.id, citizen).await.unwrap();

    let changed = AnnouncementRepo::mark_all_read(&pool, citizen).await.unwrap();
    assert_eq!(changed, 1, "only the unread one changes");
    assert_eq!(AnnouncementRepo::unread_count(&pool, citizen).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hidden_announcements_leave_feed_and_count(pool: PgPool) {
    let admin = new_user(&pool, "admin", "admin").await;
    let citizen = new_user(&pool, "juan", "citizen").await;
    let a = new_announcement(&pool, admin, "Hide me", AnnouncementStatus::Published, -1).await;

    AnnouncementRepo::set_hidden(&pool, a.id, citizen, true).await.unwrap();
    let feed = AnnouncementRepo::feed_for_user(&pool, citizen, false, 50, 0)
        .await
        .unwrap();
    assert!(feed.is_empty());
    assert_eq!(AnnouncementRepo::unread_count(&pool, citizen).await.unwrap(), 0);

    AnnouncementRepo::set_hidden(&pool, a.id, citizen, false).await.unwrap();
    let feed = AnnouncementRepo::feed_for_user(&pool, citizen, false, 50, 0)
        .await
        .unwrap();
    assert_eq!(feed.len(), 1);
    assert!(!feed[0].is_read);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_reports_read_flag(pool: PgPool) {
    let admin = new_user(&pool, "admin", "admin").await;
    let citizen = new_user(&pool, "juan", "citizen").await;
    let read = new_announcement(&pool, admin, "Read", AnnouncementStatus::Published, -2).await;
    new_announcement(&pool, admin, "Unread", AnnouncementStatus::Published, -1).await;
    AnnouncementRepo::mark_read(&pool, read.id, citizen).await.unwrap();

    let feed = AnnouncementRepo::feed_for_user(&pool, citizen, false, 50, 0)
        .await
        .unwrap();
    assert_eq!(feed.len(), 2);
    let read_item = feed
        .iter()
        .find(|i| i.announcement.id == read.id)
        .unwrap();
    assert!(read_item.is_read);

    let unread_only = AnnouncementRepo::feed_for_user(&pool, citizen, true, 50, 0)
        .await
        .unwrap();
    assert_eq!(unread_only.len(), 1);
    assert_eq!(unread_only[0].announcement.title, "Unread");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_scopes(pool: PgPool) {
    let admin = new_user(&pool, "admin", "admin").await;
    new_announcement(&pool, admin, "Live", AnnouncementStatus::Published, -1).await;
    new_announcement(&pool, admin, "Draft", AnnouncementStatus::Draft, -1).await;

    let visible = AnnouncementRepo::list(&pool, AnnouncementScope::Visible, None, 50, 0)
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);

    let all = AnnouncementRepo::list(&pool, AnnouncementScope::All, None, 50, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let drafts = AnnouncementRepo::list(
        &pool,
        AnnouncementScope::Status(AnnouncementStatus::Draft),
        Some(AnnouncementCategory::Campaign),
        50,
        0,
    )
    .await
    .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].title, "Draft");
}

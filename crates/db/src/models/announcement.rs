//! Announcement entity model, per-user read state and DTOs.

use cityvetcare_core::status::{AnnouncementCategory, AnnouncementStatus, Priority};
use cityvetcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `announcements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    pub title: String,
    pub body: String,
    #[sqlx(try_from = "String")]
    pub category: AnnouncementCategory,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    #[sqlx(try_from = "String")]
    pub status: AnnouncementStatus,
    pub publish_date: Timestamp,
    pub attachments: Json<Vec<String>>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An announcement as seen by one signed-in user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnnouncementFeedItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub announcement: Announcement,
    pub is_read: bool,
}

/// DTO for creating or replacing an announcement.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveAnnouncement {
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub publish_date: Option<Timestamp>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// DTO for `PUT /announcements/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAnnouncementStatus {
    pub status: String,
}

/// Which announcements a list query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementScope {
    /// Published and past their publish date.
    Visible,
    /// Any status.
    All,
    /// Exactly this status, regardless of publish date.
    Status(AnnouncementStatus),
}

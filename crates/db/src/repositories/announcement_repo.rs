//! Repository for the `announcements` and `announcement_user_states` tables.

use cityvetcare_core::status::{AnnouncementCategory, AnnouncementStatus, Priority};
use cityvetcare_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::announcement::{
    Announcement, AnnouncementFeedItem, AnnouncementScope, SaveAnnouncement,
};

/// Column list for `announcements` queries.
const COLUMNS: &str = "\
    id, title, body, category, priority, status, publish_date, attachments, \
    created_by, created_at, updated_at";

/// Same columns qualified with the `a` alias, for joins.
const A_COLUMNS: &str = "\
    a.id, a.title, a.body, a.category, a.priority, a.status, a.publish_date, \
    a.attachments, a.created_by, a.created_at, a.updated_at";

/// Visibility predicate for citizen-facing queries (`a` alias).
const VISIBLE: &str = "a.status = 'published' AND a.publish_date <= NOW()";

/// Normalized enum values from a save request.
///
/// `None` takes the default on insert (general, medium, published) and
/// keeps the stored value on update.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnouncementFields {
    pub category: Option<AnnouncementCategory>,
    pub priority: Option<Priority>,
    pub status: Option<AnnouncementStatus>,
}

pub struct AnnouncementRepo;

impl AnnouncementRepo {
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &SaveAnnouncement,
        fields: AnnouncementFields,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements \
                (title, body, category, priority, status, publish_date, attachments, created_by) \
             VALUES ($1, $2, COALESCE($3::text, 'general'), COALESCE($4::text, 'medium'), \
                     COALESCE($5::text, 'published'), COALESCE($6, NOW()), $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(input.title.trim())
            .bind(&input.body)
            .bind(fields.category.map(AnnouncementCategory::as_str))
            .bind(fields.priority.map(Priority::as_str))
            .bind(fields.status.map(AnnouncementStatus::as_str))
            .bind(input.publish_date)
            .bind(Json(&input.attachments))
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements WHERE id = $1");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List announcements in `scope`, optionally filtered by category.
    ///
    /// Ordered by publish date, newest first.
    pub async fn list(
        pool: &PgPool,
        scope: AnnouncementScope,
        category: Option<AnnouncementCategory>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let scope_clause = match scope {
            AnnouncementScope::Visible => VISIBLE.to_string(),
            AnnouncementScope::All => "TRUE".to_string(),
            AnnouncementScope::Status(_) => "a.status = $4".to_string(),
        };
        let query = format!(
            "SELECT {A_COLUMNS} FROM announcements a \
             WHERE {scope_clause} AND ($3::TEXT IS NULL OR a.category = $3) \
             ORDER BY a.publish_date DESC, a.id DESC \
             LIMIT $1 OFFSET $2"
        );
        let mut q = sqlx::query_as::<_, Announcement>(&query)
            .bind(limit)
            .bind(offset)
            .bind(category.map(|c| c.as_str()));
        if let AnnouncementScope::Status(status) = scope {
            q = q.bind(status.as_str());
        }
        q.fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveAnnouncement,
        fields: AnnouncementFields,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET \
                title = $2, body = $3, category = COALESCE($4::text, category), \
                priority = COALESCE($5::text, priority), status = COALESCE($6::text, status), \
                publish_date = COALESCE($7, publish_date), attachments = $8 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(input.title.trim())
            .bind(&input.body)
            .bind(fields.category.map(AnnouncementCategory::as_str))
            .bind(fields.priority.map(Priority::as_str))
            .bind(fields.status.map(AnnouncementStatus::as_str))
            .bind(input.publish_date)
            .bind(Json(&input.attachments))
            .fetch_optional(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: AnnouncementStatus,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query =
            format!("UPDATE announcements SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Per-user read / hidden state
    // -----------------------------------------------------------------------

    /// Visible, non-hidden announcements for a user with their read flag.
    pub async fn feed_for_user(
        pool: &PgPool,
        user_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AnnouncementFeedItem>, sqlx::Error> {
        let unread_clause = if unread_only {
            "AND COALESCE(s.is_read, false) = false"
        } else {
            ""
        };
        let query = format!(
            "SELECT {A_COLUMNS}, COALESCE(s.is_read, false) AS is_read \
             FROM announcements a \
             LEFT JOIN announcement_user_states s \
               ON s.announcement_id = a.id AND s.user_id = $1 \
             WHERE {VISIBLE} AND COALESCE(s.is_hidden, false) = false {unread_clause} \
             ORDER BY a.publish_date DESC, a.id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AnnouncementFeedItem>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of visible, non-hidden announcements the user has not read.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM announcements a \
             LEFT JOIN announcement_user_states s \
               ON s.announcement_id = a.id AND s.user_id = $1 \
             WHERE {VISIBLE} \
               AND COALESCE(s.is_hidden, false) = false \
               AND COALESCE(s.is_read, false) = false"
        );
        let count: Option<i64> = sqlx::query_scalar(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Mark one announcement read for a user.
    ///
    /// Returns `true` only when the state changed; repeating the call is a
    /// no-op that returns `false`.
    pub async fn mark_read(
        pool: &PgPool,
        announcement_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO announcement_user_states (announcement_id, user_id, is_read, read_at) \
             VALUES ($1, $2, true, NOW()) \
             ON CONFLICT (announcement_id, user_id) DO UPDATE \
               SET is_read = true, read_at = NOW() \
               WHERE announcement_user_states.is_read = false",
        )
        .bind(announcement_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark every visible announcement read for a user. Returns how many
    /// changed state.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcement_user_states (announcement_id, user_id, is_read, read_at) \
             SELECT a.id, $1, true, NOW() FROM announcements a WHERE {VISIBLE} \
             ON CONFLICT (announcement_id, user_id) DO UPDATE \
               SET is_read = true, read_at = NOW() \
               WHERE announcement_user_states.is_read = false"
        );
        let result = sqlx::query(&query).bind(user_id).execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Hide or unhide an announcement from a user's feed.
    pub async fn set_hidden(
        pool: &PgPool,
        announcement_id: DbId,
        user_id: DbId,
        hidden: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO announcement_user_states (announcement_id, user_id, is_hidden, hidden_at) \
             VALUES ($1, $2, $3, CASE WHEN $3 THEN NOW() END) \
             ON CONFLICT (announcement_id, user_id) DO UPDATE \
               SET is_hidden = EXCLUDED.is_hidden, hidden_at = EXCLUDED.hidden_at",
        )
        .bind(announcement_id)
        .bind(user_id)
        .bind(hidden)
        .execute(pool)
        .await?;
        Ok(())
    }
}

//! Announcement validation and visibility.

use crate::error::CoreError;
use crate::status::AnnouncementStatus;
use crate::types::Timestamp;
use crate::validation::{require_non_blank, require_short_text, validate_max_len, MAX_LONG_TEXT};

/// Maximum number of attachments per announcement.
pub const MAX_ATTACHMENTS: usize = 10;

pub fn validate_announcement(
    title: &str,
    body: &str,
    attachment_count: usize,
) -> Result<(), CoreError> {
    require_short_text("title", title)?;
    require_non_blank("body", body)?;
    validate_max_len("body", body, MAX_LONG_TEXT)?;
    if attachment_count > MAX_ATTACHMENTS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_ATTACHMENTS} attachments are allowed"
        )));
    }
    Ok(())
}

/// Whether citizens can see the announcement at `now`.
pub fn is_visible(status: AnnouncementStatus, publish_date: Timestamp, now: Timestamp) -> bool {
    status == AnnouncementStatus::Published && publish_date <= now
}

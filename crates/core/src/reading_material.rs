//! Archive / restore rules for reading materials.
//!
//! Archiving records the status the material had so that a restore can put
//! it back exactly where it was.

use crate::error::CoreError;
use crate::status::{MaterialStatus, MaterialType};
use crate::validation::{require_non_blank, require_short_text};

/// Maximum number of ids accepted by the bulk endpoints.
pub const MAX_BULK_IDS: usize = 100;

/// Maximum number of tags per material.
pub const MAX_TAGS: usize = 20;

/// Validate that a material can be archived. Returns the status to log as
/// `previous_status`.
pub fn validate_archive(current: MaterialStatus) -> Result<MaterialStatus, CoreError> {
    if current == MaterialStatus::Archived {
        return Err(CoreError::Conflict("Reading material is already archived".into()));
    }
    Ok(current)
}

/// Status a material returns to when restored.
pub fn restore_target(
    current: MaterialStatus,
    previous: Option<MaterialStatus>,
) -> Result<MaterialStatus, CoreError> {
    if current != MaterialStatus::Archived {
        return Err(CoreError::Conflict("Reading material is not archived".into()));
    }
    Ok(match previous {
        Some(MaterialStatus::Archived) | None => MaterialStatus::Draft,
        Some(prev) => prev,
    })
}

/// Validate the authored fields of a material.
pub fn validate_material(
    material_type: MaterialType,
    title: &str,
    content: Option<&str>,
    url: Option<&str>,
    tag_count: usize,
) -> Result<(), CoreError> {
    require_short_text("title", title)?;
    match material_type {
        MaterialType::Website => require_non_blank("url", url.unwrap_or(""))?,
        MaterialType::Article => require_non_blank("content", content.unwrap_or(""))?,
        MaterialType::Book => {}
    }
    if let Some(u) = url.map(str::trim).filter(|u| !u.is_empty()) {
        if !(u.starts_with("http://") || u.starts_with("https://")) {
            return Err(CoreError::Validation(
                "url must start with http:// or https://".into(),
            ));
        }
    }
    if tag_count > MAX_TAGS {
        return Err(CoreError::Validation(format!("At most {MAX_TAGS} tags are allowed")));
    }
    Ok(())
}

/// Validate the id list of a bulk request.
pub fn validate_bulk_ids(ids: &[i64]) -> Result<(), CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("ids must not be empty".into()));
    }
    if ids.len() > MAX_BULK_IDS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_BULK_IDS} ids can be processed at once"
        )));
    }
    Ok(())
}

//! Reading material entity model, archive log and DTOs.

use cityvetcare_core::status::{MaterialStatus, MaterialType};
use cityvetcare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `reading_materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReadingMaterial {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub material_type: MaterialType,
    pub category: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub tags: Json<Vec<String>>,
    pub images: Json<Vec<String>>,
    #[sqlx(try_from = "String")]
    pub status: MaterialStatus,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `reading_material_archive_log` table.
///
/// An entry is open while `restored_at` is null.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArchiveLogEntry {
    pub id: DbId,
    pub material_id: DbId,
    #[sqlx(try_from = "String")]
    pub previous_status: MaterialStatus,
    pub reason: Option<String>,
    pub archived_by: Option<DbId>,
    pub archived_at: Timestamp,
    pub restored_by: Option<DbId>,
    pub restored_at: Option<Timestamp>,
}

/// DTO for creating or replacing a reading material.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveReadingMaterial {
    pub material_type: String,
    pub category: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: Option<String>,
}

/// DTO for `POST /reading-materials/{id}/archive`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveReadingMaterial {
    pub reason: Option<String>,
}

/// DTO for the bulk endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkMaterialIds {
    pub ids: Vec<DbId>,
    pub reason: Option<String>,
}

/// Filters for material listing, already normalized.
#[derive(Debug, Clone, Default)]
pub struct MaterialFilter {
    /// `None` means every status except `archived`.
    pub status: Option<MaterialStatus>,
    pub include_archived: bool,
    pub material_type: Option<MaterialType>,
    pub category: Option<String>,
    /// `ILIKE` pattern matched against title, author and content.
    pub search: Option<String>,
}

/// Result of an all-or-nothing bulk operation.
#[derive(Debug, Clone)]
pub enum BulkOutcome {
    /// Every id was updated; the transaction committed.
    Applied(Vec<ReadingMaterial>),
    /// Some ids do not exist; nothing was written.
    Missing(Vec<DbId>),
    /// Some materials are in a status the operation cannot apply to;
    /// nothing was written.
    Conflicting(Vec<DbId>),
}

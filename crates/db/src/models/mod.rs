//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for edits

pub mod announcement;
pub mod catcher_team;
pub mod clinic;
pub mod incident;
pub mod reading_material;
pub mod request;
pub mod stray_animal;
pub mod user;
pub mod vaccination;

use serde::Serialize;
use sqlx::FromRow;

/// Number of rows sharing a status value (dashboard counters).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

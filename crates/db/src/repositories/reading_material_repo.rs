//! Repository for `reading_materials` and its archive log.
//!
//! Archiving writes an open log entry recording the status the material
//! had before; restoring closes that entry and puts the material back in
//! its recorded status. Status change and log write always share one
//! transaction.

use cityvetcare_core::status::{MaterialStatus, MaterialType};
use cityvetcare_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::reading_material::{
    ArchiveLogEntry, BulkOutcome, MaterialFilter, ReadingMaterial, SaveReadingMaterial,
};

/// Column list for `reading_materials` queries.
const COLUMNS: &str = "\
    id, material_type, category, title, author, content, url, tags, images, \
    status, created_by, created_at, updated_at";

/// Column list for `reading_material_archive_log` queries.
const LOG_COLUMNS: &str = "\
    id, material_id, previous_status, reason, archived_by, archived_at, \
    restored_by, restored_at";

pub struct ReadingMaterialRepo;

impl ReadingMaterialRepo {
    pub async fn create(
        pool: &PgPool,
        created_by: DbId,
        input: &SaveReadingMaterial,
        material_type: MaterialType,
        status: MaterialStatus,
    ) -> Result<ReadingMaterial, sqlx::Error> {
        let query = format!(
            "INSERT INTO reading_materials \
                (material_type, category, title, author, content, url, tags, images, status, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadingMaterial>(&query)
            .bind(material_type.as_str())
            .bind(&input.category)
            .bind(input.title.trim())
            .bind(&input.author)
            .bind(&input.content)
            .bind(&input.url)
            .bind(Json(&input.tags))
            .bind(Json(&input.images))
            .bind(status.as_str())
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReadingMaterial>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reading_materials WHERE id = $1");
        sqlx::query_as::<_, ReadingMaterial>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List materials with optional filters.
    ///
    /// Without an explicit status, archived materials are excluded unless
    /// `include_archived` is set.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &MaterialFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ReadingMaterial>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: u32 = 1;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        } else if !filter.include_archived {
            conditions.push("status <> 'archived'".to_string());
        }
        if filter.material_type.is_some() {
            conditions.push(format!("material_type = ${param_idx}"));
            param_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("LOWER(category) = LOWER(${param_idx})"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(title ILIKE ${param_idx} OR author ILIKE ${param_idx} OR content ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM reading_materials {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${} OFFSET ${}",
            param_idx,
            param_idx + 1,
        );

        let mut q = sqlx::query_as::<_, ReadingMaterial>(&query);
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(material_type) = filter.material_type {
            q = q.bind(material_type.as_str());
        }
        if let Some(ref category) = filter.category {
            q = q.bind(category);
        }
        if let Some(ref pattern) = filter.search {
            q = q.bind(pattern);
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Replace the editable fields and, when `status` is given, the
    /// draft/published status too.
    ///
    /// A status change on an archived material matches no row, so nothing
    /// is written and `None` comes back. The caller re-reads to tell that
    /// apart from a missing id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SaveReadingMaterial,
        material_type: MaterialType,
        status: Option<MaterialStatus>,
    ) -> Result<Option<ReadingMaterial>, sqlx::Error> {
        let query = format!(
            "UPDATE reading_materials SET \
                material_type = $2, category = $3, title = $4, author = $5, \
                content = $6, url = $7, tags = $8, images = $9, \
                status = COALESCE($10::text, status) \
             WHERE id = $1 AND ($10::text IS NULL OR status <> 'archived') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadingMaterial>(&query)
            .bind(id)
            .bind(material_type.as_str())
            .bind(&input.category)
            .bind(input.title.trim())
            .bind(&input.author)
            .bind(&input.content)
            .bind(&input.url)
            .bind(Json(&input.tags))
            .bind(Json(&input.images))
            .bind(status.map(MaterialStatus::as_str))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reading_materials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Archive / restore
    // -----------------------------------------------------------------------

    /// Archive a material that is currently in `previous`.
    ///
    /// Returns `None` if the material no longer has that status (deleted or
    /// changed concurrently); the caller re-reads to tell which.
    pub async fn archive(
        pool: &PgPool,
        id: DbId,
        previous: MaterialStatus,
        reason: Option<&str>,
        archived_by: DbId,
    ) -> Result<Option<ReadingMaterial>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let material = archive_in_tx(&mut *tx, id, previous, reason, archived_by).await?;
        if material.is_some() {
            tx.commit().await?;
        }
        Ok(material)
    }

    /// Restore an archived material to `target` and close its log entry.
    ///
    /// Returns `None` if the material is not archived.
    pub async fn restore(
        pool: &PgPool,
        id: DbId,
        target: MaterialStatus,
        restored_by: DbId,
    ) -> Result<Option<ReadingMaterial>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let material = restore_in_tx(&mut *tx, id, target, restored_by).await?;
        if material.is_some() {
            tx.commit().await?;
        }
        Ok(material)
    }

    /// The open archive entry for a material, if any.
    pub async fn find_open_archive_entry(
        pool: &PgPool,
        material_id: DbId,
    ) -> Result<Option<ArchiveLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM reading_material_archive_log \
             WHERE material_id = $1 AND restored_at IS NULL"
        );
        sqlx::query_as::<_, ArchiveLogEntry>(&query)
            .bind(material_id)
            .fetch_optional(pool)
            .await
    }

    /// Every archive entry for a material, newest first.
    pub async fn archive_history(
        pool: &PgPool,
        material_id: DbId,
    ) -> Result<Vec<ArchiveLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM reading_material_archive_log \
             WHERE material_id = $1 \
             ORDER BY archived_at DESC, id DESC"
        );
        sqlx::query_as::<_, ArchiveLogEntry>(&query)
            .bind(material_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Bulk operations (all-or-nothing)
    // -----------------------------------------------------------------------

    /// Archive every material in `ids`.
    ///
    /// If any id is missing or already archived nothing is written.
    pub async fn bulk_archive(
        pool: &PgPool,
        ids: &[DbId],
        reason: Option<&str>,
        archived_by: DbId,
    ) -> Result<BulkOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let current = lock_many(&mut *tx, ids).await?;

        let missing = missing_ids(ids, &current);
        if !missing.is_empty() {
            return Ok(BulkOutcome::Missing(missing));
        }
        let conflicting: Vec<DbId> = current
            .iter()
            .filter(|m| m.status == MaterialStatus::Archived)
            .map(|m| m.id)
            .collect();
        if !conflicting.is_empty() {
            return Ok(BulkOutcome::Conflicting(conflicting));
        }

        let mut updated = Vec::with_capacity(current.len());
        for material in &current {
            match archive_in_tx(&mut *tx, material.id, material.status, reason, archived_by).await?
            {
                Some(m) => updated.push(m),
                None => return Ok(BulkOutcome::Conflicting(vec![material.id])),
            }
        }
        tx.commit().await?;
        Ok(BulkOutcome::Applied(updated))
    }

    /// Publish every material in `ids`.
    ///
    /// Archived materials are restored first, closing their log entry.
    /// Missing ids abort the whole batch.
    pub async fn bulk_publish(
        pool: &PgPool,
        ids: &[DbId],
        published_by: DbId,
    ) -> Result<BulkOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let current = lock_many(&mut *tx, ids).await?;

        let missing = missing_ids(ids, &current);
        if !missing.is_empty() {
            return Ok(BulkOutcome::Missing(missing));
        }

        let mut updated = Vec::with_capacity(current.len());
        for material in &current {
            let published = if material.status == MaterialStatus::Archived {
                restore_in_tx(&mut *tx, material.id, MaterialStatus::Published, published_by)
                    .await?
            } else {
                let query = format!(
                    "UPDATE reading_materials SET status = 'published' \
                     WHERE id = $1 RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, ReadingMaterial>(&query)
                    .bind(material.id)
                    .fetch_optional(&mut *tx)
                    .await?
            };
            match published {
                Some(m) => updated.push(m),
                None => return Ok(BulkOutcome::Conflicting(vec![material.id])),
            }
        }
        tx.commit().await?;
        Ok(BulkOutcome::Applied(updated))
    }
}

async fn archive_in_tx(
    conn: &mut PgConnection,
    id: DbId,
    previous: MaterialStatus,
    reason: Option<&str>,
    archived_by: DbId,
) -> Result<Option<ReadingMaterial>, sqlx::Error> {
    let query = format!(
        "UPDATE reading_materials SET status = 'archived' \
         WHERE id = $1 AND status = $2 \
         RETURNING {COLUMNS}"
    );
    let material = sqlx::query_as::<_, ReadingMaterial>(&query)
        .bind(id)
        .bind(previous.as_str())
        .fetch_optional(&mut *conn)
        .await?;

    if material.is_some() {
        sqlx::query(
            "INSERT INTO reading_material_archive_log \
                (material_id, previous_status, reason, archived_by) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(previous.as_str())
        .bind(reason)
        .bind(archived_by)
        .execute(&mut *conn)
        .await?;
    }
    Ok(material)
}

async fn restore_in_tx(
    conn: &mut PgConnection,
    id: DbId,
    target: MaterialStatus,
    restored_by: DbId,
) -> Result<Option<ReadingMaterial>, sqlx::Error> {
    let query = format!(
        "UPDATE reading_materials SET status = $2 \
         WHERE id = $1 AND status = 'archived' \
         RETURNING {COLUMNS}"
    );
    let material = sqlx::query_as::<_, ReadingMaterial>(&query)
        .bind(id)
        .bind(target.as_str())
        .fetch_optional(&mut *conn)
        .await?;

    if material.is_some() {
        sqlx::query(
            "UPDATE reading_material_archive_log \
             SET restored_at = NOW(), restored_by = $2 \
             WHERE material_id = $1 AND restored_at IS NULL",
        )
        .bind(id)
        .bind(restored_by)
        .execute(&mut *conn)
        .await?;
    }
    Ok(material)
}

/// Lock the rows for `ids` in id order.
async fn lock_many(
    conn: &mut PgConnection,
    ids: &[DbId],
) -> Result<Vec<ReadingMaterial>, sqlx::Error> {
    let query = format!(
        "SELECT {COLUMNS} FROM reading_materials \
         WHERE id = ANY($1) ORDER BY id FOR UPDATE"
    );
    sqlx::query_as::<_, ReadingMaterial>(&query)
        .bind(ids)
        .fetch_all(&mut *conn)
        .await
}

fn missing_ids(requested: &[DbId], found: &[ReadingMaterial]) -> Vec<DbId> {
    let mut missing: Vec<DbId> = requested
        .iter()
        .copied()
        .filter(|id| !found.iter().any(|m| m.id == *id))
        .collect();
    missing.sort_unstable();
    missing.dedup();
    missing
}

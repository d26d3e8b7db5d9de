//! Integration tests for reading material archive, restore and bulk
//! operations.

use cityvetcare_core::status::{MaterialStatus, MaterialType};
use cityvetcare_db::models::reading_material::{
    BulkOutcome, MaterialFilter, ReadingMaterial, SaveReadingMaterial,
};
use cityvetcare_db::models::user::CreateUser;
use cityvetcare_db::repositories::{ReadingMaterialRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn staff_user(pool: &PgPool) -> i64 {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: "librarian".to_string(),
            email: "librarian@cityvet.test".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            full_name: None,
            contact_number: None,
            role: "staff".to_string(),
        },
    )
    .await
    .unwrap();
    user.id
}

async fn new_material(
    pool: &PgPool,
    user_id: i64,
    title: &str,
    status: MaterialStatus,
) -> ReadingMaterial {
    let input = SaveReadingMaterial {
        material_type: "article".to_string(),
        category: Some("Pet Care".to_string()),
        title: title.to_string(),
        author: Some("City Vet Office".to_string()),
        content: Some("Keep vaccinations up to date.".to_string()),
        url: None,
        tags: vec!["rabies".to_string()],
        images: vec![],
        status: None,
    };
    ReadingMaterialRepo::create(pool, user_id, &input, MaterialType::Article, status)
        .await
        .unwrap()
}

async fn default_listing(pool: &PgPool) -> Vec<ReadingMaterial> {
    ReadingMaterialRepo::list_filtered(pool, &MaterialFilter::default(), 50, 0)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Archive / restore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_archive_hides_from_default_listing_and_logs(pool: PgPool) {
    let user = staff_user(&pool).await;
    let material = new_material(&pool, user, "Rabies 101", MaterialStatus::Published).await;

    assert!(default_listing(&pool).await.iter().any(|m| m.id == material.id));

    let archived = ReadingMaterialRepo::archive(
        &pool,
        material.id,
        MaterialStatus::Published,
        Some("outdated"),
        user,
    )
    .await
    .unwrap()
    .expect("material should archive");
    assert_eq!(archived.status, MaterialStatus::Archived);

    assert!(
        !default_listing(&pool).await.iter().any(|m| m.id == material.id),
        "archived material should not appear in the default listing"
    );

    let history = ReadingMaterialRepo::archive_history(&pool, material.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1, "exactly one log row per archive");
    assert_eq!(history[0].previous_status, MaterialStatus::Published);
    assert_eq!(history[0].reason.as_deref(), Some("outdated"));
    assert!(history[0].restored_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_archive_requires_matching_previous_status(pool: PgPool) {
    let user = staff_user(&pool).await;
    let material = new_material(&pool, user, "Draft", MaterialStatus::Draft).await;

    let result =
        ReadingMaterialRepo::archive(&pool, material.id, MaterialStatus::Published, None, user)
            .await
            .unwrap();
    assert!(result.is_none(), "status mismatch should write nothing");

    let history = ReadingMaterialRepo::archive_history(&pool, material.id)
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_returns_to_logged_status(pool: PgPool) {
    let user = staff_user(&pool).await;
    let material = new_material(&pool, user, "Draft Guide", MaterialStatus::Draft).await;

    ReadingMaterialRepo::archive(&pool, material.id, MaterialStatus::Draft, None, user)
        .await
        .unwrap()
        .unwrap();

    let entry = ReadingMaterialRepo::find_open_archive_entry(&pool, material.id)
        .await
        .unwrap()
        .expect("open entry after archive");
    assert_eq!(entry.previous_status, MaterialStatus::Draft);

    let restored = ReadingMaterialRepo::restore(&pool, material.id, entry.previous_status, user)
        .await
        .unwrap()
        .expect("archived material should restore");
    assert_eq!(restored.status, MaterialStatus::Draft);

    assert!(ReadingMaterialRepo::find_open_archive_entry(&pool, material.id)
        .await
        .unwrap()
        .is_none());
    let history = ReadingMaterialRepo::archive_history(&pool, material.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert!(history[0].restored_at.is_some());
    assert_eq!(history[0].restored_by, Some(user));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_of_non_archived_is_noop(pool: PgPool) {
    let user = staff_user(&pool).await;
    let material = new_material(&pool, user, "Live", MaterialStatus::Published).await;

    let result = ReadingMaterialRepo::restore(&pool, material.id, MaterialStatus::Draft, user)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_archive_restore_cycle_keeps_full_history(pool: PgPool) {
    let user = staff_user(&pool).await;
    let material = new_material(&pool, user, "Cycle", MaterialStatus::Published).await;

    for _ in 0..2 {
        ReadingMaterialRepo::archive(&pool, material.id, MaterialStatus::Published, None, user)
            .await
            .unwrap()
            .unwrap();
        ReadingMaterialRepo::restore(&pool, material.id, MaterialStatus::Published, user)
            .await
            .unwrap()
            .unwrap();
    }

    let history = ReadingMaterialRepo::archive_history(&pool, material.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|e| e.restored_at.is_some()));
}

// ---------------------------------------------------------------------------
// Bulk operations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_archive_applies_to_all(pool: PgPool) {
    let user = staff_user(&pool).await;
    let a = new_material(&pool, user, "A", MaterialStatus::Published).await;
    let b = new_material(&pool, user, "B", MaterialStatus::Draft).await;

    let outcome = ReadingMaterialRepo::bulk_archive(&pool, &[a.id, b.id], Some("cleanup"), user)
        .await
        .unwrap();
    match outcome {
        BulkOutcome::Applied(updated) => {
            assert_eq!(updated.len(), 2);
            assert!(updated.iter().all(|m| m.status == MaterialStatus::Archived));
        }
        other => panic!("expected Applied, got {other:?}"),
    }

    let b_entry = ReadingMaterialRepo::find_open_archive_entry(&pool, b.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(b_entry.previous_status, MaterialStatus::Draft);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_archive_is_all_or_nothing(pool: PgPool) {
    let user = staff_user(&pool).await;
    let a = new_material(&pool, user, "A", MaterialStatus::Published).await;

    let outcome = ReadingMaterialRepo::bulk_archive(&pool, &[a.id, 999_999], None, user)
        .await
        .unwrap();
    match outcome {
        BulkOutcome::Missing(ids) => assert_eq!(ids, vec![999_999]),
        other => panic!("expected Missing, got {other:?}"),
    }

    let a_now = ReadingMaterialRepo::find_by_id(&pool, a.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(a_now.status, MaterialStatus::Published, "nothing should be written");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_archive_rejects_already_archived(pool: PgPool) {
    let user = staff_user(&pool).await;
    let a = new_material(&pool, user, "A", MaterialStatus::Published).await;
    let b = new_material(&pool, user, "B", MaterialStatus::Published).await;
    ReadingMaterialRepo::archive(&pool, b.id, MaterialStatus::Published, None, user)
        .await
        .unwrap()
        .unwrap();

    let outcome = ReadingMaterialRepo::bulk_archive(&pool, &[a.id, b.id], None, user)
        .await
        .unwrap();
    match outcome {
        BulkOutcome::Conflicting(ids) => assert_eq!(ids, vec![b.id]),
        other => panic!("expected Conflicting, got {other:?}"),
    }
    let a_now = ReadingMaterialRepo::find_by_id(&pool, a.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(a_now.status, MaterialStatus::Published);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_publish_restores_archived(pool: PgPool) {
    let user = staff_user(&pool).await;
    let draft = new_material(&pool, user, "Draft", MaterialStatus::Draft).await;
    let archived = new_material(&pool, user, "Old", MaterialStatus::Draft).await;
    ReadingMaterialRepo::archive(&pool, archived.id, MaterialStatus::Draft, None, user)
        .await
        .unwrap()
        .unwrap();

    let outcome = ReadingMaterialRepo::bulk_publish(&pool, &[draft.id, archived.id], user)
        .await
        .unwrap();
    let BulkOutcome::Applied(updated) = outcome else {
        panic!("bulk publish should apply");
    };
    assert!(updated.iter().all(|m| m.status == MaterialStatus::Published));
    assert!(ReadingMaterialRepo::find_open_archive_entry(&pool, archived.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status_and_search(pool: PgPool) {
    let user = staff_user(&pool).await;
    new_material(&pool, user, "Deworming schedule", MaterialStatus::Published).await;
    new_material(&pool, user, "Rabies facts", MaterialStatus::Draft).await;

    let filter = MaterialFilter {
        status: Some(MaterialStatus::Published),
        search: Some("%deworm%".to_string()),
        ..Default::default()
    };
    let found = ReadingMaterialRepo::list_filtered(&pool, &filter, 50, 0)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Deworming schedule");
}

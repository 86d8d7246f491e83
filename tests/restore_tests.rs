mod common;

use chrono::{TimeZone, Utc};
use sea_orm::EntityTrait;
use serde_json::json;

use common::{counts, memory_db, seed};
use site_backup_lib::backup::{RestoreMode, restore_document};
use site_backup_lib::database::SiteTable;
use site_backup_lib::database::dto::BackupDocument;
use site_backup_lib::database::repository::restore_repository::RestoreRepository;
use site_backup_lib::entity::prelude::*;
use site_backup_lib::error::BackupError;

fn document(value: serde_json::Value) -> BackupDocument {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn embedded_sessions_are_not_restored() {
    let db = memory_db().await;
    let doc = document(json!({
        "users": [{
            "id": "u1",
            "sessions": [{ "id": "s1", "userId": "u1" }],
            "accounts": []
        }]
    }));

    let summary = restore_document(&db, &doc, RestoreMode::Sequential)
        .await
        .unwrap();

    let users = User::find().all(&db).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "u1");
    // absent columns fall back to the schema defaults
    assert_eq!(users[0].role, "USER");
    assert!(!users[0].email_verified);

    assert_eq!(counts(&db).await[&SiteTable::Session], 0);
    assert_eq!(summary.skipped_sessions, 1);
    assert_eq!(summary.skipped_accounts, 0);
    assert_eq!(summary.inserted_rows(SiteTable::Session), None);
}

#[tokio::test]
async fn date_strings_are_restored_as_instants() {
    let db = memory_db().await;
    let doc = document(json!({
        "colecoes": [{
            "id": "c1",
            "title": "Noivas",
            "slug": "noivas",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-02-01 08:00:00",
            "deletedAt": null,
            "items": []
        }]
    }));

    restore_document(&db, &doc, RestoreMode::Sequential)
        .await
        .unwrap();

    let restored = Collection::find_by_id("c1".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        restored.created_at,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        restored.updated_at,
        Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap()
    );
    assert_eq!(restored.deleted_at, None);
}

#[tokio::test]
async fn missing_or_empty_tables_are_skipped() {
    let db = memory_db().await;
    seed(&db).await;

    for doc in [
        document(json!({ "faqs": [{ "id": "f9", "question": "q", "answer": "a" }] })),
        document(json!({ "banners": [], "faqs": [{ "id": "f9", "question": "q", "answer": "a" }] })),
    ] {
        let summary = restore_document(&db, &doc, RestoreMode::Sequential)
            .await
            .unwrap();

        assert_eq!(summary.inserted_rows(SiteTable::Banner), None);
        assert_eq!(summary.inserted_rows(SiteTable::Faq), Some(1));
        assert_eq!(summary.inserted.len(), 1);

        let after = counts(&db).await;
        assert_eq!(after[&SiteTable::Banner], 0);
        assert_eq!(after[&SiteTable::Faq], 1);
    }
}

#[tokio::test]
async fn delete_phase_is_idempotent() {
    let db = memory_db().await;
    seed(&db).await;

    let first = RestoreRepository::delete_all(&db).await.unwrap();
    assert!(counts(&db).await.values().all(|rows| *rows == 0));
    let removed: u64 = first.iter().map(|c| c.rows).sum();
    assert_eq!(removed, 12);

    let second = RestoreRepository::delete_all(&db).await.unwrap();
    assert!(counts(&db).await.values().all(|rows| *rows == 0));
    assert!(second.iter().all(|c| c.rows == 0));
    assert_eq!(
        second.iter().map(|c| c.table).collect::<Vec<_>>(),
        SiteTable::DELETE_ORDER.to_vec()
    );
}

#[tokio::test]
async fn item_with_unknown_collection_fails_the_item_batch() {
    let db = memory_db().await;
    let doc = document(json!({
        "colecoes": [{
            "id": "c1",
            "title": "Noivas",
            "slug": "noivas",
            "items": [
                { "id": "i1", "collectionId": "c1", "title": "ok" },
                { "id": "i2", "collectionId": "fantasma", "title": "orphan" }
            ]
        }]
    }));

    let err = restore_document(&db, &doc, RestoreMode::Sequential)
        .await
        .unwrap_err();
    assert!(matches!(err, BackupError::Db(_)), "unexpected error: {err}");

    let after = counts(&db).await;
    // the whole item batch failed, the collection batch before it stays
    assert_eq!(after[&SiteTable::CollectionItem], 0);
    assert_eq!(after[&SiteTable::Collection], 1);
}

#[tokio::test]
async fn atomic_mode_rolls_back_on_failure() {
    let db = memory_db().await;
    seed(&db).await;
    let before = counts(&db).await;

    let doc = document(json!({
        "users": [{ "id": "u2" }],
        "colecoes": [{
            "id": "c9",
            "title": "Nova",
            "slug": "nova",
            "items": [{ "id": "i9", "collectionId": "fantasma", "title": "orphan" }]
        }]
    }));

    let err = restore_document(&db, &doc, RestoreMode::Atomic)
        .await
        .unwrap_err();
    assert!(matches!(err, BackupError::Db(_)));

    assert_eq!(counts(&db).await, before);
    assert!(User::find_by_id("u1".to_string()).one(&db).await.unwrap().is_some());
    assert!(User::find_by_id("u2".to_string()).one(&db).await.unwrap().is_none());
}

#[tokio::test]
async fn atomic_mode_commits_on_success() {
    let db = memory_db().await;
    seed(&db).await;

    let doc = document(json!({ "menus": [{ "id": "m2", "label": "Contato", "href": "/contato" }] }));
    restore_document(&db, &doc, RestoreMode::Atomic)
        .await
        .unwrap();

    let after = counts(&db).await;
    assert_eq!(after[&SiteTable::Menu], 1);
    assert_eq!(after[&SiteTable::User], 0);
    assert_eq!(after[&SiteTable::Collection], 0);
}

#[tokio::test]
async fn unreadable_document_leaves_database_untouched() {
    let db = memory_db().await;
    seed(&db).await;
    let before = counts(&db).await;

    let doc = document(json!({
        "users": [{ "id": "u2" }],
        "testimonials": [{ "id": "t2", "author": "x", "quote": "y", "createdAt": "ontem" }]
    }));

    let err = restore_document(&db, &doc, RestoreMode::Sequential)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BackupError::Date {
            table: "Testimonial",
            ..
        }
    ));
    assert_eq!(counts(&db).await, before);
}

#[tokio::test]
async fn rows_with_different_fields_are_all_inserted() {
    let db = memory_db().await;
    let doc = document(json!({
        "faqs": [
            { "id": "f1", "question": "a", "answer": "b" },
            { "id": "f2", "question": "c", "answer": "d", "order": 3 },
            { "id": "f3", "question": "e", "answer": "f", "createdAt": "2024-01-01T00:00:00.000Z" }
        ]
    }));

    let summary = restore_document(&db, &doc, RestoreMode::Sequential)
        .await
        .unwrap();
    assert_eq!(summary.inserted_rows(SiteTable::Faq), Some(3));

    let f2 = Faq::find_by_id("f2".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(f2.order, 3);
    let f1 = Faq::find_by_id("f1".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(f1.order, 0);
}

#[tokio::test]
async fn failed_item_batch_with_mixed_fields_leaves_no_items() {
    let db = memory_db().await;
    let doc = document(json!({
        "colecoes": [{
            "id": "c1",
            "title": "Noivas",
            "slug": "noivas",
            "items": [
                { "id": "i1", "collectionId": "c1", "title": "ok" },
                { "id": "i2", "collectionId": "fantasma", "title": "orphan", "order": 2 }
            ]
        }]
    }));

    let err = restore_document(&db, &doc, RestoreMode::Sequential)
        .await
        .unwrap_err();
    assert!(matches!(err, BackupError::Db(_)), "unexpected error: {err}");

    let after = counts(&db).await;
    assert_eq!(after[&SiteTable::CollectionItem], 0);
    assert_eq!(after[&SiteTable::Collection], 1);
}

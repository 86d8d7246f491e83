#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use std::collections::HashMap;
use std::path::PathBuf;

use site_backup_lib::database::{SiteTable, establish_connection};
use site_backup_lib::entity::prelude::*;
use site_backup_lib::entity::{
    account, banner, collection, collection_item, faq, homepage_section, menu, session,
    testimonial, user,
};

pub fn ts(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 30, 0).unwrap()
}

/// Fresh in-memory database with the real schema applied.
pub async fn memory_db() -> DatabaseConnection {
    let _ = env_logger::builder().is_test(true).try_init();
    let db = establish_connection("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

/// Per-test path under the system temp dir, removed if left over.
pub fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "site_backup_test_{}_{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_file(&path);
    path
}

/// Row count of every covered table.
pub async fn counts(db: &DatabaseConnection) -> HashMap<SiteTable, u64> {
    HashMap::from([
        (SiteTable::Collection, Collection::find().count(db).await.unwrap()),
        (SiteTable::CollectionItem, CollectionItem::find().count(db).await.unwrap()),
        (SiteTable::User, User::find().count(db).await.unwrap()),
        (SiteTable::Session, Session::find().count(db).await.unwrap()),
        (SiteTable::Account, Account::find().count(db).await.unwrap()),
        (SiteTable::Banner, Banner::find().count(db).await.unwrap()),
        (SiteTable::Faq, Faq::find().count(db).await.unwrap()),
        (SiteTable::HomepageSection, HomepageSection::find().count(db).await.unwrap()),
        (SiteTable::Menu, Menu::find().count(db).await.unwrap()),
        (SiteTable::Testimonial, Testimonial::find().count(db).await.unwrap()),
    ])
}

/// A small but complete site: every table has at least one row.
pub async fn seed(db: &DatabaseConnection) {
    user::ActiveModel {
        id: Set("u1".into()),
        name: Set(Some("Ana Souza".into())),
        email: Set(Some("ana@construtora.example".into())),
        email_verified: Set(true),
        role: Set("ADMIN".into()),
        created_at: Set(ts(2)),
        updated_at: Set(ts(3)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    session::ActiveModel {
        id: Set("s1".into()),
        user_id: Set("u1".into()),
        token: Set("tok-1".into()),
        expires_at: Set(ts(30)),
        created_at: Set(ts(3)),
        updated_at: Set(ts(3)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    account::ActiveModel {
        id: Set("a1".into()),
        user_id: Set("u1".into()),
        account_id: Set("u1".into()),
        provider_id: Set("credential".into()),
        password: Set(Some("$argon2id$hash".into())),
        created_at: Set(ts(2)),
        updated_at: Set(ts(2)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    for (id, slug, published) in [("c1", "noivas", true), ("c2", "festa", false)] {
        collection::ActiveModel {
            id: Set(id.into()),
            title: Set(slug.to_uppercase()),
            slug: Set(slug.into()),
            description: Set(None),
            cover_image: Set(Some(format!("https://cdn.example/{slug}.jpg"))),
            order: Set(1),
            published: Set(published),
            created_at: Set(ts(4)),
            updated_at: Set(ts(5)),
            deleted_at: Set(None),
        }
        .insert(db)
        .await
        .unwrap();
    }

    for (id, like_count) in [("i1", Some(7)), ("i2", None)] {
        collection_item::ActiveModel {
            id: Set(id.into()),
            collection_id: Set("c1".into()),
            title: Set(format!("Vestido {id}")),
            price: Set(Some(1299.5)),
            like_count: Set(like_count),
            view_count: Set(like_count.map(|n| n * 10)),
            created_at: Set(ts(6)),
            updated_at: Set(ts(6)),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    banner::ActiveModel {
        id: Set("b1".into()),
        title: Set("Obras entregues".into()),
        image_url: Set("https://cdn.example/banner.jpg".into()),
        active: Set(true),
        created_at: Set(ts(7)),
        updated_at: Set(ts(7)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    faq::ActiveModel {
        id: Set("f1".into()),
        question: Set("Vocês fazem orçamento?".into()),
        answer: Set("Sim, sem custo.".into()),
        created_at: Set(ts(8)),
        updated_at: Set(ts(8)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    homepage_section::ActiveModel {
        id: Set("h1".into()),
        key: Set("hero".into()),
        title: Set("Engenharia com precisão".into()),
        content: Set(Some("<p>Desde 1998</p>".into())),
        visible: Set(true),
        created_at: Set(ts(9)),
        updated_at: Set(ts(9)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    menu::ActiveModel {
        id: Set("m1".into()),
        label: Set("Projetos".into()),
        href: Set("/projetos".into()),
        created_at: Set(ts(10)),
        updated_at: Set(ts(10)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    testimonial::ActiveModel {
        id: Set("t1".into()),
        author: Set("Carlos Lima".into()),
        company: Set(Some("Lima Incorporações".into())),
        quote: Set("Obra entregue no prazo.".into()),
        rating: Set(Some(5)),
        created_at: Set(ts(11)),
        updated_at: Set(ts(11)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

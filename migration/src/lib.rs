pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_site_tables;
mod m20250412_000002_add_item_counters;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_site_tables::Migration),
            Box::new(m20250412_000002_add_item_counters::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, ConnectionTrait, Database};

    #[tokio::test]
    async fn migrations_apply_on_a_fresh_database() {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options).await.unwrap();

        Migrator::up(&db, None).await.unwrap();
        assert_eq!(Migrator::get_applied_migrations(&db).await.unwrap().len(), 2);

        let manager = SchemaManager::new(&db);
        for table in [
            "User",
            "Session",
            "Account",
            "Collection",
            "CollectionItem",
            "Banner",
            "FAQ",
            "HomepageSection",
            "Menu",
            "Testimonial",
        ] {
            assert!(manager.has_table(table).await.unwrap(), "{table} missing");
        }
        assert!(manager.has_column("CollectionItem", "likeCount").await.unwrap());

        // running again is a no-op
        Migrator::up(&db, None).await.unwrap();
        db.execute_unprepared("INSERT INTO \"User\" (\"id\") VALUES ('u1')")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn counters_cannot_be_rolled_back() {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options).await.unwrap();

        Migrator::up(&db, None).await.unwrap();
        assert!(Migrator::down(&db, Some(1)).await.is_err());
    }
}

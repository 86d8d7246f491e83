//! Add like/view counters to catalog items.
//!
//! Both columns are nullable: items created before this migration have no
//! counter value rather than a fake zero.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(CollectionItem::Table)
                    .add_column(ColumnDef::new(CollectionItem::LikeCount).integer().null())
                    .to_owned(),
            )
            .await?;

        // SQLite only accepts one column per ALTER TABLE
        manager
            .alter_table(
                Table::alter()
                    .table(CollectionItem::Table)
                    .add_column(ColumnDef::new(CollectionItem::ViewCount).integer().null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        Err(DbErr::Custom(
            "Counter columns cannot be dropped on SQLite, restore from a backup instead".to_string(),
        ))
    }
}

#[derive(DeriveIden)]
enum CollectionItem {
    #[sea_orm(iden = "CollectionItem")]
    Table,
    #[sea_orm(iden = "likeCount")]
    LikeCount,
    #[sea_orm(iden = "viewCount")]
    ViewCount,
}

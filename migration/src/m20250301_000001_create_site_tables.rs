//! Baseline schema for the site database.
//!
//! Table and column names keep the camelCase form used by the site itself,
//! which is also the key format of the JSON backup document.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Auth tables
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(text_pk(User::Id))
                    .col(ColumnDef::new(User::Name).text().null())
                    .col(ColumnDef::new(User::Email).text().null().unique_key())
                    .col(
                        ColumnDef::new(User::EmailVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(User::Image).text().null())
                    .col(
                        ColumnDef::new(User::Role)
                            .text()
                            .not_null()
                            .default("USER"),
                    )
                    .col(timestamp_now(User::CreatedAt))
                    .col(timestamp_now(User::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(text_pk(Session::Id))
                    .col(ColumnDef::new(Session::UserId).text().not_null())
                    .col(ColumnDef::new(Session::Token).text().not_null().unique_key())
                    .col(
                        ColumnDef::new(Session::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Session::IpAddress).text().null())
                    .col(ColumnDef::new(Session::UserAgent).text().null())
                    .col(timestamp_now(Session::CreatedAt))
                    .col(timestamp_now(Session::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_user")
                            .from(Session::Table, Session::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(text_pk(Account::Id))
                    .col(ColumnDef::new(Account::UserId).text().not_null())
                    .col(ColumnDef::new(Account::AccountId).text().not_null())
                    .col(ColumnDef::new(Account::ProviderId).text().not_null())
                    .col(ColumnDef::new(Account::AccessToken).text().null())
                    .col(ColumnDef::new(Account::RefreshToken).text().null())
                    .col(ColumnDef::new(Account::Password).text().null())
                    .col(timestamp_now(Account::CreatedAt))
                    .col(timestamp_now(Account::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_account_user")
                            .from(Account::Table, Account::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 2. Catalog tables
        manager
            .create_table(
                Table::create()
                    .table(Collection::Table)
                    .if_not_exists()
                    .col(text_pk(Collection::Id))
                    .col(ColumnDef::new(Collection::Title).text().not_null())
                    .col(ColumnDef::new(Collection::Slug).text().not_null().unique_key())
                    .col(ColumnDef::new(Collection::Description).text().null())
                    .col(ColumnDef::new(Collection::CoverImage).text().null())
                    .col(order_col(Collection::Order))
                    .col(
                        ColumnDef::new(Collection::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_now(Collection::CreatedAt))
                    .col(timestamp_now(Collection::UpdatedAt))
                    .col(
                        ColumnDef::new(Collection::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CollectionItem::Table)
                    .if_not_exists()
                    .col(text_pk(CollectionItem::Id))
                    .col(ColumnDef::new(CollectionItem::CollectionId).text().not_null())
                    .col(ColumnDef::new(CollectionItem::Title).text().not_null())
                    .col(ColumnDef::new(CollectionItem::Description).text().null())
                    .col(ColumnDef::new(CollectionItem::ImageUrl).text().null())
                    .col(ColumnDef::new(CollectionItem::Price).double().null())
                    .col(order_col(CollectionItem::Order))
                    .col(timestamp_now(CollectionItem::CreatedAt))
                    .col(timestamp_now(CollectionItem::UpdatedAt))
                    .col(
                        ColumnDef::new(CollectionItem::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_collection_item_collection")
                            .from(CollectionItem::Table, CollectionItem::CollectionId)
                            .to(Collection::Table, Collection::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 3. Independent content tables
        manager
            .create_table(
                Table::create()
                    .table(Banner::Table)
                    .if_not_exists()
                    .col(text_pk(Banner::Id))
                    .col(ColumnDef::new(Banner::Title).text().not_null())
                    .col(ColumnDef::new(Banner::Subtitle).text().null())
                    .col(ColumnDef::new(Banner::ImageUrl).text().not_null())
                    .col(ColumnDef::new(Banner::Link).text().null())
                    .col(
                        ColumnDef::new(Banner::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(order_col(Banner::Order))
                    .col(timestamp_now(Banner::CreatedAt))
                    .col(timestamp_now(Banner::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Faq::Table)
                    .if_not_exists()
                    .col(text_pk(Faq::Id))
                    .col(ColumnDef::new(Faq::Question).text().not_null())
                    .col(ColumnDef::new(Faq::Answer).text().not_null())
                    .col(order_col(Faq::Order))
                    .col(timestamp_now(Faq::CreatedAt))
                    .col(timestamp_now(Faq::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HomepageSection::Table)
                    .if_not_exists()
                    .col(text_pk(HomepageSection::Id))
                    .col(ColumnDef::new(HomepageSection::Key).text().not_null().unique_key())
                    .col(ColumnDef::new(HomepageSection::Title).text().not_null())
                    .col(ColumnDef::new(HomepageSection::Content).text().null())
                    .col(order_col(HomepageSection::Order))
                    .col(
                        ColumnDef::new(HomepageSection::Visible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp_now(HomepageSection::CreatedAt))
                    .col(timestamp_now(HomepageSection::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Menu::Table)
                    .if_not_exists()
                    .col(text_pk(Menu::Id))
                    .col(ColumnDef::new(Menu::Label).text().not_null())
                    .col(ColumnDef::new(Menu::Href).text().not_null())
                    .col(ColumnDef::new(Menu::ParentId).text().null())
                    .col(order_col(Menu::Order))
                    .col(timestamp_now(Menu::CreatedAt))
                    .col(timestamp_now(Menu::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Testimonial::Table)
                    .if_not_exists()
                    .col(text_pk(Testimonial::Id))
                    .col(ColumnDef::new(Testimonial::Author).text().not_null())
                    .col(ColumnDef::new(Testimonial::Role).text().null())
                    .col(ColumnDef::new(Testimonial::Company).text().null())
                    .col(ColumnDef::new(Testimonial::Quote).text().not_null())
                    .col(ColumnDef::new(Testimonial::Rating).integer().null())
                    .col(ColumnDef::new(Testimonial::AvatarUrl).text().null())
                    .col(timestamp_now(Testimonial::CreatedAt))
                    .col(timestamp_now(Testimonial::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // children first
        manager
            .drop_table(Table::drop().table(CollectionItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Collection::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Account::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Testimonial::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Faq::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HomepageSection::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Menu::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Banner::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        Ok(())
    }
}

fn text_pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).text().not_null().primary_key().to_owned()
}

fn order_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).integer().not_null().default(0).to_owned()
}

fn timestamp_now<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "User")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "name")]
    Name,
    #[sea_orm(iden = "email")]
    Email,
    #[sea_orm(iden = "emailVerified")]
    EmailVerified,
    #[sea_orm(iden = "image")]
    Image,
    #[sea_orm(iden = "role")]
    Role,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Session {
    #[sea_orm(iden = "Session")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "userId")]
    UserId,
    #[sea_orm(iden = "token")]
    Token,
    #[sea_orm(iden = "expiresAt")]
    ExpiresAt,
    #[sea_orm(iden = "ipAddress")]
    IpAddress,
    #[sea_orm(iden = "userAgent")]
    UserAgent,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Account {
    #[sea_orm(iden = "Account")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "userId")]
    UserId,
    #[sea_orm(iden = "accountId")]
    AccountId,
    #[sea_orm(iden = "providerId")]
    ProviderId,
    #[sea_orm(iden = "accessToken")]
    AccessToken,
    #[sea_orm(iden = "refreshToken")]
    RefreshToken,
    #[sea_orm(iden = "password")]
    Password,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Collection {
    #[sea_orm(iden = "Collection")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "title")]
    Title,
    #[sea_orm(iden = "slug")]
    Slug,
    #[sea_orm(iden = "description")]
    Description,
    #[sea_orm(iden = "coverImage")]
    CoverImage,
    #[sea_orm(iden = "order")]
    Order,
    #[sea_orm(iden = "published")]
    Published,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
    #[sea_orm(iden = "deletedAt")]
    DeletedAt,
}

#[derive(DeriveIden)]
enum CollectionItem {
    #[sea_orm(iden = "CollectionItem")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "collectionId")]
    CollectionId,
    #[sea_orm(iden = "title")]
    Title,
    #[sea_orm(iden = "description")]
    Description,
    #[sea_orm(iden = "imageUrl")]
    ImageUrl,
    #[sea_orm(iden = "price")]
    Price,
    #[sea_orm(iden = "order")]
    Order,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
    #[sea_orm(iden = "deletedAt")]
    DeletedAt,
}

#[derive(DeriveIden)]
enum Banner {
    #[sea_orm(iden = "Banner")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "title")]
    Title,
    #[sea_orm(iden = "subtitle")]
    Subtitle,
    #[sea_orm(iden = "imageUrl")]
    ImageUrl,
    #[sea_orm(iden = "link")]
    Link,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "order")]
    Order,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Faq {
    #[sea_orm(iden = "FAQ")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "question")]
    Question,
    #[sea_orm(iden = "answer")]
    Answer,
    #[sea_orm(iden = "order")]
    Order,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum HomepageSection {
    #[sea_orm(iden = "HomepageSection")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "key")]
    Key,
    #[sea_orm(iden = "title")]
    Title,
    #[sea_orm(iden = "content")]
    Content,
    #[sea_orm(iden = "order")]
    Order,
    #[sea_orm(iden = "visible")]
    Visible,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Menu {
    #[sea_orm(iden = "Menu")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "label")]
    Label,
    #[sea_orm(iden = "href")]
    Href,
    #[sea_orm(iden = "parentId")]
    ParentId,
    #[sea_orm(iden = "order")]
    Order,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Testimonial {
    #[sea_orm(iden = "Testimonial")]
    Table,
    #[sea_orm(iden = "id")]
    Id,
    #[sea_orm(iden = "author")]
    Author,
    #[sea_orm(iden = "role")]
    Role,
    #[sea_orm(iden = "company")]
    Company,
    #[sea_orm(iden = "quote")]
    Quote,
    #[sea_orm(iden = "rating")]
    Rating,
    #[sea_orm(iden = "avatarUrl")]
    AvatarUrl,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

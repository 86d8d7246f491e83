use sea_orm::*;

use crate::database::dto::{Snapshot, UserWithAuth};
use crate::entity::prelude::*;
use crate::entity::{
    banner, collection, collection_item, faq, homepage_section, menu, testimonial, user,
};

/// Read side of the backup: full-table reads, no filtering or paging.
pub struct SnapshotRepository;

impl SnapshotRepository {
    /// Read every covered table.
    pub async fn snapshot<C>(db: &C) -> Result<Snapshot, DbErr>
    where
        C: ConnectionTrait,
    {
        let collections = Self::collections_with_items(db).await?;
        log::info!("Coleções lidas: {}", collections.len());

        let banners = Banner::find()
            .order_by_asc(banner::Column::Id)
            .all(db)
            .await?;
        let faqs = Faq::find().order_by_asc(faq::Column::Id).all(db).await?;
        let homepage_sections = HomepageSection::find()
            .order_by_asc(homepage_section::Column::Id)
            .all(db)
            .await?;
        let menus = Menu::find().order_by_asc(menu::Column::Id).all(db).await?;
        let testimonials = Testimonial::find()
            .order_by_asc(testimonial::Column::Id)
            .all(db)
            .await?;

        let users = Self::users_with_auth(db).await?;
        log::info!("Usuários lidos: {}", users.len());

        Ok(Snapshot {
            collections,
            banners,
            faqs,
            homepage_sections,
            menus,
            testimonials,
            users,
        })
    }

    /// Collections with their items (LEFT JOIN, so empty collections are kept).
    pub async fn collections_with_items<C>(
        db: &C,
    ) -> Result<Vec<(collection::Model, Vec<collection_item::Model>)>, DbErr>
    where
        C: ConnectionTrait,
    {
        Collection::find()
            .find_with_related(CollectionItem)
            .order_by_asc(collection::Column::Id)
            .order_by_asc(collection_item::Column::Order)
            .order_by_asc(collection_item::Column::Id)
            .all(db)
            .await
    }

    /// Users with their sessions and accounts.
    ///
    /// Two batched loads instead of a query per user.
    pub async fn users_with_auth<C>(db: &C) -> Result<Vec<UserWithAuth>, DbErr>
    where
        C: ConnectionTrait,
    {
        let users = User::find().order_by_asc(user::Column::Id).all(db).await?;
        let sessions = users.load_many(Session, db).await?;
        let accounts = users.load_many(Account, db).await?;

        Ok(users
            .into_iter()
            .zip(sessions)
            .zip(accounts)
            .map(|((user, sessions), accounts)| UserWithAuth {
                user,
                sessions,
                accounts,
            })
            .collect())
    }
}

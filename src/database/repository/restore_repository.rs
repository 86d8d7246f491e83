use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IdenStatic,
    IntoActiveModel, Iterable, TransactionTrait,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::database::SiteTable;
use crate::database::dto::{BackupDocument, Row, TableCount};
use crate::entity::prelude::*;
use crate::entity::{
    banner, collection, collection_item, faq, homepage_section, menu, testimonial, user,
};
use crate::error::{BackupError, Result};
use crate::utils::dates::revive_dates;

/// Active models ready for insertion, one list per table.
///
/// Built from the whole document before anything is deleted, so a row with
/// an unreadable date or a non-object entry aborts the restore while the
/// database is still intact.
#[derive(Debug, Default)]
pub struct PreparedRestore {
    pub users: Vec<user::ActiveModel>,
    pub banners: Vec<banner::ActiveModel>,
    pub menus: Vec<menu::ActiveModel>,
    pub testimonials: Vec<testimonial::ActiveModel>,
    pub faqs: Vec<faq::ActiveModel>,
    pub homepage_sections: Vec<homepage_section::ActiveModel>,
    pub collections: Vec<collection::ActiveModel>,
    /// Items of every collection, flattened in document order
    pub collection_items: Vec<collection_item::ActiveModel>,
    /// Embedded sessions found under users. They are not re-inserted.
    pub skipped_sessions: usize,
    /// Embedded accounts found under users. They are not re-inserted.
    pub skipped_accounts: usize,
}

fn as_row(table: SiteTable, value: &Value) -> Result<Row> {
    value
        .as_object()
        .cloned()
        .ok_or(BackupError::Row {
            table: table.table_name(),
        })
}

/// Remove a nested child array from a parent row.
fn take_children(row: &mut Row, table: SiteTable) -> Vec<Value> {
    match row.remove(table.document_key()) {
        Some(Value::Array(children)) => children,
        _ => Vec::new(),
    }
}

/// Build an active model from a document row.
///
/// Columns whose key is absent from the row stay `NotSet`, so the database
/// default applies. Date columns are set from their revived native value.
pub fn active_model_from_row<A>(table: SiteTable, mut row: Row) -> Result<A>
where
    A: ActiveModelTrait,
    <A::Entity as EntityTrait>::Model: DeserializeOwned + IntoActiveModel<A>,
{
    let dates = revive_dates(table, &mut row)?;
    let present: HashSet<String> = row.keys().cloned().collect();

    let model: <A::Entity as EntityTrait>::Model = serde_json::from_value(Value::Object(row))?;
    let mut active = model.into_active_model();

    for column in <A::Entity as EntityTrait>::Column::iter() {
        if !present.contains(column.as_str()) {
            active.not_set(column);
        }
    }

    for date in dates {
        let Some(column) =
            <A::Entity as EntityTrait>::Column::iter().find(|c| c.as_str() == date.field)
        else {
            // the table has no such column; the key is dropped like any unknown field
            continue;
        };
        if date.value.is_none() && !column.def().is_null() {
            return Err(BackupError::Date {
                table: table.table_name(),
                field: date.field.to_string(),
                value: "null".to_string(),
            });
        }
        active.set(column, date.value.into());
    }

    Ok(active)
}

fn prepare_rows<A>(table: SiteTable, rows: &[Value]) -> Result<Vec<A>>
where
    A: ActiveModelTrait,
    <A::Entity as EntityTrait>::Model: DeserializeOwned + IntoActiveModel<A>,
{
    rows.iter()
        .map(|value| active_model_from_row(table, as_row(table, value)?))
        .collect()
}

impl PreparedRestore {
    pub fn from_document(document: &BackupDocument) -> Result<Self> {
        let mut prepared = PreparedRestore::default();

        for value in &document.users {
            let mut row = as_row(SiteTable::User, value)?;
            prepared.skipped_sessions += take_children(&mut row, SiteTable::Session).len();
            prepared.skipped_accounts += take_children(&mut row, SiteTable::Account).len();
            prepared
                .users
                .push(active_model_from_row(SiteTable::User, row)?);
        }

        for value in &document.collections {
            let mut row = as_row(SiteTable::Collection, value)?;
            let items = take_children(&mut row, SiteTable::CollectionItem);
            prepared
                .collections
                .push(active_model_from_row(SiteTable::Collection, row)?);
            prepared
                .collection_items
                .extend(prepare_rows(SiteTable::CollectionItem, &items)?);
        }

        prepared.banners = prepare_rows(SiteTable::Banner, &document.banners)?;
        prepared.menus = prepare_rows(SiteTable::Menu, &document.menus)?;
        prepared.testimonials = prepare_rows(SiteTable::Testimonial, &document.testimonials)?;
        prepared.faqs = prepare_rows(SiteTable::Faq, &document.faqs)?;
        prepared.homepage_sections =
            prepare_rows(SiteTable::HomepageSection, &document.homepage_sections)?;

        Ok(prepared)
    }
}

/// Bound parameters allowed in one statement by older SQLite builds.
const MAX_BIND_PARAMS: usize = 999;

/// Rows per bulk insert so one statement stays under `MAX_BIND_PARAMS`.
fn max_rows_per_insert<A>() -> usize
where
    A: ActiveModelTrait,
{
    let columns = <A::Entity as EntityTrait>::Column::iter().count();
    (MAX_BIND_PARAMS / columns.max(1)).max(1)
}

/// Split models into consecutive runs that set the same columns, each run
/// holding at most `max_rows` models.
///
/// A bulk insert needs one column list for all its rows.
fn split_into_runs<A>(models: Vec<A>, max_rows: usize) -> Vec<Vec<A>>
where
    A: ActiveModelTrait,
{
    let signature = |active: &A| -> Vec<bool> {
        <A::Entity as EntityTrait>::Column::iter()
            .map(|column| !matches!(active.get(column), ActiveValue::NotSet))
            .collect()
    };

    let mut runs: Vec<(Vec<bool>, Vec<A>)> = Vec::new();
    for active in models {
        let sig = signature(&active);
        match runs.last_mut() {
            Some((last_sig, run)) if *last_sig == sig && run.len() < max_rows => {
                run.push(active)
            }
            _ => runs.push((sig, vec![active])),
        }
    }
    runs.into_iter().map(|(_, run)| run).collect()
}

/// Write side of the restore.
pub struct RestoreRepository;

impl RestoreRepository {
    /// Delete every row of one table. Empty tables are fine.
    pub async fn delete_table<C>(conn: &C, table: SiteTable) -> std::result::Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = match table {
            SiteTable::CollectionItem => CollectionItem::delete_many().exec(conn).await?,
            SiteTable::Collection => Collection::delete_many().exec(conn).await?,
            SiteTable::Session => Session::delete_many().exec(conn).await?,
            SiteTable::Account => Account::delete_many().exec(conn).await?,
            SiteTable::Testimonial => Testimonial::delete_many().exec(conn).await?,
            SiteTable::Faq => Faq::delete_many().exec(conn).await?,
            SiteTable::HomepageSection => HomepageSection::delete_many().exec(conn).await?,
            SiteTable::Menu => Menu::delete_many().exec(conn).await?,
            SiteTable::Banner => Banner::delete_many().exec(conn).await?,
            SiteTable::User => User::delete_many().exec(conn).await?,
        };
        Ok(result.rows_affected)
    }

    /// Delete phase: every covered table, children before parents.
    pub async fn delete_all<C>(conn: &C) -> std::result::Result<Vec<TableCount>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut deleted = Vec::with_capacity(SiteTable::DELETE_ORDER.len());
        for table in SiteTable::DELETE_ORDER {
            let rows = Self::delete_table(conn, table).await?;
            log::info!("Tabela {} limpa ({} registros removidos)", table, rows);
            deleted.push(TableCount { table, rows });
        }
        Ok(deleted)
    }

    /// Bulk insert one table. Returns `None` when there was nothing to insert.
    ///
    /// All runs of the table share one transaction (a savepoint when `conn`
    /// is already a transaction), so the table is restored whole or not at all.
    async fn insert_table<A, C>(
        conn: &C,
        table: SiteTable,
        models: Vec<A>,
    ) -> std::result::Result<Option<TableCount>, DbErr>
    where
        C: ConnectionTrait + TransactionTrait,
        A: ActiveModelTrait,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        if models.is_empty() {
            log::info!("Tabela {} sem registros no backup, ignorada", table);
            return Ok(None);
        }

        let runs = split_into_runs(models, max_rows_per_insert::<A>());
        log::debug!("Tabela {}: {} inserções em lote", table, runs.len());

        let txn = conn.begin().await?;
        let mut rows = 0;
        for run in runs {
            rows += <A::Entity as EntityTrait>::insert_many(run)
                .exec_without_returning(&txn)
                .await?;
        }
        txn.commit().await?;
        log::info!("Tabela {} restaurada ({} registros)", table, rows);
        Ok(Some(TableCount { table, rows }))
    }

    /// Insert phase: parents before children, skipping empty tables.
    pub async fn insert_all<C>(
        conn: &C,
        prepared: PreparedRestore,
    ) -> std::result::Result<Vec<TableCount>, DbErr>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let PreparedRestore {
            users,
            banners,
            menus,
            testimonials,
            faqs,
            homepage_sections,
            collections,
            collection_items,
            skipped_sessions,
            skipped_accounts,
        } = prepared;

        if skipped_sessions > 0 || skipped_accounts > 0 {
            log::warn!(
                "{} sessões e {} contas presentes no backup não serão restauradas",
                skipped_sessions,
                skipped_accounts
            );
        }

        let inserted = [
            Self::insert_table(conn, SiteTable::User, users).await?,
            Self::insert_table(conn, SiteTable::Banner, banners).await?,
            Self::insert_table(conn, SiteTable::Menu, menus).await?,
            Self::insert_table(conn, SiteTable::Testimonial, testimonials).await?,
            Self::insert_table(conn, SiteTable::Faq, faqs).await?,
            Self::insert_table(conn, SiteTable::HomepageSection, homepage_sections).await?,
            Self::insert_table(conn, SiteTable::Collection, collections).await?,
            Self::insert_table(conn, SiteTable::CollectionItem, collection_items).await?,
        ];

        Ok(inserted.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn absent_columns_stay_not_set() {
        let active: user::ActiveModel =
            active_model_from_row(SiteTable::User, row(json!({ "id": "u1" }))).unwrap();

        assert_eq!(active.id, ActiveValue::Unchanged("u1".to_string()));
        assert!(matches!(active.role, ActiveValue::NotSet));
        assert!(matches!(active.created_at, ActiveValue::NotSet));
        assert!(matches!(active.email, ActiveValue::NotSet));
    }

    #[test]
    fn date_strings_become_native_values() {
        let active: banner::ActiveModel = active_model_from_row(
            SiteTable::Banner,
            row(json!({
                "id": "b1",
                "title": "Obras 2024",
                "imageUrl": "https://cdn.example/b1.jpg",
                "createdAt": "2024-01-01T00:00:00.000Z"
            })),
        )
        .unwrap();

        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(active.created_at, ActiveValue::Set(expected));
        assert!(matches!(active.updated_at, ActiveValue::NotSet));
    }

    #[test]
    fn null_soft_delete_is_kept() {
        let active: collection::ActiveModel = active_model_from_row(
            SiteTable::Collection,
            row(json!({ "id": "c1", "title": "Festa", "slug": "festa", "deletedAt": null })),
        )
        .unwrap();
        assert_eq!(active.deleted_at, ActiveValue::Set(None));
    }

    #[test]
    fn null_required_date_is_rejected() {
        let err = active_model_from_row::<faq::ActiveModel>(
            SiteTable::Faq,
            row(json!({ "id": "f1", "question": "?", "answer": "!", "createdAt": null })),
        )
        .unwrap_err();
        assert!(matches!(err, BackupError::Date { table: "FAQ", .. }));
    }

    #[test]
    fn users_are_stripped_and_items_flattened() {
        let document: BackupDocument = serde_json::from_value(json!({
            "users": [{
                "id": "u1",
                "sessions": [{ "id": "s1", "userId": "u1" }],
                "accounts": [{ "id": "a1", "userId": "u1" }, { "id": "a2", "userId": "u1" }]
            }],
            "colecoes": [
                { "id": "c1", "title": "A", "slug": "a", "items": [
                    { "id": "i1", "collectionId": "c1", "title": "x" }
                ]},
                { "id": "c2", "title": "B", "slug": "b", "items": [
                    { "id": "i2", "collectionId": "c2", "title": "y" },
                    { "id": "i3", "collectionId": "c2", "title": "z" }
                ]}
            ]
        }))
        .unwrap();

        let prepared = PreparedRestore::from_document(&document).unwrap();

        assert_eq!(prepared.users.len(), 1);
        assert_eq!(prepared.skipped_sessions, 1);
        assert_eq!(prepared.skipped_accounts, 2);
        assert_eq!(prepared.collections.len(), 2);
        let item_ids: Vec<_> = prepared
            .collection_items
            .iter()
            .map(|i| i.id.clone().unwrap())
            .collect();
        assert_eq!(item_ids, vec!["i1", "i2", "i3"]);
        assert!(prepared.banners.is_empty());
    }

    #[test]
    fn non_object_rows_are_reported_with_their_table() {
        let document: BackupDocument =
            serde_json::from_value(json!({ "menus": [42] })).unwrap();
        let err = PreparedRestore::from_document(&document).unwrap_err();
        assert!(matches!(err, BackupError::Row { table: "Menu" }));
    }

    #[test]
    fn runs_group_rows_by_present_columns() {
        let rows = vec![
            json!({ "id": "f1", "question": "a", "answer": "b" }),
            json!({ "id": "f2", "question": "c", "answer": "d" }),
            json!({ "id": "f3", "question": "e", "answer": "f", "order": 2 }),
            json!({ "id": "f4", "question": "g", "answer": "h" }),
        ];
        let models: Vec<faq::ActiveModel> = prepare_rows(SiteTable::Faq, &rows).unwrap();

        let sizes: Vec<usize> = split_into_runs(models, 100).iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 1, 1]);
    }

    #[test]
    fn runs_are_capped_by_bind_parameters() {
        let rows: Vec<Value> = (0..200)
            .map(|n| json!({ "id": format!("i{n}"), "collectionId": "c1", "title": "x" }))
            .collect();
        let models: Vec<collection_item::ActiveModel> =
            prepare_rows(SiteTable::CollectionItem, &rows).unwrap();

        let max_rows = max_rows_per_insert::<collection_item::ActiveModel>();
        let columns = collection_item::Column::iter().count();
        assert!(max_rows * columns <= MAX_BIND_PARAMS);

        let runs = split_into_runs(models, max_rows);
        assert!(runs.iter().all(|run| run.len() <= max_rows));
        assert_eq!(runs.iter().map(Vec::len).sum::<usize>(), 200);
        assert_eq!(runs.len(), 200usize.div_ceil(max_rows));
    }
}

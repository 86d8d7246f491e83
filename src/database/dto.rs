//! Backup document (DTO)
//!
//! Shape of the JSON file exchanged between the exporter and the importer.
//! Rows are kept as raw JSON values: the importer decides per row which
//! columns are present, and a row that is not an object is reported with
//! the table it belongs to instead of a bare serde error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::database::SiteTable;
use crate::entity::{
    account, banner, collection, collection_item, faq, homepage_section, menu, session,
    testimonial, user,
};
use crate::error::{BackupError, Result};
use crate::utils::dates::stamp_dates;

/// One table row as stored in the document.
pub type Row = Map<String, Value>;

/// Treat `null` like a missing table: both mean "nothing to restore".
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The backup document.
///
/// Field names are a contract with the importer; `colecoes` keeps the name
/// the site has always used for its collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// Collections, each with its `items`
    #[serde(rename = "colecoes", default, deserialize_with = "null_as_empty")]
    pub collections: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub banners: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub faqs: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub homepage_sections: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub menus: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub testimonials: Vec<Value>,
    /// Users, each with its `accounts` and `sessions`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<Value>,
}

/// Everything read from the database in one backup run.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub collections: Vec<(collection::Model, Vec<collection_item::Model>)>,
    pub banners: Vec<banner::Model>,
    pub faqs: Vec<faq::Model>,
    pub homepage_sections: Vec<homepage_section::Model>,
    pub menus: Vec<menu::Model>,
    pub testimonials: Vec<testimonial::Model>,
    pub users: Vec<UserWithAuth>,
}

/// A user together with its auth rows.
#[derive(Debug, Clone, Default)]
pub struct UserWithAuth {
    pub user: user::Model,
    pub sessions: Vec<session::Model>,
    pub accounts: Vec<account::Model>,
}

/// Row count of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCount {
    pub table: SiteTable,
    pub rows: u64,
}

/// Serialize a model into a document row with normalized dates.
fn to_row<M: Serialize>(model: &M) -> Result<Row> {
    match serde_json::to_value(model)? {
        Value::Object(mut row) => {
            stamp_dates(&mut row);
            Ok(row)
        }
        _ => Err(BackupError::Json(serde::ser::Error::custom(
            "model did not serialize to an object",
        ))),
    }
}

fn to_rows<M: Serialize>(models: &[M]) -> Result<Vec<Value>> {
    models
        .iter()
        .map(|m| to_row(m).map(Value::Object))
        .collect()
}

impl BackupDocument {
    /// Build the document, nesting items under collections and auth rows under users.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let mut collections = Vec::with_capacity(snapshot.collections.len());
        for (collection, items) in &snapshot.collections {
            let mut row = to_row(collection)?;
            row.insert(
                SiteTable::CollectionItem.document_key().to_string(),
                Value::Array(to_rows(items)?),
            );
            collections.push(Value::Object(row));
        }

        let mut users = Vec::with_capacity(snapshot.users.len());
        for entry in &snapshot.users {
            let mut row = to_row(&entry.user)?;
            row.insert(
                SiteTable::Account.document_key().to_string(),
                Value::Array(to_rows(&entry.accounts)?),
            );
            row.insert(
                SiteTable::Session.document_key().to_string(),
                Value::Array(to_rows(&entry.sessions)?),
            );
            users.push(Value::Object(row));
        }

        Ok(BackupDocument {
            collections,
            banners: to_rows(&snapshot.banners)?,
            faqs: to_rows(&snapshot.faqs)?,
            homepage_sections: to_rows(&snapshot.homepage_sections)?,
            menus: to_rows(&snapshot.menus)?,
            testimonials: to_rows(&snapshot.testimonials)?,
            users,
        })
    }

    /// Rows per table, nested tables included.
    pub fn counts(&self) -> Vec<TableCount> {
        let nested = |parents: &[Value], key: &str| -> u64 {
            parents
                .iter()
                .filter_map(|p| p.get(key).and_then(Value::as_array))
                .map(|children| children.len() as u64)
                .sum()
        };
        let count = |table, rows: usize| TableCount {
            table,
            rows: rows as u64,
        };

        vec![
            count(SiteTable::Collection, self.collections.len()),
            TableCount {
                table: SiteTable::CollectionItem,
                rows: nested(&self.collections, SiteTable::CollectionItem.document_key()),
            },
            count(SiteTable::Banner, self.banners.len()),
            count(SiteTable::Faq, self.faqs.len()),
            count(SiteTable::HomepageSection, self.homepage_sections.len()),
            count(SiteTable::Menu, self.menus.len()),
            count(SiteTable::Testimonial, self.testimonials.len()),
            count(SiteTable::User, self.users.len()),
            TableCount {
                table: SiteTable::Session,
                rows: nested(&self.users, SiteTable::Session.document_key()),
            },
            TableCount {
                table: SiteTable::Account,
                rows: nested(&self.users, SiteTable::Account.document_key()),
            },
        ]
    }
}

//! Site data entities
//!
//! SeaORM entity definitions for every table covered by the backup jobs.
//! Table and column names follow the site's camelCase naming, so the serde
//! form of each `Model` is exactly one row of the backup document.

pub mod prelude;

// === Catalog ===
pub mod collection;
pub mod collection_item;

// === Auth ===
pub mod account;
pub mod session;
pub mod user;

// === Site content ===
pub mod banner;
pub mod faq;
pub mod homepage_section;
pub mod menu;
pub mod testimonial;

use std::fmt;

/// Tables covered by the backup jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteTable {
    Collection,
    CollectionItem,
    User,
    Session,
    Account,
    Banner,
    Faq,
    HomepageSection,
    Menu,
    Testimonial,
}

impl SiteTable {
    /// Delete phase: children before parents.
    pub const DELETE_ORDER: [SiteTable; 10] = [
        SiteTable::CollectionItem,
        SiteTable::Collection,
        SiteTable::Session,
        SiteTable::Account,
        SiteTable::Testimonial,
        SiteTable::Faq,
        SiteTable::HomepageSection,
        SiteTable::Menu,
        SiteTable::Banner,
        SiteTable::User,
    ];

    /// Insert phase: parents before children.
    ///
    /// Session and Account are absent: embedded auth rows are dropped on restore.
    pub const INSERT_ORDER: [SiteTable; 8] = [
        SiteTable::User,
        SiteTable::Banner,
        SiteTable::Menu,
        SiteTable::Testimonial,
        SiteTable::Faq,
        SiteTable::HomepageSection,
        SiteTable::Collection,
        SiteTable::CollectionItem,
    ];

    /// Database table name.
    pub fn table_name(self) -> &'static str {
        match self {
            SiteTable::Collection => "Collection",
            SiteTable::CollectionItem => "CollectionItem",
            SiteTable::User => "User",
            SiteTable::Session => "Session",
            SiteTable::Account => "Account",
            SiteTable::Banner => "Banner",
            SiteTable::Faq => "FAQ",
            SiteTable::HomepageSection => "HomepageSection",
            SiteTable::Menu => "Menu",
            SiteTable::Testimonial => "Testimonial",
        }
    }

    /// Key holding this table's rows in the backup document, either at the
    /// top level or nested under the parent row.
    pub fn document_key(self) -> &'static str {
        match self {
            SiteTable::Collection => "colecoes",
            SiteTable::CollectionItem => "items",
            SiteTable::User => "users",
            SiteTable::Session => "sessions",
            SiteTable::Account => "accounts",
            SiteTable::Banner => "banners",
            SiteTable::Faq => "faqs",
            SiteTable::HomepageSection => "homepageSections",
            SiteTable::Menu => "menus",
            SiteTable::Testimonial => "testimonials",
        }
    }
}

impl fmt::Display for SiteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

//! Shortcut imports for the entity types.

pub use super::account::Entity as Account;
pub use super::banner::Entity as Banner;
pub use super::collection::Entity as Collection;
pub use super::collection_item::Entity as CollectionItem;
pub use super::faq::Entity as Faq;
pub use super::homepage_section::Entity as HomepageSection;
pub use super::menu::Entity as Menu;
pub use super::session::Entity as Session;
pub use super::testimonial::Entity as Testimonial;
pub use super::user::Entity as User;

pub mod connection;
pub mod dto;
pub mod repository;
pub mod tables;

pub use connection::{close_connection, establish_connection};
pub use tables::SiteTable;

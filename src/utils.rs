pub mod dates;
pub mod logs;

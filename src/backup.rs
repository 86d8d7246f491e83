pub mod export;
pub mod restore;

pub use export::{BackupSummary, export_backup};
pub use restore::{RestoreMode, RestoreSummary, restore_backup, restore_document};

use sea_orm::{DatabaseConnection, TransactionTrait};
use std::path::Path;

use crate::database::dto::{BackupDocument, TableCount};
use crate::database::repository::restore_repository::{PreparedRestore, RestoreRepository};
use crate::error::{BackupError, Result};

/// How the two restore phases reach the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RestoreMode {
    /// Each delete/insert commits on its own; a failure midway leaves the
    /// database partially restored.
    #[default]
    Sequential,
    /// Both phases run in one transaction, rolled back on any failure.
    Atomic,
}

/// Result of a restore run.
#[derive(Debug, Clone, Default)]
pub struct RestoreSummary {
    /// Every covered table, in delete order
    pub deleted: Vec<TableCount>,
    /// Only the tables that received a bulk insert, in insert order
    pub inserted: Vec<TableCount>,
    pub skipped_sessions: usize,
    pub skipped_accounts: usize,
}

impl RestoreSummary {
    pub fn inserted_rows(&self, table: crate::database::SiteTable) -> Option<u64> {
        self.inserted
            .iter()
            .find(|c| c.table == table)
            .map(|c| c.rows)
    }
}

/// Replace the contents of every covered table with `document`.
pub async fn restore_document(
    db: &DatabaseConnection,
    document: &BackupDocument,
    mode: RestoreMode,
) -> Result<RestoreSummary> {
    let prepared = PreparedRestore::from_document(document)?;
    let skipped_sessions = prepared.skipped_sessions;
    let skipped_accounts = prepared.skipped_accounts;

    let (deleted, inserted) = match mode {
        RestoreMode::Sequential => {
            let deleted = RestoreRepository::delete_all(db).await?;
            let inserted = RestoreRepository::insert_all(db, prepared).await?;
            (deleted, inserted)
        }
        RestoreMode::Atomic => {
            // dropping the transaction on error rolls it back
            let txn = db.begin().await?;
            let deleted = RestoreRepository::delete_all(&txn).await?;
            let inserted = RestoreRepository::insert_all(&txn, prepared).await?;
            txn.commit().await?;
            (deleted, inserted)
        }
    };

    Ok(RestoreSummary {
        deleted,
        inserted,
        skipped_sessions,
        skipped_accounts,
    })
}

/// Read the backup document at `path` and restore it.
pub async fn restore_backup(
    db: &DatabaseConnection,
    path: &Path,
    mode: RestoreMode,
) -> Result<RestoreSummary> {
    log::info!("Iniciando restauração a partir de {}", path.display());

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| BackupError::io(path, e))?;
    let document: BackupDocument = serde_json::from_str(&raw)?;

    if mode == RestoreMode::Atomic {
        log::info!("Modo atômico: a restauração será feita em uma única transação");
    }

    let summary = restore_document(db, &document, mode).await?;
    log::info!("Restauração concluída com sucesso!");
    Ok(summary)
}

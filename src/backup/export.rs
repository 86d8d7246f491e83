use sea_orm::ConnectionTrait;
use std::path::{Path, PathBuf};

use crate::database::dto::{BackupDocument, TableCount};
use crate::database::repository::snapshot_repository::SnapshotRepository;
use crate::error::{BackupError, Result};

/// Result of a backup run.
#[derive(Debug, Clone)]
pub struct BackupSummary {
    pub path: PathBuf,
    pub tables: Vec<TableCount>,
    pub bytes_written: usize,
}

/// Read the whole database into one document.
pub async fn build_document<C>(db: &C) -> Result<BackupDocument>
where
    C: ConnectionTrait,
{
    let snapshot = SnapshotRepository::snapshot(db).await?;
    BackupDocument::from_snapshot(&snapshot)
}

/// Export every covered table to `path`, overwriting any previous backup.
///
/// The file is written in one go once the whole snapshot is in memory; a
/// failed read never touches the existing file.
pub async fn export_backup<C>(db: &C, path: &Path) -> Result<BackupSummary>
where
    C: ConnectionTrait,
{
    log::info!("Iniciando backup do banco de dados...");

    let document = build_document(db).await?;
    let json = serde_json::to_string_pretty(&document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| BackupError::io(parent, e))?;
    }
    tokio::fs::write(path, &json)
        .await
        .map_err(|e| BackupError::io(path, e))?;

    let tables = document.counts();
    for count in &tables {
        log::info!("Tabela {}: {} registros", count.table, count.rows);
    }
    log::info!("Backup concluído com sucesso: {}", path.display());

    Ok(BackupSummary {
        path: path.to_path_buf(),
        tables,
        bytes_written: json.len(),
    })
}

pub mod backup;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod utils;

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

use backup::{BackupSummary, RestoreSummary, export_backup, restore_backup};
use config::JobConfig;
use database::{close_connection, establish_connection};
use error::Result;

/// Close the job's connection, then hand back the job's own result.
///
/// A close failure is only logged: it must not hide the job outcome.
async fn finish<T>(conn: DatabaseConnection, result: Result<T>) -> Result<T> {
    match close_connection(conn).await {
        Ok(_) => log::debug!("Conexão com o banco de dados encerrada"),
        Err(e) => log::warn!("Erro ao encerrar a conexão com o banco de dados: {}", e),
    }
    result
}

/// Backup job: snapshot the database into the configured backup file.
pub async fn run_backup_job(config: &JobConfig) -> Result<BackupSummary> {
    let conn = establish_connection(&config.database_url).await?;
    log::info!("Conexão com o banco de dados estabelecida");

    let result = export_backup(&conn, &config.backup_file).await;
    finish(conn, result).await
}

/// Restore job: bring the schema up to date, then replace the data with the
/// configured backup file.
pub async fn run_restore_job(config: &JobConfig) -> Result<RestoreSummary> {
    let conn = establish_connection(&config.database_url).await?;
    log::info!("Conexão com o banco de dados estabelecida");

    let result = migrate_and_restore(&conn, config).await;
    finish(conn, result).await
}

async fn migrate_and_restore(
    conn: &DatabaseConnection,
    config: &JobConfig,
) -> Result<RestoreSummary> {
    log::info!("Aplicando migrações pendentes...");
    migration::Migrator::up(conn, None).await?;
    restore_backup(conn, &config.backup_file, config.restore_mode).await
}

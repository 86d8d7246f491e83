//! Restore job: replace the site database contents with `db_backup.json`.

use std::process::ExitCode;

use site_backup_lib::config::JobConfig;
use site_backup_lib::run_restore_job;
use site_backup_lib::utils::logs::{init_logger, report_failure};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = JobConfig::from_env();
    init_logger(
        config
            .as_ref()
            .map(|c| c.log_level)
            .unwrap_or_default(),
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            report_failure("Erro durante a restauração", &e);
            return ExitCode::FAILURE;
        }
    };

    match run_restore_job(&config).await {
        Ok(summary) => {
            let restored: u64 = summary.inserted.iter().map(|c| c.rows).sum();
            log::info!(
                "{} registros restaurados em {} tabelas",
                restored,
                summary.inserted.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_failure("Erro durante a restauração", &e);
            ExitCode::FAILURE
        }
    }
}

//! Backup job: dump the site database to `db_backup.json`.

use std::process::ExitCode;

use site_backup_lib::config::JobConfig;
use site_backup_lib::run_backup_job;
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
            report_failure("Erro durante o backup", &e);
            return ExitCode::FAILURE;
        }
    };

    match run_backup_job(&config).await {
        Ok(summary) => {
            log::info!(
                "Arquivo gerado: {} ({} bytes)",
                summary.path.display(),
                summary.bytes_written
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_failure("Erro durante o backup", &e);
            ExitCode::FAILURE
        }
    }
}

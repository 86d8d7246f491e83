//! Job configuration
//!
//! Both jobs take no command-line arguments. Everything that varies between
//! environments comes from the process environment, optionally seeded by a
//! `.env` file in the working directory.

use std::path::PathBuf;

use crate::backup::RestoreMode;
use crate::database::connection::{ensure_db_dir_exists, path_to_sqlite_url};
use crate::error::{BackupError, Result};
use crate::utils::logs::LogLevel;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BACKUP_FILE: &str = "SITE_BACKUP_FILE";
pub const ENV_RESTORE_ATOMIC: &str = "SITE_RESTORE_ATOMIC";
pub const ENV_LOG_LEVEL: &str = "SITE_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq)]
pub struct JobConfig {
    pub database_url: String,
    pub backup_file: PathBuf,
    pub restore_mode: RestoreMode,
    pub log_level: LogLevel,
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "sim" => Ok(true),
        "0" | "false" | "no" | "nao" | "não" | "" => Ok(false),
        other => Err(BackupError::Config(format!(
            "{} deve ser verdadeiro ou falso, recebido: {}",
            name, other
        ))),
    }
}

/// Default database: the SQLite file under the platform data directory.
fn default_database_url() -> Result<String> {
    let db_path = site_path::get_default_db_path().map_err(BackupError::Config)?;
    ensure_db_dir_exists(&db_path)?;
    Ok(path_to_sqlite_url(&db_path)?)
}

impl JobConfig {
    /// Load `.env` (if any) and read the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        // a missing .env is the normal case in production
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults for
    /// unset or blank values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = match get(ENV_DATABASE_URL) {
            Some(url) => url.trim().to_string(),
            None => default_database_url()?,
        };

        let backup_file = match get(ENV_BACKUP_FILE) {
            Some(path) => site_path::resolve_from_exe_dir(&path),
            None => site_path::get_default_backup_file(),
        }
        .map_err(BackupError::Config)?;

        let atomic = match get(ENV_RESTORE_ATOMIC) {
            Some(raw) => parse_flag(ENV_RESTORE_ATOMIC, &raw)?,
            None => false,
        };
        let restore_mode = if atomic {
            RestoreMode::Atomic
        } else {
            RestoreMode::Sequential
        };

        let log_level = match get(ENV_LOG_LEVEL) {
            Some(raw) => raw.parse().map_err(BackupError::Config)?,
            None => LogLevel::default(),
        };

        Ok(JobConfig {
            database_url,
            backup_file,
            restore_mode,
            log_level,
        })
    }
}

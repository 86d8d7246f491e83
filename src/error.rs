use sea_orm::DbErr;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a backup or restore job can fail.
///
/// None of these are retried: the binaries log the error once and exit 1.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("falha de E/S em {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("documento de backup inválido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("erro de banco de dados: {0}")]
    Db(#[from] DbErr),

    #[error("data inválida em {table}.{field}: {value}")]
    Date {
        table: &'static str,
        field: String,
        value: String,
    },

    #[error("linha inválida na tabela {table}: esperado um objeto JSON")]
    Row { table: &'static str },

    #[error("configuração inválida: {0}")]
    Config(String),
}

impl BackupError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BackupError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BackupError>;

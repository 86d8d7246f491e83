use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Turn a SQLite file path into a connection URL (creating the file on first use).
pub fn path_to_sqlite_url(path: &Path) -> Result<String, DbErr> {
    let db_url = Url::from_file_path(path).map_err(|_| {
        DbErr::Conn(RuntimeErr::Internal(format!(
            "Invalid database path: {}",
            path.display()
        )))
    })?;
    Ok(format!("sqlite:{}?mode=rwc", db_url.path()))
}

/// Make sure the directory of a SQLite file exists.
pub fn ensure_db_dir_exists(path: &Path) -> Result<(), DbErr> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DbErr::Conn(RuntimeErr::Internal(format!(
                "Failed to create database directory: {}",
                e
            )))
        })?;
    }
    Ok(())
}

/// Establish a SeaORM database connection.
///
/// The pool holds exactly one connection: the jobs issue every statement
/// sequentially, and an in-memory SQLite database only exists inside the
/// connection that created it.
pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    log::debug!("Conectando ao banco de dados: {}", options.get_url());

    Database::connect(options).await
}

/// Close the connection, flushing the pool.
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_url_uses_rwc_mode() {
        let path = std::env::temp_dir().join("site_backup_url_test.db");
        let url = path_to_sqlite_url(&path).unwrap();
        assert!(url.starts_with("sqlite:"));
        assert!(url.ends_with("site_backup_url_test.db?mode=rwc"));
    }

    #[test]
    fn relative_paths_are_rejected() {
        assert!(path_to_sqlite_url(Path::new("relative/site.db")).is_err());
    }
}

use std::path::{Path, PathBuf};

/// Path constants shared by both jobs.
pub const BACKUP_FILE_NAME: &str = "db_backup.json";
pub const DB_DATA_DIR: &str = "data";
pub const DB_FILE_NAME: &str = "site.db";
pub const APP_DIR_NAME: &str = "site-backup";

/// Directory holding the running executable.
///
/// The backup document lives next to the job binaries, so every default
/// path below is anchored here rather than on the working directory.
pub fn get_exe_dir() -> Result<PathBuf, String> {
    let exe_path =
        std::env::current_exe().map_err(|e| format!("Failed to resolve executable path: {}", e))?;
    exe_path
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| "Executable has no parent directory".to_string())
}

/// Default location of the backup document: `<exe dir>/db_backup.json`.
pub fn get_default_backup_file() -> Result<PathBuf, String> {
    Ok(get_exe_dir()?.join(BACKUP_FILE_NAME))
}

/// Platform data directory for this tool (cross-platform).
pub fn get_system_data_dir() -> Result<PathBuf, String> {
    use directories::BaseDirs;

    let base_dirs =
        BaseDirs::new().ok_or_else(|| "Failed to resolve system directories".to_string())?;
    Ok(base_dirs.data_dir().join(APP_DIR_NAME))
}

/// Default SQLite file used when no database URL is configured.
pub fn get_default_db_path() -> Result<PathBuf, String> {
    Ok(get_system_data_dir()?.join(DB_DATA_DIR).join(DB_FILE_NAME))
}

/// Resolve a configured path: relative paths are taken from the executable
/// directory, absolute paths are returned as-is.
pub fn resolve_from_exe_dir(configured: &str) -> Result<PathBuf, String> {
    let path = Path::new(configured.trim());
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(get_exe_dir()?.join(path))
    }
}

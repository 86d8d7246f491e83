pub mod restore_repository;
pub mod snapshot_repository;

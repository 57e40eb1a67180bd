use std::path::{Path, PathBuf};
use thiserror::Error;

/// 路徑前置檢查失敗
#[derive(Debug, Error)]
pub enum PathError {
    #[error("folder does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

pub fn validate_directory_exists(path: &Path) -> Result<(), PathError> {
    if !path.exists() {
        return Err(PathError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

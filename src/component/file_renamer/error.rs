//! 重新命名流程的錯誤型別

use crate::tools::PathError;
use std::path::PathBuf;
use thiserror::Error;

/// 整批作業的前置錯誤，發生時不會處理任何檔案
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("folder does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl From<PathError> for RenameError {
    fn from(error: PathError) -> Self {
        match error {
            PathError::NotFound(path) => Self::DirectoryNotFound(path),
            PathError::NotADirectory(path) => Self::NotADirectory(path),
        }
    }
}

/// 排序或命名方式的字串無法辨識
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePolicyError {
    #[error("unknown sort type '{0}' (expected: name, number)")]
    UnknownSortPolicy(String),
    #[error(
        "unknown rename type '{0}' (expected: sequential, numbers_only, text_only, numbers_only_at_end)"
    )]
    UnknownRenamePolicy(String),
}

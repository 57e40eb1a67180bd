use super::path_validator::{PathError, validate_directory_exists};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 資料夾中的單一檔案
///
/// 每次掃描時重新由檔案系統產生，不跨執行保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    file_name: String,
    stem: String,
    extension: String,
}

impl FileEntry {
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (stem, extension) = split_file_name(&file_name);
        let (stem, extension) = (stem.to_string(), extension.to_string());

        Self {
            path,
            file_name,
            stem,
            extension,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 所在資料夾
    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 不含副檔名的檔名
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// 副檔名（含前導點），沒有副檔名時為空字串
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// 將檔名切成 (主檔名, 副檔名)
///
/// 副檔名包含前導點。以點開頭的檔名（例如 `.bashrc`）或以點結尾的檔名視為沒有副檔名。
pub fn split_file_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 && dot < file_name.len() - 1 => file_name.split_at(dot),
        _ => (file_name, ""),
    }
}

/// 列出資料夾下一層的所有檔案（不遞迴、不含子資料夾）
///
/// 回傳順序不保證，排序由呼叫端負責
pub fn scan_directory_files(directory: &Path) -> Result<Vec<FileEntry>, PathError> {
    validate_directory_exists(directory)?;

    let files = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("略過無法讀取的項目: {e}");
                None
            }
        })
        .filter(|entry| entry.path().is_file())
        .map(|entry| FileEntry::new(entry.into_path()))
        .collect();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_split_file_name() {
        assert_eq!(split_file_name("photo_001.jpg"), ("photo_001", ".jpg"));
        assert_eq!(split_file_name("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_file_name("README"), ("README", ""));
    }

    #[test]
    fn test_split_file_name_dotfiles() {
        assert_eq!(split_file_name(".bashrc"), (".bashrc", ""));
        assert_eq!(split_file_name("name."), ("name.", ""));
        assert_eq!(split_file_name(""), ("", ""));
    }

    #[test]
    fn test_file_entry_parts() {
        let entry = FileEntry::new(PathBuf::from("/videos/file_10.mp4"));
        assert_eq!(entry.file_name(), "file_10.mp4");
        assert_eq!(entry.stem(), "file_10");
        assert_eq!(entry.extension(), ".mp4");
        assert_eq!(entry.parent(), Path::new("/videos"));
    }

    #[test]
    fn test_scan_only_direct_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        let sub_dir = temp_dir.path().join("nested");
        fs::create_dir(&sub_dir).unwrap();
        fs::write(sub_dir.join("c.txt"), "c").unwrap();

        let mut names: Vec<String> = scan_directory_files(temp_dir.path())
            .unwrap()
            .iter()
            .map(|entry| entry.file_name().to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("only_dir")).unwrap();
        let files = scan_directory_files(temp_dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = scan_directory_files(&temp_dir.path().join("missing"));
        assert!(matches!(result, Err(PathError::NotFound(_))));
    }

    #[test]
    fn test_scan_file_instead_of_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "a").unwrap();
        let result = scan_directory_files(&file);
        assert!(matches!(result, Err(PathError::NotADirectory(_))));
    }
}

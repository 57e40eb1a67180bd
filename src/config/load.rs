use crate::component::file_renamer::MAX_ZERO_PAD_WIDTH;
use crate::config::types::{Config, SETTINGS_FILE_NAME, UserSettings};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    pub fn new() -> Result<Self> {
        Self::load_from(PathBuf::from(SETTINGS_FILE_NAME))
    }

    /// 從指定路徑載入設定，檔案不存在或內容錯誤時使用預設值
    pub fn load_from(settings_path: PathBuf) -> Result<Self> {
        let settings = Self::load_settings(&settings_path).unwrap_or_else(|e| {
            warn!("無法載入設定，使用預設值: {e:#}");
            UserSettings::default()
        });

        Ok(Self {
            settings,
            settings_path,
        })
    }

    fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let mut settings: UserSettings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        let renamer = &mut settings.file_renamer;
        if renamer.zero_pad_width > MAX_ZERO_PAD_WIDTH {
            warn!("補零寬度 {} 超過上限，改用 {MAX_ZERO_PAD_WIDTH}", renamer.zero_pad_width);
            renamer.zero_pad_width = MAX_ZERO_PAD_WIDTH;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Language;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(temp_dir.path().join("settings.json")).unwrap();
        assert_eq!(config.settings, UserSettings::default());
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let config = Config::load_from(path.clone()).unwrap();
        assert_eq!(config.settings, UserSettings::default());
        assert_eq!(config.settings_path, path);
    }

    #[test]
    fn test_load_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{"language": "ru-RU", "recent_paths": ["/a"]}"#).unwrap();
        let config = Config::load_from(path).unwrap();
        assert_eq!(config.settings.language, Language::RuRu);
        assert_eq!(config.settings.recent_paths, vec!["/a".to_string()]);
    }

    #[test]
    fn test_load_caps_zero_pad_width() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"file_renamer": {"zero_pad_width": 18446744073709551615, "prefix": "ep_"}}"#,
        )
        .unwrap();
        let config = Config::load_from(path).unwrap();
        assert_eq!(config.settings.file_renamer.zero_pad_width, MAX_ZERO_PAD_WIDTH);
        assert_eq!(config.settings.file_renamer.prefix, "ep_");
    }
}

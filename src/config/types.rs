use crate::component::file_renamer::{RenameOptions, RenamePolicy, RenameRequest, SortPolicy};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 10;

/// 預設設定檔位置（目前工作目錄）
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// 介面語言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "ru-RU")]
    RuRu,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::EnUs, Self::RuRu];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::RuRu => "ru-RU",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EnUs => "English",
            Self::RuRu => "Русский",
        };
        f.write_str(name)
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" => Ok(Self::EnUs),
            "ru" | "ru-ru" => Ok(Self::RuRu),
            other => bail!("unsupported language '{other}' (expected: en-US, ru-RU)"),
        }
    }
}

/// 批次重新命名的預設值（上次使用的選項）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRenamerSettings {
    pub sort_policy: SortPolicy,
    pub rename_policy: RenamePolicy,
    pub prefix: String,
    pub suffix: String,
    pub zero_pad_width: usize,
    pub dry_run: bool,
}

impl Default for FileRenamerSettings {
    fn default() -> Self {
        Self {
            sort_policy: SortPolicy::default(),
            rename_policy: RenamePolicy::default(),
            prefix: String::new(),
            suffix: String::new(),
            zero_pad_width: 0,
            dry_run: true,
        }
    }
}

impl FileRenamerSettings {
    #[must_use]
    pub fn to_request(&self, directory: PathBuf) -> RenameRequest {
        RenameRequest {
            directory,
            sort_policy: self.sort_policy,
            rename_policy: self.rename_policy,
            options: RenameOptions {
                prefix: self.prefix.clone(),
                suffix: self.suffix.clone(),
                zero_pad_width: self.zero_pad_width,
                dry_run: self.dry_run,
            },
        }
    }

    pub fn update_from(&mut self, request: &RenameRequest) {
        self.sort_policy = request.sort_policy;
        self.rename_policy = request.rename_policy;
        self.prefix.clone_from(&request.options.prefix);
        self.suffix.clone_from(&request.options.suffix);
        self.zero_pad_width = request.options.zero_pad_width;
        self.dry_run = request.options.dry_run;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub recent_paths: Vec<String>,
    pub file_renamer: FileRenamerSettings,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: UserSettings,
    pub settings_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            settings_path: PathBuf::from(SETTINGS_FILE_NAME),
        }
    }
}

pub mod load;
pub mod save;
pub mod types;

pub use types::{
    Config, FileRenamerSettings, Language, MAX_RECENT_PATHS, SETTINGS_FILE_NAME, UserSettings,
};

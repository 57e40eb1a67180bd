//! 批次重新命名元件
//!
//! 依檔名或自然數字排序資料夾中的檔案，再以指定的命名方式重新命名

mod error;
mod event_reporter;
mod file_sorter;
mod filename_generator;
mod main;
mod rename_executor;

pub use error::{ParsePolicyError, RenameError};
pub use event_reporter::{ConsoleReporter, describe_event, summary_lines};
pub use file_sorter::{FileSorter, SortPolicy, compare_file_names};
pub use filename_generator::{
    FilenameGenerator, MAX_ZERO_PAD_WIDTH, RenameOptions, RenamePolicy, pad_with_zeros,
};
pub use main::{
    FileRenamer, check_zero_pad_width, rename_policy_label, sort_policy_label,
};
pub use rename_executor::{
    ChannelObserver, RenameEvent, RenameExecutor, RenameObserver, RenamePlanEntry, RenameRecord,
    RenameRequest, RenameSummary, build_rename_plan,
};

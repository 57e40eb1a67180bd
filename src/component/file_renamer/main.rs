//! 批次重新命名主模組
//!
//! 互動式選擇資料夾與命名方式，在背景執行緒執行重新命名並即時顯示進度

use super::event_reporter::ConsoleReporter;
use super::file_sorter::SortPolicy;
use super::filename_generator::{MAX_ZERO_PAD_WIDTH, RenamePolicy};
use super::rename_executor::{ChannelObserver, RenameExecutor, RenameRequest, RenameSummary};
use crate::config::Config;
use crate::config::save::add_recent_path;
use crate::tools::validate_directory_exists;
use anyhow::{Result, anyhow};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use log::{info, warn};
use rust_i18n::t;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::thread;

/// 批次重新命名器
pub struct FileRenamer {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl FileRenamer {
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    /// 取回執行後的設定（包含更新過的預設值與路徑歷史）
    pub fn into_config(self) -> Config {
        self.config
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", style(t!("rename.title")).cyan().bold());

        let Some(directory) = self.prompt_directory()? else {
            return Ok(()); // ESC pressed
        };
        validate_directory_exists(&directory)?;

        let Some(request) = self.prompt_request(directory)? else {
            return Ok(());
        };
        self.remember(&request);

        let summary = self.execute(&request)?;

        if request.options.dry_run && summary.total_count > 0 && !summary.cancelled {
            if !self.confirm_apply()? {
                println!("{}", style(t!("rename.not_applied")).yellow());
                return Ok(());
            }

            let mut apply_request = request;
            apply_request.options.dry_run = false;
            self.execute(&apply_request)?;
        }

        Ok(())
    }

    /// 在背景執行緒執行重新命名，目前執行緒負責顯示事件
    pub fn execute(&self, request: &RenameRequest) -> Result<RenameSummary> {
        let (sender, receiver) = mpsc::channel();
        let executor = RenameExecutor::new(Arc::clone(&self.shutdown_signal));
        let worker_request = request.clone();

        let worker = thread::spawn(move || {
            let mut observer = ChannelObserver::new(sender);
            executor.rename_all(&worker_request, &mut observer)
        });

        let mut reporter = ConsoleReporter::new();
        for event in receiver {
            reporter.handle(&event);
        }

        let summary = worker
            .join()
            .map_err(|_| anyhow!("rename worker thread panicked"))??;

        info!(
            "批次重新命名完成 - 成功: {}, 失敗: {}, 總數: {}",
            summary.success_count, summary.failure_count, summary.total_count
        );

        Ok(summary)
    }

    fn remember(&mut self, request: &RenameRequest) {
        let settings = &mut self.config.settings;
        add_recent_path(settings, &request.directory.to_string_lossy());
        settings.file_renamer.update_from(request);

        if let Err(e) = self.config.save() {
            warn!("無法儲存設定: {e}");
        }
    }

    fn prompt_directory(&self) -> Result<Option<PathBuf>> {
        let recent_paths = &self.config.settings.recent_paths;

        if recent_paths.is_empty() {
            return Ok(Some(Self::input_directory()?));
        }

        let mut options: Vec<String> = recent_paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let indicator = if Path::new(p).is_dir() { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        options.push(t!("common.new_path").into_owned());

        println!("{}", style(t!("common.esc_hint")).dim());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("rename.select_folder"))
            .items(&options)
            .default(0)
            .interact_opt()?;

        match selection {
            None => Ok(None),
            Some(idx) if idx < recent_paths.len() => Ok(Some(PathBuf::from(&recent_paths[idx]))),
            Some(_) => Ok(Some(Self::input_directory()?)),
        }
    }

    fn input_directory() -> Result<PathBuf> {
        let path: String = Input::new()
            .with_prompt(t!("rename.folder_prompt"))
            .interact_text()?;
        Ok(PathBuf::from(path.trim()))
    }

    fn prompt_request(&self, directory: PathBuf) -> Result<Option<RenameRequest>> {
        let defaults = &self.config.settings.file_renamer;

        let sort_items: Vec<String> = SortPolicy::ALL
            .iter()
            .map(|policy| sort_policy_label(*policy))
            .collect();
        let Some(sort_index) = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("rename.sort_prompt"))
            .items(&sort_items)
            .default(position_of(&SortPolicy::ALL, &defaults.sort_policy))
            .interact_opt()?
        else {
            return Ok(None);
        };

        let rename_items: Vec<String> = RenamePolicy::ALL
            .iter()
            .map(|policy| rename_policy_label(*policy))
            .collect();
        let Some(rename_index) = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("rename.rename_prompt"))
            .items(&rename_items)
            .default(position_of(&RenamePolicy::ALL, &defaults.rename_policy))
            .interact_opt()?
        else {
            return Ok(None);
        };

        let prefix: String = Input::new()
            .with_prompt(t!("rename.prefix_prompt"))
            .default(defaults.prefix.clone())
            .allow_empty(true)
            .interact_text()?;

        let suffix: String = Input::new()
            .with_prompt(t!("rename.suffix_prompt"))
            .default(defaults.suffix.clone())
            .allow_empty(true)
            .interact_text()?;

        println!("{}", style(t!("rename.zero_padding_hint")).dim());
        let zero_pad_width: usize = Input::new()
            .with_prompt(t!("rename.zero_padding_prompt"))
            .default(defaults.zero_pad_width)
            .validate_with(|width: &usize| check_zero_pad_width(*width))
            .interact_text()?;

        let dry_run = Confirm::new()
            .with_prompt(t!("rename.dry_run_prompt"))
            .default(defaults.dry_run)
            .interact()?;

        let mut settings = defaults.clone();
        settings.sort_policy = SortPolicy::ALL[sort_index];
        settings.rename_policy = RenamePolicy::ALL[rename_index];
        settings.prefix = prefix;
        settings.suffix = suffix;
        settings.zero_pad_width = zero_pad_width;
        settings.dry_run = dry_run;

        Ok(Some(settings.to_request(directory)))
    }

    fn confirm_apply(&self) -> Result<bool> {
        let confirmed = Confirm::new()
            .with_prompt(t!("rename.apply_prompt"))
            .default(false)
            .interact()?;
        Ok(confirmed)
    }
}

/// 補零寬度超過上限時回傳目前語系的錯誤訊息
pub fn check_zero_pad_width(width: usize) -> Result<(), String> {
    if width > MAX_ZERO_PAD_WIDTH {
        return Err(t!("rename.zero_padding_too_large", max = MAX_ZERO_PAD_WIDTH).into_owned());
    }
    Ok(())
}

fn position_of<T: PartialEq>(items: &[T], value: &T) -> usize {
    items.iter().position(|item| item == value).unwrap_or(0)
}

pub fn sort_policy_label(policy: SortPolicy) -> String {
    match policy {
        SortPolicy::ByName => t!("rename.sort_name"),
        SortPolicy::ByNaturalNumber => t!("rename.sort_number"),
    }
    .into_owned()
}

pub fn rename_policy_label(policy: RenamePolicy) -> String {
    match policy {
        RenamePolicy::Sequential => t!("rename.rename_sequential"),
        RenamePolicy::NumbersOnly => t!("rename.rename_numbers_only"),
        RenamePolicy::TextOnly => t!("rename.rename_text_only"),
        RenamePolicy::TrailingNumber => t!("rename.rename_numbers_only_at_end"),
    }
    .into_owned()
}

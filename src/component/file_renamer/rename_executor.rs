//! 重新命名執行模組
//!
//! 掃描 → 排序 → 產生不重複的新檔名 → 預覽或實際重新命名。
//! 不產生任何顯示文字，只回報結構化事件，由呼叫端決定如何呈現。

use super::error::RenameError;
use super::file_sorter::{FileSorter, SortPolicy};
use super::filename_generator::{FilenameGenerator, RenameOptions, RenamePolicy};
use crate::tools::{FileEntry, scan_directory_files, split_file_name};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

/// 一次重新命名作業的輸入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub directory: PathBuf,
    pub sort_policy: SortPolicy,
    pub rename_policy: RenamePolicy,
    pub options: RenameOptions,
}

/// 重新命名計畫中的一筆：原始檔案與最終檔名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlanEntry {
    /// 排序後的編號（從 1 開始）
    pub index: usize,
    pub source: FileEntry,
    pub new_name: String,
}

impl RenamePlanEntry {
    pub fn destination(&self) -> PathBuf {
        self.source.parent().join(&self.new_name)
    }

    fn record(&self) -> RenameRecord {
        RenameRecord {
            index: self.index,
            original: self.source.file_name().to_string(),
            renamed: self.new_name.clone(),
        }
    }
}

/// 事件中描述單一檔案的資料
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRecord {
    pub index: usize,
    pub original: String,
    pub renamed: String,
}

/// 重新命名結果統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameSummary {
    pub success_count: usize,
    pub failure_count: usize,
    /// 掃描到的檔案總數
    pub total_count: usize,
    /// 是否在處理完所有檔案前被中斷
    pub cancelled: bool,
}

impl RenameSummary {
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.success_count + self.failure_count
    }
}

/// 重新命名過程中的事件
#[derive(Debug, Clone, PartialEq)]
pub enum RenameEvent {
    Started {
        directory: PathBuf,
        total: usize,
        dry_run: bool,
    },
    /// 預覽模式下預計的重新命名
    Previewed(RenameRecord),
    Renamed(RenameRecord),
    /// 目標檔名已被其他檔案使用
    TargetExists(RenameRecord),
    RenameFailed {
        record: RenameRecord,
        error: String,
    },
    Progress {
        completed: usize,
        total: usize,
    },
    Cancelled {
        completed: usize,
        total: usize,
    },
    Finished(RenameSummary),
}

impl RenameEvent {
    /// 進度比例（0.0 ~ 1.0），非進度事件回傳 None
    #[must_use]
    pub fn progress_fraction(&self) -> Option<f64> {
        match self {
            Self::Progress { completed, total } if *total > 0 => {
                Some(*completed as f64 / *total as f64)
            }
            _ => None,
        }
    }
}

/// 接收重新命名事件的一方
pub trait RenameObserver {
    fn notify(&mut self, event: RenameEvent);
}

impl<F: FnMut(RenameEvent)> RenameObserver for F {
    fn notify(&mut self, event: RenameEvent) {
        self(event);
    }
}

/// 將事件送往另一個執行緒（例如 UI 執行緒）
pub struct ChannelObserver {
    sender: Sender<RenameEvent>,
}

impl ChannelObserver {
    pub const fn new(sender: Sender<RenameEvent>) -> Self {
        Self { sender }
    }
}

impl RenameObserver for ChannelObserver {
    fn notify(&mut self, event: RenameEvent) {
        // 接收端已關閉時不影響重新命名本身
        if self.sender.send(event).is_err() {
            debug!("事件接收端已關閉");
        }
    }
}

/// 依序產生每個檔案的最終檔名，同一批次內不會重複
///
/// 重複時在副檔名前加上 `_1`, `_2`, ... 直到未被使用
pub fn build_rename_plan(
    sorted_files: Vec<FileEntry>,
    generator: &FilenameGenerator,
) -> Vec<RenamePlanEntry> {
    let mut claimed_names: HashSet<String> = HashSet::with_capacity(sorted_files.len());

    sorted_files
        .into_iter()
        .enumerate()
        .map(|(i, source)| {
            let index = i + 1;
            let candidate = generator.generate(source.stem(), source.extension(), index);
            let new_name = claim_unique_name(candidate, &mut claimed_names);
            RenamePlanEntry {
                index,
                source,
                new_name,
            }
        })
        .collect()
}

fn claim_unique_name(candidate: String, claimed_names: &mut HashSet<String>) -> String {
    let mut new_name = candidate.clone();
    let (stem, extension) = split_file_name(&candidate);
    let mut counter = 1;

    while claimed_names.contains(&new_name) {
        new_name = format!("{stem}_{counter}{extension}");
        counter += 1;
    }

    claimed_names.insert(new_name.clone());
    new_name
}

/// 判斷兩個路徑是否指向同一個檔案（不跟隨符號連結）
fn is_same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let (Ok(x), Ok(y)) = (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
            return x.dev() == y.dev() && x.ino() == y.ino();
        }
    }

    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

/// 單一檔案的處理結果
enum EntryOutcome {
    Success,
    Failure,
}

/// 重新命名執行器
pub struct RenameExecutor {
    shutdown_signal: Arc<AtomicBool>,
    file_sorter: FileSorter,
}

impl RenameExecutor {
    pub const fn new(shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            shutdown_signal,
            file_sorter: FileSorter::new(),
        }
    }

    /// 掃描、排序並產生重新命名計畫，不修改檔案系統
    pub fn plan(&self, request: &RenameRequest) -> Result<Vec<RenamePlanEntry>, RenameError> {
        let files = scan_directory_files(&request.directory)?;
        let sorted_files = self.file_sorter.sort(files, request.sort_policy);
        let generator = FilenameGenerator::new(request.rename_policy, &request.options);
        Ok(build_rename_plan(sorted_files, &generator))
    }

    /// 重新命名資料夾內所有檔案
    ///
    /// 只有資料夾不存在或不是資料夾時回傳錯誤；單一檔案失敗只計入失敗數量並繼續。
    /// 每處理完一個檔案檢查一次中斷信號。
    pub fn rename_all(
        &self,
        request: &RenameRequest,
        observer: &mut impl RenameObserver,
    ) -> Result<RenameSummary, RenameError> {
        let plan = self.plan(request)?;
        let total = plan.len();
        let dry_run = request.options.dry_run;

        info!(
            "開始重新命名 {}：{} 個檔案，排序 {}，命名 {}，預覽模式 {}",
            request.directory.display(),
            total,
            request.sort_policy,
            request.rename_policy,
            dry_run
        );

        observer.notify(RenameEvent::Started {
            directory: request.directory.clone(),
            total,
            dry_run,
        });

        let mut summary = RenameSummary {
            total_count: total,
            ..RenameSummary::default()
        };

        // 已移走的來源檔名，預覽時視為可用
        let mut vacated: HashSet<PathBuf> = HashSet::new();

        for entry in &plan {
            match self.apply_entry(entry, dry_run, &mut vacated, observer) {
                EntryOutcome::Success => summary.success_count += 1,
                EntryOutcome::Failure => summary.failure_count += 1,
            }

            observer.notify(RenameEvent::Progress {
                completed: entry.index,
                total,
            });

            if entry.index < total && self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，已處理 {}/{} 個檔案", entry.index, total);
                summary.cancelled = true;
                observer.notify(RenameEvent::Cancelled {
                    completed: entry.index,
                    total,
                });
                break;
            }
        }

        info!(
            "重新命名結束 - 成功: {}, 失敗: {}, 總數: {}",
            summary.success_count, summary.failure_count, summary.total_count
        );
        observer.notify(RenameEvent::Finished(summary));

        Ok(summary)
    }

    fn apply_entry(
        &self,
        entry: &RenamePlanEntry,
        dry_run: bool,
        vacated: &mut HashSet<PathBuf>,
        observer: &mut impl RenameObserver,
    ) -> EntryOutcome {
        let source = entry.source.path();
        let destination = entry.destination();

        let target_taken =
            fs::symlink_metadata(&destination).is_ok() && !vacated.contains(&destination);
        if target_taken && !is_same_file(source, &destination) {
            warn!("目標檔案已存在: {}", destination.display());
            observer.notify(RenameEvent::TargetExists(entry.record()));
            return EntryOutcome::Failure;
        }

        if dry_run {
            vacated.insert(source.to_path_buf());
            observer.notify(RenameEvent::Previewed(entry.record()));
            return EntryOutcome::Success;
        }

        match fs::rename(source, &destination) {
            Ok(()) => {
                debug!("{} -> {}", source.display(), destination.display());
                vacated.insert(source.to_path_buf());
                observer.notify(RenameEvent::Renamed(entry.record()));
                EntryOutcome::Success
            }
            Err(e) => {
                warn!("無法重新命名 {}: {e}", source.display());
                observer.notify(RenameEvent::RenameFailed {
                    record: entry.record(),
                    error: e.to_string(),
                });
                EntryOutcome::Failure
            }
        }
    }
}

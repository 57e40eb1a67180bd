//! 事件顯示模組
//!
//! 將重新命名事件轉成目前語系的文字並輸出到終端機

use super::rename_executor::{RenameEvent, RenameSummary};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_i18n::t;

/// 單一事件的文字描述，進度與結束事件沒有對應的文字
#[must_use]
pub fn describe_event(event: &RenameEvent) -> Option<String> {
    let line = match event {
        RenameEvent::Started {
            directory, total, ..
        } if *total == 0 => t!(
            "rename.files_not_found",
            folder = directory.display()
        ),
        RenameEvent::Started {
            directory, total, ..
        } => t!(
            "rename.files_found",
            count = total,
            folder = directory.display()
        ),
        RenameEvent::Previewed(record) => t!(
            "rename.preview_renamed",
            index = record.index,
            from = record.original,
            to = record.renamed
        ),
        RenameEvent::Renamed(record) => t!(
            "rename.renamed",
            index = record.index,
            from = record.original,
            to = record.renamed
        ),
        RenameEvent::TargetExists(record) => {
            t!("rename.target_exists", name = record.renamed)
        }
        RenameEvent::RenameFailed { record, error } => t!(
            "rename.rename_error",
            name = record.original,
            error = error
        ),
        RenameEvent::Cancelled { completed, total } => t!(
            "rename.stopping",
            completed = completed,
            total = total
        ),
        RenameEvent::Progress { .. } | RenameEvent::Finished(_) => return None,
    };

    Some(line.into_owned())
}

/// 結果摘要
#[must_use]
pub fn summary_lines(summary: &RenameSummary, dry_run: bool) -> Vec<String> {
    let mut lines = vec![
        t!("rename.summary_title").into_owned(),
        t!("rename.successful", count = summary.success_count).into_owned(),
        t!("rename.failed", count = summary.failure_count).into_owned(),
        t!("rename.total", count = summary.total_count).into_owned(),
    ];

    if summary.cancelled {
        lines.push(
            t!(
                "rename.cancelled_summary",
                completed = summary.processed(),
                total = summary.total_count
            )
            .into_owned(),
        );
    }

    let closing = if dry_run {
        t!("rename.preview_complete")
    } else {
        t!("rename.rename_complete")
    };
    lines.push(closing.into_owned());

    lines
}

/// 終端機輸出：逐行記錄與進度條
#[derive(Default)]
pub struct ConsoleReporter {
    progress_bar: Option<ProgressBar>,
    dry_run: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &RenameEvent) {
        match event {
            RenameEvent::Started { total, dry_run, .. } => {
                self.dry_run = *dry_run;
                if let Some(line) = describe_event(event) {
                    let styled = if *total == 0 {
                        style(line).yellow()
                    } else {
                        style(line).green()
                    };
                    println!("{styled}");
                }
                if *total > 0 {
                    if *dry_run {
                        println!("{}", style(t!("rename.preview_mode")).cyan());
                    }
                    self.progress_bar = Some(create_progress_bar(*total));
                }
            }
            RenameEvent::Previewed(_) | RenameEvent::Renamed(_) => {
                if let Some(line) = describe_event(event) {
                    self.println(&line);
                }
            }
            RenameEvent::TargetExists(_) | RenameEvent::RenameFailed { .. } => {
                if let Some(line) = describe_event(event) {
                    self.println(&style(line).red().to_string());
                }
            }
            RenameEvent::Progress { completed, .. } => {
                if let Some(progress_bar) = &self.progress_bar {
                    progress_bar.set_position(*completed as u64);
                }
            }
            RenameEvent::Cancelled { .. } => {
                if let Some(line) = describe_event(event) {
                    self.println(&style(line).yellow().to_string());
                }
                if let Some(progress_bar) = self.progress_bar.take() {
                    progress_bar.abandon_with_message(t!("rename.interrupted").into_owned());
                }
            }
            RenameEvent::Finished(summary) => {
                if let Some(progress_bar) = self.progress_bar.take() {
                    progress_bar.finish_with_message(t!("rename.done").into_owned());
                }
                if summary.total_count > 0 {
                    print_summary(summary, self.dry_run);
                }
            }
        }
    }

    fn println(&self, line: &str) {
        match &self.progress_bar {
            Some(progress_bar) => progress_bar.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let progress_bar = ProgressBar::new(total as u64);
    if let Ok(progress_style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
    {
        progress_bar.set_style(progress_style.progress_chars("#>-"));
    }
    progress_bar.set_message(t!("rename.progress_message").into_owned());
    progress_bar
}

fn print_summary(summary: &RenameSummary, dry_run: bool) {
    let lines = summary_lines(summary, dry_run);
    println!();
    for (i, line) in lines.iter().enumerate() {
        match i {
            0 => println!("{}", style(line).cyan().bold()),
            1 => println!("  {}", style(line).green()),
            2 if summary.failure_count > 0 => println!("  {}", style(line).red()),
            _ if i == lines.len() - 1 => println!("{}", style(line).bold()),
            _ => println!("  {line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::file_renamer::RenameRecord;
    use std::path::PathBuf;

    fn record() -> RenameRecord {
        RenameRecord {
            index: 3,
            original: "photo_003.jpg".to_string(),
            renamed: "img_3_final.jpg".to_string(),
        }
    }

    #[test]
    fn test_describe_preview_and_rename() {
        assert_eq!(
            describe_event(&RenameEvent::Previewed(record())).unwrap(),
            "[3] photo_003.jpg -> img_3_final.jpg"
        );
        assert_eq!(
            describe_event(&RenameEvent::Renamed(record())).unwrap(),
            "[3] Renamed: photo_003.jpg -> img_3_final.jpg"
        );
    }

    #[test]
    fn test_describe_failures() {
        assert_eq!(
            describe_event(&RenameEvent::TargetExists(record())).unwrap(),
            "Error: Target file already exists: img_3_final.jpg"
        );
        let failed = RenameEvent::RenameFailed {
            record: record(),
            error: "permission denied".to_string(),
        };
        assert_eq!(
            describe_event(&failed).unwrap(),
            "Error renaming photo_003.jpg: permission denied"
        );
    }

    #[test]
    fn test_describe_started() {
        let empty = RenameEvent::Started {
            directory: PathBuf::from("/data"),
            total: 0,
            dry_run: true,
        };
        assert_eq!(describe_event(&empty).unwrap(), "No files found in '/data'");

        let started = RenameEvent::Started {
            directory: PathBuf::from("/data"),
            total: 5,
            dry_run: false,
        };
        assert_eq!(describe_event(&started).unwrap(), "Found 5 file(s) in '/data'");
    }

    #[test]
    fn test_progress_has_no_text() {
        let progress = RenameEvent::Progress {
            completed: 1,
            total: 2,
        };
        assert!(describe_event(&progress).is_none());
    }

    #[test]
    fn test_summary_lines() {
        let summary = RenameSummary {
            success_count: 4,
            failure_count: 1,
            total_count: 5,
            cancelled: false,
        };
        let lines = summary_lines(&summary, true);
        assert_eq!(lines[1], "Successful: 4");
        assert_eq!(lines[2], "Failed: 1");
        assert_eq!(lines[3], "Total: 5");
        assert_eq!(
            lines.last().unwrap(),
            "Preview complete! Files were not renamed."
        );
    }

    #[test]
    fn test_summary_lines_cancelled() {
        let summary = RenameSummary {
            success_count: 2,
            failure_count: 0,
            total_count: 6,
            cancelled: true,
        };
        let lines = summary_lines(&summary, false);
        assert!(lines.contains(&"Cancelled after 2/6 file(s)".to_string()));
        assert_eq!(lines.last().unwrap(), "Rename complete!");
    }
}

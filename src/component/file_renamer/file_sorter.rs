//! 檔案排序模組
//!
//! 依檔名或自然數字順序排列檔案

use super::error::ParsePolicyError;
use crate::tools::FileEntry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortPolicy {
    /// 依完整檔名排序（不分大小寫）
    #[default]
    #[serde(rename = "name")]
    ByName,
    /// 自然排序，檔名中的數字以數值比較（file2 在 file10 之前）
    #[serde(rename = "number")]
    ByNaturalNumber,
}

impl SortPolicy {
    pub const ALL: [Self; 2] = [Self::ByName, Self::ByNaturalNumber];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ByName => "name",
            Self::ByNaturalNumber => "number",
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s.trim())
            .ok_or_else(|| ParsePolicyError::UnknownSortPolicy(s.to_string()))
    }
}

/// 檔名中的一段：文字或連續數字
#[derive(Debug, PartialEq, Eq)]
enum NameSegment<'a> {
    Text(String),
    Digits(&'a str),
}

/// 將檔名切成交錯的文字段與數字段
///
/// 一定以文字段開頭（可能為空字串），之後文字與數字交替出現，
/// 因此兩個檔名同位置的段落類型必定相同
fn natural_segments(name: &str) -> Vec<NameSegment<'_>> {
    let mut segments = Vec::new();
    let mut rest = name;
    let mut expect_digits = false;

    loop {
        let split_at = rest
            .find(|c: char| c.is_ascii_digit() != expect_digits)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(split_at);

        if expect_digits {
            if head.is_empty() {
                break;
            }
            segments.push(NameSegment::Digits(head));
        } else {
            segments.push(NameSegment::Text(head.to_lowercase()));
        }

        if tail.is_empty() {
            break;
        }
        rest = tail;
        expect_digits = !expect_digits;
    }

    segments
}

/// 以數值比較兩段數字字串，不受長度限制
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_natural(a: &str, b: &str) -> Ordering {
    let left = natural_segments(a);
    let right = natural_segments(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (NameSegment::Digits(x), NameSegment::Digits(y)) => compare_digit_runs(x, y),
            (NameSegment::Text(x), NameSegment::Text(y)) => x.cmp(y),
            // 段落交錯出現，同位置類型必定相同
            (NameSegment::Text(_), NameSegment::Digits(_)) => Ordering::Less,
            (NameSegment::Digits(_), NameSegment::Text(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len())
}

/// 不分大小寫比較，相同時再以原始字串決定，確保順序固定
fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// 比較兩個檔名
#[must_use]
pub fn compare_file_names(a: &str, b: &str, policy: SortPolicy) -> Ordering {
    match policy {
        SortPolicy::ByName => compare_case_insensitive(a, b),
        SortPolicy::ByNaturalNumber => {
            compare_natural(a, b).then_with(|| compare_case_insensitive(a, b))
        }
    }
}

/// 檔案排序器
pub struct FileSorter;

impl Default for FileSorter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSorter {
    pub const fn new() -> Self {
        Self
    }

    /// 依排序方式排列檔案
    ///
    /// 純函式：只依輸入決定結果，不會修改檔案系統
    #[must_use]
    pub fn sort(&self, mut entries: Vec<FileEntry>, policy: SortPolicy) -> Vec<FileEntry> {
        entries.sort_by(|a, b| compare_file_names(a.file_name(), b.file_name(), policy));
        entries
    }
}

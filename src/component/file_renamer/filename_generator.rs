//! 新檔名產生模組
//!
//! 依命名方式從原始主檔名與排序後的編號產生新檔名

use super::error::ParsePolicyError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// 命名方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenamePolicy {
    /// 使用排序後的編號（1, 2, 3, ...）
    #[default]
    #[serde(rename = "sequential")]
    Sequential,
    /// 只保留檔名中的數字
    #[serde(rename = "numbers_only")]
    NumbersOnly,
    /// 只保留檔名中的文字
    #[serde(rename = "text_only")]
    TextOnly,
    /// 只保留檔名結尾、前面接著非數字字元的數字
    #[serde(rename = "numbers_only_at_end")]
    TrailingNumber,
}

impl RenamePolicy {
    pub const ALL: [Self; 4] = [
        Self::Sequential,
        Self::NumbersOnly,
        Self::TextOnly,
        Self::TrailingNumber,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::NumbersOnly => "numbers_only",
            Self::TextOnly => "text_only",
            Self::TrailingNumber => "numbers_only_at_end",
        }
    }
}

impl fmt::Display for RenamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenamePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s.trim())
            .ok_or_else(|| ParsePolicyError::UnknownRenamePolicy(s.to_string()))
    }
}

/// 重新命名選項
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameOptions {
    pub prefix: String,
    pub suffix: String,
    /// 補零設定：0 表示不補零，N 表示補到 N + 1 位數（1 = 09, 2 = 009）
    pub zero_pad_width: usize,
    /// 只預覽，不實際重新命名
    pub dry_run: bool,
}

/// TextOnly 沒有留下任何文字時使用的名稱
const TEXT_FALLBACK_TOKEN: &str = "file";

/// 補零寬度上限，總位數為上限 + 1
pub const MAX_ZERO_PAD_WIDTH: usize = 16;

static REGEX_DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid regex"));

static REGEX_MULTIPLE_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

// 結尾數字前必須是分隔字元，字母緊接數字（例如 file123）不算
static REGEX_TRAILING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9\p{Alphabetic}]([0-9]+)$").expect("Invalid regex"));

/// 檔名產生器
pub struct FilenameGenerator {
    policy: RenamePolicy,
    prefix: String,
    suffix: String,
    zero_pad_width: usize,
    regex_digit_run: &'static Regex,
    regex_multiple_spaces: &'static Regex,
    regex_trailing_number: &'static Regex,
}

impl FilenameGenerator {
    pub fn new(policy: RenamePolicy, options: &RenameOptions) -> Self {
        Self {
            policy,
            prefix: options.prefix.clone(),
            suffix: options.suffix.clone(),
            zero_pad_width: options.zero_pad_width,
            regex_digit_run: &REGEX_DIGIT_RUN,
            regex_multiple_spaces: &REGEX_MULTIPLE_SPACES,
            regex_trailing_number: &REGEX_TRAILING_NUMBER,
        }
    }

    pub const fn policy(&self) -> RenamePolicy {
        self.policy
    }

    /// 產生新檔名
    ///
    /// # Arguments
    /// * `stem` - 原始主檔名（不含副檔名）
    /// * `extension` - 原始副檔名（含前導點，可為空）
    /// * `index` - 排序後的編號（從 1 開始）
    ///
    /// # Returns
    /// `prefix + 主檔名 + suffix + 副檔名`，不檢查檔案系統不允許的字元
    pub fn generate(&self, stem: &str, extension: &str, index: usize) -> String {
        let candidate = self.candidate_stem(stem, index);
        let padded = pad_with_zeros(&candidate, self.zero_pad_width);

        format!("{}{}{}{}", self.prefix, padded, self.suffix, extension)
    }

    /// 依命名方式產生主檔名，無法擷取時改用編號
    pub fn candidate_stem(&self, stem: &str, index: usize) -> String {
        match self.policy {
            RenamePolicy::Sequential => index.to_string(),
            RenamePolicy::NumbersOnly => {
                let numbers = self.extract_numbers_only(stem);
                if numbers.is_empty() {
                    index.to_string()
                } else {
                    numbers
                }
            }
            RenamePolicy::TextOnly => {
                let text = self.extract_text_only(stem);
                if text.is_empty() {
                    format!("{TEXT_FALLBACK_TOKEN}_{index}")
                } else {
                    text
                }
            }
            RenamePolicy::TrailingNumber => self
                .extract_trailing_number(stem)
                .unwrap_or_else(|| index.to_string()),
        }
    }

    /// 依序串接所有連續數字，不加分隔
    fn extract_numbers_only(&self, stem: &str) -> String {
        self.regex_digit_run
            .find_iter(stem)
            .map(|m| m.as_str())
            .collect()
    }

    /// 移除所有數字並整理空白
    fn extract_text_only(&self, stem: &str) -> String {
        let without_digits = self.regex_digit_run.replace_all(stem, "");
        self.regex_multiple_spaces
            .replace_all(&without_digits, " ")
            .trim()
            .to_string()
    }

    /// 擷取結尾的數字（前面必須是非字母、非數字的分隔字元），去除前導零
    ///
    /// 數值為 0 時視為沒有擷取到
    fn extract_trailing_number(&self, stem: &str) -> Option<String> {
        let digits = self.regex_trailing_number.captures(stem)?.get(1)?.as_str();
        let trimmed = digits.trim_start_matches('0');
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// 純數字的主檔名補零到 `zero_pad_width + 1` 位，非數字或 0 時不處理
///
/// 寬度超過 [`MAX_ZERO_PAD_WIDTH`] 時以上限計算
#[must_use]
pub fn pad_with_zeros(candidate: &str, zero_pad_width: usize) -> String {
    let is_numeric = !candidate.is_empty() && candidate.bytes().all(|b| b.is_ascii_digit());
    if zero_pad_width == 0 || !is_numeric {
        return candidate.to_string();
    }

    let width = zero_pad_width.min(MAX_ZERO_PAD_WIDTH).saturating_add(1);
    format!("{candidate:0>width$}")
}

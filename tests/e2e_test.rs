//! E2E Integration Tests
//!
//! 以暫存資料夾驗證完整的掃描 → 排序 → 重新命名流程

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use batch_renamer::component::file_renamer::{
    RenameEvent, RenameExecutor, RenameOptions, RenamePolicy, RenameRequest, SortPolicy,
};
use tempfile::TempDir;

fn create_files(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), format!("content of {name}")).unwrap();
    }
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

fn executor() -> RenameExecutor {
    RenameExecutor::new(Arc::new(AtomicBool::new(false)))
}

/// 測試 1: 依名稱排序、編號命名並加上前後綴
#[test]
fn test_sequential_with_prefix_and_suffix() {
    let temp_dir = TempDir::new().unwrap();
    create_files(
        temp_dir.path(),
        &[
            "photo_003.jpg",
            "photo_001.jpg",
            "photo_002.jpg",
            "image100text.png",
            "document25.txt",
        ],
    );

    let request = RenameRequest {
        directory: temp_dir.path().to_path_buf(),
        sort_policy: SortPolicy::ByName,
        rename_policy: RenamePolicy::Sequential,
        options: RenameOptions {
            prefix: "img_".to_string(),
            suffix: "_final".to_string(),
            zero_pad_width: 0,
            dry_run: false,
        },
    };

    let summary = executor()
        .rename_all(&request, &mut |_event: RenameEvent| {})
        .unwrap();

    assert_eq!(summary.success_count, 5);
    assert_eq!(summary.failure_count, 0);
    assert_eq!(summary.total_count, 5);

    let expected: BTreeSet<String> = [
        "img_1_final.txt",
        "img_2_final.png",
        "img_3_final.jpg",
        "img_4_final.jpg",
        "img_5_final.jpg",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect();
    assert_eq!(file_names(temp_dir.path()), expected);

    // 內容跟著檔案移動
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("img_1_final.txt")).unwrap(),
        "content of document25.txt"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("img_5_final.jpg")).unwrap(),
        "content of photo_003.jpg"
    );
}

/// 測試 2: 自然排序、擷取結尾數字並補零
#[test]
fn test_trailing_number_with_zero_padding() {
    let temp_dir = TempDir::new().unwrap();
    create_files(
        temp_dir.path(),
        &[
            "file_1.mp4",
            "file_2.mp4",
            "file_5.mp4",
            "file_9.mp4",
            "file_10.mp4",
            "file_15.mp4",
        ],
    );

    let request = RenameRequest {
        directory: temp_dir.path().to_path_buf(),
        sort_policy: SortPolicy::ByNaturalNumber,
        rename_policy: RenamePolicy::TrailingNumber,
        options: RenameOptions {
            zero_pad_width: 1,
            ..RenameOptions::default()
        },
    };

    let mut renamed = Vec::new();
    let summary = executor()
        .rename_all(&request, &mut |event: RenameEvent| {
            if let RenameEvent::Renamed(record) = event {
                renamed.push((record.index, record.original, record.renamed));
            }
        })
        .unwrap();

    assert_eq!(summary.success_count, 6);
    let expected: BTreeSet<String> = ["01.mp4", "02.mp4", "05.mp4", "09.mp4", "10.mp4", "15.mp4"]
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(file_names(temp_dir.path()), expected);

    // 自然排序：file_9 在 file_10 之前
    assert_eq!(renamed[3], (4, "file_9.mp4".to_string(), "09.mp4".to_string()));
    assert_eq!(renamed[4], (5, "file_10.mp4".to_string(), "10.mp4".to_string()));
}

/// 測試 3: 預覽不修改檔案，且與實際執行的統計一致
#[test]
fn test_dry_run_matches_real_run() {
    let temp_dir = TempDir::new().unwrap();
    create_files(
        temp_dir.path(),
        &["a_5.txt", "b_5.txt", "notes.md", "scan 12 final 3.pdf"],
    );
    let before = file_names(temp_dir.path());

    let mut request = RenameRequest {
        directory: temp_dir.path().to_path_buf(),
        sort_policy: SortPolicy::ByNaturalNumber,
        rename_policy: RenamePolicy::NumbersOnly,
        options: RenameOptions {
            dry_run: true,
            ..RenameOptions::default()
        },
    };

    let mut previewed = Vec::new();
    let preview = executor()
        .rename_all(&request, &mut |event: RenameEvent| {
            if let RenameEvent::Previewed(record) = event {
                previewed.push(record.renamed);
            }
        })
        .unwrap();

    assert_eq!(file_names(temp_dir.path()), before);

    request.options.dry_run = false;
    let applied = executor()
        .rename_all(&request, &mut |_event: RenameEvent| {})
        .unwrap();

    assert_eq!(preview.success_count, applied.success_count);
    assert_eq!(preview.failure_count, applied.failure_count);

    let after = file_names(temp_dir.path());
    let expected: BTreeSet<String> = previewed.into_iter().collect();
    assert_eq!(after, expected);
    // a_5 → 5.txt, b_5 → 5_1.txt, notes → 3.md, scan 12 final 3 → 123.pdf
    assert!(after.contains("5.txt"));
    assert!(after.contains("5_1.txt"));
    assert!(after.contains("3.md"));
    assert!(after.contains("123.pdf"));
}

/// 測試 4: 子資料夾不受影響
#[test]
fn test_subdirectories_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    create_files(temp_dir.path(), &["x.txt"]);
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    create_files(&nested, &["inner.txt"]);

    let request = RenameRequest {
        directory: temp_dir.path().to_path_buf(),
        sort_policy: SortPolicy::ByName,
        rename_policy: RenamePolicy::Sequential,
        options: RenameOptions::default(),
    };

    let summary = executor()
        .rename_all(&request, &mut |_event: RenameEvent| {})
        .unwrap();

    assert_eq!(summary.total_count, 1);
    assert!(temp_dir.path().join("1.txt").exists());
    assert!(nested.join("inner.txt").exists());
    assert!(temp_dir.path().join("nested").is_dir());
}

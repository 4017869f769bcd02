//! エラーケーステスト
//!
//! 各種エラー条件でのエラー種別とメッセージを検証

use std::error::Error as _;
use tempfile::tempdir;
use wiper_lookup::config::Config;
use wiper_lookup::error::WiperError;
use wiper_lookup::query_log::{QueryLog, QueryLogEntry};
use wiper_lookup::store::DatasetStore;
use wiper_lookup::LookupService;
use wiper_lookup_common::{QueryFilters, Table};

/// 読めないファイルは Load（原因を保持する）
#[test]
fn test_load_error_keeps_source() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("wiper_data.xlsx");
    std::fs::write(&path, b"\x00\x01\x02").unwrap();

    let store = DatasetStore::new(vec![path.display().to_string()], None);
    let service = LookupService::new(store, QueryLog::in_memory());
    let err = service.search("高尔夫", QueryFilters::default()).unwrap_err();

    assert!(matches!(err, WiperError::Load { .. }));
    assert!(err.to_string().contains("wiper_data.xlsx"));
    assert!(err.source().is_some());
    // 失敗した検索はログに残らない
    assert!(service.log().is_empty());
}

/// 车系列が無い表は Schema
#[test]
fn test_schema_error_from_replace() {
    let store = DatasetStore::new(vec![], None);
    let err = store
        .replace(Table::new(vec!["id".into(), "编号".into()], vec![]))
        .unwrap_err();
    assert!(matches!(err, WiperError::Schema(_)));
    assert!(err.to_string().starts_with("数据格式错误"));
}

/// 壊れた設定ファイル
#[test]
fn test_broken_config_is_json_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, WiperError::JsonParse(_)));
}

/// ログの書き込み失敗は LogWrite（メモリには残る）
#[test]
fn test_log_write_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let log = QueryLog::open(dir.path());

    let err = log.append(QueryLogEntry::new("思域", 1)).unwrap_err();
    assert!(matches!(err, WiperError::LogWrite(_)));
    assert_eq!(log.len(), 1);
}

/// 取り込み元が存在しない
#[test]
fn test_import_missing_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let target = dir.path().join("wiper_data.xlsx");
    let store = DatasetStore::new(vec![target.display().to_string()], None);

    let err = store.import(&dir.path().join("nope.xlsx")).unwrap_err();
    assert!(matches!(err, WiperError::FileNotFound(_)));
}

/// 候補がすべてワイルドカードだと取り込み先が決まらない
#[test]
fn test_import_without_writable_target() {
    let dir = tempdir().expect("Failed to create temp dir");
    let upload = dir.path().join("upload.xlsx");
    let table = Table::from_strings(&["车系"], &[&["高尔夫"]]);
    wiper_lookup::export::excel::write_table(&table, &upload, "Sheet1").unwrap();

    let pattern = dir.path().join("data").join("*.xlsx").display().to_string();
    let store = DatasetStore::new(vec![pattern], None);

    let err = store.import(&upload).unwrap_err();
    assert!(matches!(err, WiperError::Config(_)));
}

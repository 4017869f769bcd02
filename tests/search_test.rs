//! 検索サービスの統合テスト
//!
//! ブランド除去・並び順・絞り込み・検索ログの記録を LookupService 経由で検証する。

use std::path::Path;
use tempfile::tempdir;
use wiper_lookup::export::excel;
use wiper_lookup::query_log::QueryLog;
use wiper_lookup::store::DatasetStore;
use wiper_lookup::LookupService;
use wiper_lookup_common::{QueryFilters, Table};

const HEADERS: &[&str] = &[
    "品牌", "车系", "年款", "前雨刷主驾尺寸", "前雨刷副驾尺寸", "后雨刷尺寸", "接头类型", "备注",
];

fn write_dataset(path: &Path) {
    let table = Table::from_strings(
        HEADERS,
        &[
            &["大众", "高尔夫", "2019", "24", "19", "-", "侧插", "-"],
            &["大众", "高尔夫", "2021", "24", "19", "13", "侧插", "GTI 同款"],
            &["丰田", "卡罗拉", "2019-2023", "26", "14", "-", "U型钩", "nan"],
            &["本田", "思域", "2016-2021", "26", "16", "-", "U型钩", ""],
            &["一汽大众", "高尔夫嘉旅", "2020", "24", "19", "-", "侧插", "-"],
            &["Jeep", "Wrangler", "2018", "15", "15", "12", "Pinch Tab", "-"],
        ],
    );
    excel::write_table(&table, path, "雨刷").unwrap();
}

fn service_with_file() -> (tempfile::TempDir, LookupService) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("wiper_data.xlsx");
    write_dataset(&path);
    let store = DatasetStore::new(vec![path.display().to_string()], None);
    (dir, LookupService::new(store, QueryLog::in_memory()))
}

fn titles(service: &LookupService, term: &str) -> Vec<String> {
    service
        .search(term, QueryFilters::default())
        .unwrap()
        .records
        .iter()
        .map(|r| r.title())
        .collect()
}

#[test]
fn test_brand_prefix_is_stripped() {
    let (_dir, service) = service_with_file();

    let plain = service.search("高尔夫", QueryFilters::default()).unwrap();
    let branded = service.search("大众高尔夫", QueryFilters::default()).unwrap();

    assert_eq!(plain.records, branded.records);
    assert_eq!(branded.stripped_brand.as_deref(), Some("大众"));
    assert_eq!(branded.term.as_deref(), Some("高尔夫"));
    // 高尔夫 ×2 + 高尔夫嘉旅
    assert_eq!(plain.count, 3);
}

#[test]
fn test_longest_brand_wins() {
    let (_dir, service) = service_with_file();
    let results = service.search("一汽大众高尔夫嘉旅", QueryFilters::default()).unwrap();
    assert_eq!(results.stripped_brand.as_deref(), Some("一汽大众"));
    assert_eq!(results.count, 1);
}

#[test]
fn test_brand_only_term_uses_original() {
    let (_dir, service) = service_with_file();
    // 「丰田」だけでは除去後が空になるので元の語で照合（车系に丰田は無い）
    let results = service.search("丰田", QueryFilters::default()).unwrap();
    assert_eq!(results.term.as_deref(), Some("丰田"));
    assert_eq!(results.count, 0);
}

#[test]
fn test_strip_brand_disabled() {
    let (_dir, service) = service_with_file();
    let service = service.with_strip_brand(false);
    let results = service.search("大众高尔夫", QueryFilters::default()).unwrap();
    assert_eq!(results.count, 0);
    assert!(results.stripped_brand.is_none());
}

#[test]
fn test_ascii_case_insensitive() {
    let (_dir, service) = service_with_file();
    assert_eq!(titles(&service, "WRANGLER"), vec!["Jeep Wrangler · 2018"]);
    assert_eq!(titles(&service, "jeep wrangler"), vec!["Jeep Wrangler · 2018"]);
}

#[test]
fn test_ordering_brand_then_year_desc() {
    let (_dir, service) = service_with_file();
    let results = service.search("高尔夫", QueryFilters::default()).unwrap();
    let years: Vec<Option<&str>> = results.records.iter().map(|r| r.year.as_deref()).collect();
    // 一汽大众 (U+4E00) < 大众 (U+5927)
    assert_eq!(years, vec![Some("2020"), Some("2021"), Some("2019")]);
}

#[test]
fn test_filters_are_exact() {
    let (_dir, service) = service_with_file();

    let filters = QueryFilters {
        brand: Some("大众".into()),
        connector_type: None,
    };
    let results = service.search("高尔夫", filters).unwrap();
    assert_eq!(results.count, 2);
    assert!(results.records.iter().all(|r| r.brand.as_deref() == Some("大众")));

    let filters = QueryFilters {
        brand: None,
        connector_type: Some("u型钩".into()),
    };
    assert_eq!(service.search("卡罗拉", filters).unwrap().count, 0);

    let filters = QueryFilters {
        brand: Some("  ".into()),
        connector_type: Some("".into()),
    };
    assert_eq!(service.search("卡罗拉", filters).unwrap().count, 1);
}

#[test]
fn test_absent_markers() {
    let (_dir, service) = service_with_file();
    let results = service.search("卡罗拉", QueryFilters::default()).unwrap();
    let record = &results.records[0];
    assert!(record.rear_size.is_absent());
    assert!(record.note.is_absent());
    assert_eq!(record.rear_size.to_string(), "无");

    let json = results.to_json().unwrap();
    assert!(json.contains("\"rear_size\": null"));
}

#[test]
fn test_queries_are_logged_after_matching() {
    let (_dir, service) = service_with_file();

    service.search("高尔夫", QueryFilters::default()).unwrap();
    service.search("  思域 ", QueryFilters::default()).unwrap();
    service.search("   ", QueryFilters::default()).unwrap();
    service.search("帕萨特", QueryFilters::default()).unwrap();

    let recent = service.recent_queries(10);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].term, "帕萨特");
    assert_eq!(recent[0].result_count, 0);
    assert_eq!(recent[1].term, "思域");
    assert_eq!(recent[1].result_count, 1);
    assert_eq!(recent[2].result_count, 3);
}

#[test]
fn test_log_failure_does_not_fail_search() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("wiper_data.xlsx");
    write_dataset(&path);

    // ディレクトリには追記できない
    let log = QueryLog::open(dir.path());
    let store = DatasetStore::new(vec![path.display().to_string()], None);
    let service = LookupService::new(store, log);

    let results = service.search("思域", QueryFilters::default()).unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(service.recent_queries(1)[0].term, "思域");
}

#[test]
fn test_persistent_log_survives_restart() {
    let dir = tempdir().expect("Failed to create temp dir");
    let data = dir.path().join("wiper_data.xlsx");
    let log_path = dir.path().join("queries.jsonl");
    write_dataset(&data);

    {
        let store = DatasetStore::new(vec![data.display().to_string()], None);
        let service = LookupService::new(store, QueryLog::open(&log_path));
        service.search("高尔夫", QueryFilters::default()).unwrap();
        service.search("高尔夫", QueryFilters::default()).unwrap();
        service.search("思域", QueryFilters::default()).unwrap();
    }

    let log = QueryLog::open(&log_path);
    assert_eq!(log.len(), 3);
    assert_eq!(log.top_terms(1), vec![("高尔夫".to_string(), 2)]);
}

#[test]
fn test_sample_fallback_search() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = DatasetStore::new(vec![dir.path().join("none.xlsx").display().to_string()], None);
    let service = LookupService::new(store, QueryLog::in_memory());

    assert!(service.dataset().unwrap().is_fallback_sample());
    let results = service.search("丰田卡罗拉", QueryFilters::default()).unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.records[0].spec_summary(), "前: 26+14″ | 接头: U型钩");
}

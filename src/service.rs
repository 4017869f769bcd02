//! 検索サービス
//!
//! データセットストアと検索ログを束ね、1回の検索要求を処理する。

use crate::config::Config;
use crate::error::Result;
use crate::query_log::{QueryLog, QueryLogEntry};
use crate::store::DatasetStore;
use std::sync::Arc;
use wiper_lookup_common::{search, Dataset, Query, QueryFilters, ResultSet};

pub struct LookupService {
    store: DatasetStore,
    log: QueryLog,
    strip_brand: bool,
}

impl LookupService {
    pub fn new(store: DatasetStore, log: QueryLog) -> Self {
        Self {
            store,
            log,
            strip_brand: true,
        }
    }

    /// 設定から組み立てる（`overrides` が空でなければ候補を置き換える）
    pub fn from_config(config: &Config, overrides: &[String], sheet: Option<String>) -> Self {
        let store = DatasetStore::new(
            config.candidates(overrides),
            sheet.or_else(|| config.sheet.clone()),
        );
        let log = match &config.query_log_path {
            Some(path) => QueryLog::open(path),
            None => QueryLog::in_memory(),
        };
        Self::new(store, log).with_strip_brand(config.strip_brand)
    }

    pub fn with_strip_brand(mut self, strip: bool) -> Self {
        self.strip_brand = strip;
        self
    }

    /// 検索する
    ///
    /// データセットが読めない・车系列が無い場合だけエラー。該当なしは空の結果。
    pub fn search(&self, raw_term: &str, filters: QueryFilters) -> Result<ResultSet> {
        let dataset = self.store.get()?;
        let query = Query::new(raw_term)
            .with_filters(filters)
            .with_strip_brand(self.strip_brand);

        let results = search(&dataset, &query);

        tracing::debug!(
            "query {:?} -> {:?} ({} hits)",
            raw_term,
            results.term,
            results.count
        );

        // 照合が終わってからログを取る
        if results.term.is_some() {
            self.log.record(raw_term.trim(), results.count);
        }
        Ok(results)
    }

    pub fn dataset(&self) -> Result<Arc<Dataset>> {
        self.store.get()
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn log(&self) -> &QueryLog {
        &self.log
    }

    pub fn recent_queries(&self, n: usize) -> Vec<QueryLogEntry> {
        self.log.recent(n)
    }
}

//! 検索エンジン
//!
//! 車系列への部分一致検索。スコアリングやあいまい一致はせず、
//! 結果は品牌の昇順 → 年款の降順で並べる。

use crate::brand::strip_brand;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::field::CanonicalField;
use crate::normalize::{fold_case, normalize_term};
use crate::record::{FieldValue, WiperRecord};
use serde::Serialize;
use std::cmp::Ordering;

/// 絞り込み条件（完全一致・大小文字区別）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    pub brand: Option<String>,
    pub connector_type: Option<String>,
}

impl QueryFilters {
    /// 空文字は「指定なし」とみなす
    fn active(&self) -> Vec<(CanonicalField, &str)> {
        [
            (CanonicalField::Brand, self.brand.as_deref()),
            (CanonicalField::ConnectorType, self.connector_type.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (field, v))
        })
        .collect()
    }
}

/// 検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub raw_term: String,
    pub filters: QueryFilters,
    /// 既知ブランド名を検索語から除去する
    pub strip_brand: bool,
}

impl Query {
    pub fn new(raw_term: impl Into<String>) -> Self {
        Self {
            raw_term: raw_term.into(),
            filters: QueryFilters::default(),
            strip_brand: true,
        }
    }

    pub fn with_filters(mut self, filters: QueryFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_strip_brand(mut self, strip: bool) -> Self {
        self.strip_brand = strip;
        self
    }
}

/// 検索結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// 照合に使った語（空の検索語なら None）
    pub term: Option<String>,
    /// 検索語から除去したブランド
    pub stripped_brand: Option<String>,
    pub count: usize,
    pub records: Vec<WiperRecord>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// データセットを検索する
///
/// 空白のみの検索語は空の結果を返す（エラーではない）。
/// 件数の上限は設けない（数千行規模を想定）。
pub fn search(dataset: &Dataset, query: &Query) -> ResultSet {
    let Some(normalized) = normalize_term(&query.raw_term) else {
        return ResultSet::default();
    };

    let (term, stripped_brand) = if query.strip_brand {
        let stripped = strip_brand(&normalized);
        (stripped.term, stripped.brand.map(str::to_string))
    } else {
        (normalized, None)
    };

    let filters = query.filters.active();

    let mut records: Vec<WiperRecord> = (0..dataset.len())
        .filter(|&row| {
            dataset
                .model_cell(row)
                .and_then(|cell| cell.display_value())
                .is_some_and(|model| fold_case(&model).contains(term.as_str()))
        })
        .map(|row| WiperRecord::from_row(dataset.table(), dataset.schema(), row))
        .filter(|record| {
            filters
                .iter()
                .all(|(field, value)| record.get(*field).as_deref() == Some(*value))
        })
        .collect();

    let by_brand = dataset.schema().has(CanonicalField::Brand);
    let by_year = dataset.schema().has(CanonicalField::Year);
    records.sort_by(|a, b| {
        let mut ord = Ordering::Equal;
        if by_brand {
            ord = compare_absent_last(&a.brand, &b.brand, false);
        }
        if by_year {
            ord = ord.then_with(|| compare_absent_last(&a.year, &b.year, true));
        }
        ord
    });

    ResultSet {
        term: Some(term),
        stripped_brand,
        count: records.len(),
        records,
    }
}

/// 文字列比較（コードポイント順）。値なしは常に後ろ
fn compare_absent_last(a: &FieldValue, b: &FieldValue, descending: bool) -> Ordering {
    match (a.as_deref(), b.as_deref()) {
        (Some(x), Some(y)) if descending => y.cmp(x),
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

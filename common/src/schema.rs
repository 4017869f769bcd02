//! スキーマ解決
//!
//! ロード時に1回だけヘッダーを調べ、正準フィールド → 実際の列 の対応表を作る。
//! 検索ごとに列名を探し直すことはしない。

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::field::CanonicalField;
use crate::table::Table;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

lazy_static::lazy_static! {
    /// 連番・ID系の列名
    static ref ID_HEADER_RE: Regex =
        Regex::new(r"(?i)^(id|no\.?|#|index|序号|编号|行号|.*_id)$").unwrap();
}

/// 解決済みの列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
    pub index: usize,
    pub header: String,
}

/// 正準フィールド → 列 の対応表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaMapping {
    model: ResolvedColumn,
    /// 車系列を同義語ではなくテキスト列から推定したか
    model_inferred: bool,
    columns: BTreeMap<CanonicalField, ResolvedColumn>,
}

impl SchemaMapping {
    /// ヘッダーから対応表を作る
    ///
    /// 車系の同義語が無い場合は、他のフィールドに割り当てられておらず
    /// ID系でもない最初のテキスト列を車系列とみなす。それも無ければ `Error::Schema`。
    pub fn resolve(table: &Table) -> Result<Self> {
        let headers = table.headers();
        let mut columns = BTreeMap::new();

        for field in CanonicalField::ALL {
            if let Some(column) = find_synonym_column(headers, field) {
                columns.insert(field, column);
            }
        }

        if let Some(model) = columns.get(&CanonicalField::ModelName).cloned() {
            return Ok(Self {
                model,
                model_inferred: false,
                columns,
            });
        }

        let claimed: Vec<usize> = columns.values().map(|c| c.index).collect();
        let fallback = headers.iter().enumerate().find(|(index, header)| {
            !claimed.contains(index)
                && !is_identifier_header(header)
                && is_text_column(table.column(*index))
        });

        match fallback {
            Some((index, header)) => {
                let model = ResolvedColumn {
                    index,
                    header: header.clone(),
                };
                columns.insert(CanonicalField::ModelName, model.clone());
                Ok(Self {
                    model,
                    model_inferred: true,
                    columns,
                })
            }
            None => Err(Error::Schema(format!(
                "no model name column among headers [{}]",
                headers.join(", ")
            ))),
        }
    }

    /// 車系列（常に存在する）
    pub fn model_column(&self) -> &ResolvedColumn {
        &self.model
    }

    pub fn is_model_inferred(&self) -> bool {
        self.model_inferred
    }

    pub fn column(&self, field: CanonicalField) -> Option<&ResolvedColumn> {
        self.columns.get(&field)
    }

    pub fn has(&self, field: CanonicalField) -> bool {
        self.columns.contains_key(&field)
    }

    /// 解決できたフィールドの一覧（正準順）
    pub fn fields(&self) -> impl Iterator<Item = (CanonicalField, &ResolvedColumn)> + '_ {
        self.columns.iter().map(|(f, c)| (*f, c))
    }

    /// 解決できなかったフィールド
    pub fn missing(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .iter()
            .copied()
            .filter(|f| !self.columns.contains_key(f))
            .collect()
    }
}

fn find_synonym_column(headers: &[String], field: CanonicalField) -> Option<ResolvedColumn> {
    field.synonyms().iter().find_map(|synonym| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(synonym))
            .map(|index| ResolvedColumn {
                index,
                header: headers[index].clone(),
            })
    })
}

fn is_identifier_header(header: &str) -> bool {
    ID_HEADER_RE.is_match(header.trim())
}

/// 値のあるセルが1つ以上あり、すべて文字列
fn is_text_column<'a>(cells: impl Iterator<Item = &'a Cell>) -> bool {
    let mut seen = false;
    for cell in cells.filter(|c| !c.is_absent()) {
        if !cell.is_text() {
            return false;
        }
        seen = true;
    }
    seen
}

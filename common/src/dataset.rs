//! データセット
//!
//! スキーマ解決済みの表。ロード（またはサンプル・手動差し替え）時に作られ、
//! 以後は読み取り専用。更新は常にデータセットごと置き換える。

use crate::cell::Cell;
use crate::error::Result;
use crate::field::CanonicalField;
use crate::record::WiperRecord;
use crate::schema::SchemaMapping;
use crate::table::Table;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// データの出所
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetSource {
    /// スプレッドシートから読み込んだ
    File { path: PathBuf, sheet: String },
    /// 組み込みサンプル（データファイルが見つからない）
    Sample,
    /// 管理操作で差し替えた表
    Manual,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    table: Table,
    schema: SchemaMapping,
    source: DatasetSource,
}

impl Dataset {
    /// 表からデータセットを作る（スキーマ解決に失敗したら `Error::Schema`）
    pub fn new(table: Table, source: DatasetSource) -> Result<Self> {
        let schema = SchemaMapping::resolve(&table)?;
        Ok(Self {
            table,
            schema,
            source,
        })
    }

    /// 組み込みサンプル
    pub fn sample() -> Result<Self> {
        Self::new(sample_table(), DatasetSource::Sample)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn schema(&self) -> &SchemaMapping {
        &self.schema
    }

    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    pub fn is_fallback_sample(&self) -> bool {
        self.source == DatasetSource::Sample
    }

    pub fn record(&self, row: usize) -> Option<WiperRecord> {
        (row < self.len()).then(|| WiperRecord::from_row(&self.table, &self.schema, row))
    }

    pub fn records(&self) -> impl Iterator<Item = WiperRecord> + '_ {
        (0..self.len()).map(move |row| WiperRecord::from_row(&self.table, &self.schema, row))
    }

    /// 車系列のセル（照合用）
    pub(crate) fn model_cell(&self, row: usize) -> Option<&Cell> {
        self.table.cell(row, self.schema.model_column().index)
    }

    /// フィールドの値一覧（重複除去・昇順・値なしは除く）。選択肢の表示用
    pub fn distinct_values(&self, field: CanonicalField) -> Vec<String> {
        let Some(column) = self.schema.column(field) else {
            return Vec::new();
        };
        self.table
            .column(column.index)
            .filter_map(|cell| cell.display_value())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// 組み込みサンプル表
fn sample_table() -> Table {
    Table::from_strings(
        &[
            "品牌", "车系", "年款", "前雨刷主驾尺寸", "前雨刷副驾尺寸", "后雨刷尺寸", "接头类型", "备注",
        ],
        &[
            &["丰田", "卡罗拉", "2019-2023", "26", "14", "-", "U型钩", "示例数据"],
            &["丰田", "凯美瑞", "2018-2023", "26", "18", "-", "U型钩", "示例数据"],
            &["丰田", "RAV4荣放", "2020-2023", "26", "16", "12", "U型钩", "示例数据"],
            &["本田", "思域", "2016-2021", "26", "16", "-", "U型钩", "示例数据"],
            &["本田", "雅阁", "2018-2022", "26", "17", "-", "窄U型钩", "示例数据"],
            &["大众", "高尔夫", "2020-2023", "24", "19", "13", "侧插", "示例数据"],
            &["大众", "速腾", "2019-2023", "24", "19", "-", "侧插", "示例数据"],
            &["日产", "轩逸", "2020-2023", "26", "14", "-", "U型钩", "示例数据"],
        ],
    )
}

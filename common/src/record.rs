//! 表示用レコード
//!
//! 1行分の値を正準フィールドで取り出したもの。スキーマに無い列や空値は
//! `FieldValue::absent()` になり、エラーにはならない。

use crate::field::CanonicalField;
use crate::schema::SchemaMapping;
use crate::table::Table;
use serde::Serialize;
use std::fmt;

/// フィールド値（値なしは None）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct FieldValue(Option<String>);

impl FieldValue {
    pub fn present(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "无"),
        }
    }
}

/// 雨刷レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiperRecord {
    /// 元の表での行番号（0始まり）
    pub row: usize,
    pub brand: FieldValue,
    pub model_name: FieldValue,
    pub year: FieldValue,
    pub trim: FieldValue,
    pub front_driver_size: FieldValue,
    pub front_passenger_size: FieldValue,
    pub rear_size: FieldValue,
    pub connector_type: FieldValue,
    pub note: FieldValue,
}

impl WiperRecord {
    /// 表の1行から作成
    pub fn from_row(table: &Table, schema: &SchemaMapping, row: usize) -> Self {
        let value = |field: CanonicalField| -> FieldValue {
            schema
                .column(field)
                .and_then(|col| table.cell(row, col.index))
                .and_then(|cell| cell.display_value())
                .map(FieldValue::present)
                .unwrap_or_default()
        };

        Self {
            row,
            brand: value(CanonicalField::Brand),
            model_name: value(CanonicalField::ModelName),
            year: value(CanonicalField::Year),
            trim: value(CanonicalField::Trim),
            front_driver_size: value(CanonicalField::FrontDriverSize),
            front_passenger_size: value(CanonicalField::FrontPassengerSize),
            rear_size: value(CanonicalField::RearSize),
            connector_type: value(CanonicalField::ConnectorType),
            note: value(CanonicalField::Note),
        }
    }

    pub fn get(&self, field: CanonicalField) -> &FieldValue {
        match field {
            CanonicalField::Brand => &self.brand,
            CanonicalField::ModelName => &self.model_name,
            CanonicalField::Year => &self.year,
            CanonicalField::Trim => &self.trim,
            CanonicalField::FrontDriverSize => &self.front_driver_size,
            CanonicalField::FrontPassengerSize => &self.front_passenger_size,
            CanonicalField::RearSize => &self.rear_size,
            CanonicalField::ConnectorType => &self.connector_type,
            CanonicalField::Note => &self.note,
        }
    }

    /// 見出し: `品牌 车系 · 年款`（値なしの部分は省く）
    pub fn title(&self) -> String {
        let name: Vec<&str> = [&self.brand, &self.model_name]
            .iter()
            .filter_map(|v| v.as_deref())
            .collect();
        let name = name.join(" ");
        match self.year.as_deref() {
            Some(year) if name.is_empty() => year.to_string(),
            Some(year) => format!("{} · {}", name, year),
            None => name,
        }
    }

    /// 規格の要約: `前: 24+18″ | 后: 14″ | 接头: U型钩`
    ///
    /// 副驾だけある場合は前の寸法を出さない。値なしの項目は出さない。
    pub fn spec_summary(&self) -> String {
        let mut specs = Vec::new();

        match (self.front_driver_size.as_deref(), self.front_passenger_size.as_deref()) {
            (Some(driver), Some(passenger)) => specs.push(format!("前: {}+{}″", driver, passenger)),
            (Some(driver), None) => specs.push(format!("前: {}″", driver)),
            _ => {}
        }

        if let Some(rear) = self.rear_size.as_deref() {
            specs.push(format!("后: {}″", rear));
        }

        if let Some(connector) = self.connector_type.as_deref() {
            specs.push(format!("接头: {}", connector));
        }

        specs.join(" | ")
    }
}

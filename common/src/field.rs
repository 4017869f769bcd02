//! 正準フィールドと同義語テーブル
//!
//! シートのバージョンごとにヘッダー名（中国語/英語、旧/新スキーマ）が違うため、
//! 意味上のフィールドごとに既知のヘッダー名を優先順で持つ。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Brand,
    ModelName,
    Year,
    Trim,
    FrontDriverSize,
    FrontPassengerSize,
    RearSize,
    ConnectorType,
    Note,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::Brand,
        CanonicalField::ModelName,
        CanonicalField::Year,
        CanonicalField::Trim,
        CanonicalField::FrontDriverSize,
        CanonicalField::FrontPassengerSize,
        CanonicalField::RearSize,
        CanonicalField::ConnectorType,
        CanonicalField::Note,
    ];

    /// 既知のヘッダー名（先に書いたものが優先）
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Brand => &["品牌", "brand"],
            CanonicalField::ModelName => &["车系", "车型", "model_series", "model"],
            CanonicalField::Year => &["年款", "年份", "year"],
            CanonicalField::Trim => &["车型配置", "trim"],
            CanonicalField::FrontDriverSize => &["前雨刷主驾尺寸", "主驾", "front_driver_size"],
            CanonicalField::FrontPassengerSize => {
                &["前雨刷副驾尺寸", "副驾", "front_passenger_size"]
            }
            CanonicalField::RearSize => &["后雨刷尺寸", "后雨刷", "rear_size"],
            CanonicalField::ConnectorType => &["接头类型", "接头", "connector_type"],
            CanonicalField::Note => &["备注"],
        }
    }

    /// snake_case のキー名
    pub fn key(self) -> &'static str {
        match self {
            CanonicalField::Brand => "brand",
            CanonicalField::ModelName => "model_name",
            CanonicalField::Year => "year",
            CanonicalField::Trim => "trim",
            CanonicalField::FrontDriverSize => "front_driver_size",
            CanonicalField::FrontPassengerSize => "front_passenger_size",
            CanonicalField::RearSize => "rear_size",
            CanonicalField::ConnectorType => "connector_type",
            CanonicalField::Note => "note",
        }
    }

    /// 画面表示用ラベル
    pub fn label(self) -> &'static str {
        match self {
            CanonicalField::Brand => "品牌",
            CanonicalField::ModelName => "车系",
            CanonicalField::Year => "年款",
            CanonicalField::Trim => "车型配置",
            CanonicalField::FrontDriverSize => "前雨刷主驾尺寸",
            CanonicalField::FrontPassengerSize => "前雨刷副驾尺寸",
            CanonicalField::RearSize => "后雨刷尺寸",
            CanonicalField::ConnectorType => "接头类型",
            CanonicalField::Note => "备注",
        }
    }

    /// ヘッダー名がこのフィールドの同義語か（前後空白・英字の大小は無視）
    pub fn matches_header(self, header: &str) -> bool {
        let header = header.trim();
        self.synonyms().iter().any(|s| s.eq_ignore_ascii_case(header))
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    /// キー名・同義語のどちらでも受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        CanonicalField::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(s) || f.matches_header(s))
            .ok_or_else(|| {
                let keys: Vec<&str> = CanonicalField::ALL.iter().map(|f| f.key()).collect();
                format!("Unknown field: {}. Use one of: {}", s, keys.join(", "))
            })
    }
}

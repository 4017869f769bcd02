//! Wiper Lookup Common Library
//!
//! 雨刷規格データの型と検索エンジン（ファイルIOを含まない部分）

pub mod brand;
pub mod cell;
pub mod dataset;
pub mod error;
pub mod field;
pub mod normalize;
pub mod query;
pub mod record;
pub mod schema;
pub mod table;

pub use cell::Cell;
pub use dataset::{Dataset, DatasetSource};
pub use error::{Error, Result};
pub use field::CanonicalField;
pub use normalize::{fold_case, normalize_term};
pub use query::{search, Query, QueryFilters, ResultSet};
pub use record::{FieldValue, WiperRecord};
pub use schema::{ResolvedColumn, SchemaMapping};
pub use table::Table;

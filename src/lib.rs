//! 雨刷規格検索
//!
//! スプレッドシートを読み込み、车系名の部分一致で雨刷尺寸・接头类型を引く。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod loader;
pub mod query_log;
pub mod report;
pub mod service;
pub mod store;

pub use error::{Result, WiperError};
pub use service::LookupService;
pub use store::DatasetStore;

//! 対話式検索
//!
//! 1つのデータセットキャッシュを使い回して繰り返し検索する。

use crate::error::{Result, WiperError};
use crate::report;
use crate::service::LookupService;
use dialoguer::Input;
use wiper_lookup_common::QueryFilters;

/// 対話アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 検索
    Search(String),
    /// 品牌で絞り込み（None で解除）
    Brand(Option<String>),
    /// 接头类型で絞り込み（None で解除）
    Connector(Option<String>),
    /// 絞り込みをすべて解除
    Clear,
    /// データを読み直す
    Reload,
    /// 最近の検索を表示
    History,
    /// 終了
    Quit,
}

/// 入力行をアクションに変換
pub fn parse_action(input: &str) -> Action {
    let trimmed = input.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Action::Search(trimmed.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim().to_string()).filter(|a| !a.is_empty())),
        None => (command, None),
    };

    match name {
        "q" | "quit" => Action::Quit,
        "reload" => Action::Reload,
        "brand" => Action::Brand(arg),
        "connector" => Action::Connector(arg),
        "clear" => Action::Clear,
        "log" | "history" => Action::History,
        _ => Action::Search(trimmed.to_string()),
    }
}

pub fn run(service: &LookupService, limit: usize) -> Result<()> {
    let dataset = service.dataset()?;
    if dataset.is_fallback_sample() {
        println!("{}", report::FALLBACK_WARNING);
    }
    println!("已加载 {} 条记录", dataset.len());
    println!("---");
    println!("命令: :brand 品牌  :connector 接头  :clear  :reload  :log  :q");
    println!("---\n");

    let mut filters = QueryFilters::default();

    loop {
        let input: String = Input::new()
            .with_prompt("车系")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| WiperError::Prompt(e.to_string()))?;

        match parse_action(&input) {
            Action::Search(term) => {
                let results = service.search(&term, filters.clone())?;
                println!("{}", report::format_results(&results, &term, limit));
            }
            Action::Brand(brand) => {
                println!("  → 品牌: {}", brand.as_deref().unwrap_or("全部"));
                filters.brand = brand;
            }
            Action::Connector(connector) => {
                println!("  → 接头: {}", connector.as_deref().unwrap_or("全部"));
                filters.connector_type = connector;
            }
            Action::Clear => {
                filters = QueryFilters::default();
                println!("  → 已清除筛选条件");
            }
            Action::Reload => {
                let dataset = service.store().reload()?;
                println!("  → 已重新加载 {} 条记录", dataset.len());
            }
            Action::History => {
                for entry in service.recent_queries(10) {
                    println!("  {}  {} ({}条)", entry.timestamp, entry.term, entry.result_count);
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        assert_eq!(parse_action(" 高尔夫 "), Action::Search("高尔夫".into()));
        assert_eq!(parse_action(""), Action::Search("".into()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_action(":q"), Action::Quit);
        assert_eq!(parse_action(":reload"), Action::Reload);
        assert_eq!(parse_action(":brand 大众"), Action::Brand(Some("大众".into())));
        assert_eq!(parse_action(":brand"), Action::Brand(None));
        assert_eq!(parse_action(":connector  U型钩 "), Action::Connector(Some("U型钩".into())));
        assert_eq!(parse_action(":clear"), Action::Clear);
        assert_eq!(parse_action(":log"), Action::History);
    }

    #[test]
    fn test_unknown_command_is_search() {
        assert_eq!(parse_action(":xyz"), Action::Search(":xyz".into()));
    }
}

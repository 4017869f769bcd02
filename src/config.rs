use crate::error::{Result, WiperError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// データファイルの場所を上書きする環境変数
pub const DATA_ENV: &str = "WIPER_LOOKUP_DATA";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// データファイルの候補（パスまたはglob、先頭から順に試す）
    pub sources: Vec<String>,
    /// シート名（省略時は先頭シート）
    pub sheet: Option<String>,
    /// 検索ログ（JSON Lines）の保存先
    pub query_log_path: Option<PathBuf>,
    /// 画面に出す最大件数
    pub display_limit: usize,
    /// 検索語から既知ブランド名を除去する
    pub strip_brand: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec![
                "wiper_data.xlsx".into(),
                "data/wiper_data.xlsx".into(),
                "data/*.xlsx".into(),
            ],
            sheet: None,
            query_log_path: None,
            display_limit: 20,
            strip_brand: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WiperError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("wiper-lookup").join("config.json"))
    }

    /// 実際に試す候補の一覧
    ///
    /// 優先順: 引数の上書き > 環境変数 > 設定ファイル
    pub fn candidates(&self, overrides: &[String]) -> Vec<String> {
        if !overrides.is_empty() {
            return overrides.to_vec();
        }
        self.candidates_with_env(std::env::var(DATA_ENV).ok())
    }

    fn candidates_with_env(&self, env: Option<String>) -> Vec<String> {
        let mut candidates = Vec::with_capacity(self.sources.len() + 1);
        if let Some(path) = env.filter(|p| !p.trim().is_empty()) {
            candidates.push(path);
        }
        candidates.extend(self.sources.iter().cloned());
        candidates
    }

    /// 候補を末尾に追加（重複は無視）
    pub fn add_source(&mut self, source: String) -> bool {
        if self.sources.contains(&source) {
            return false;
        }
        self.sources.push(source);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sources[0], "wiper_data.xlsx");
        assert_eq!(config.display_limit, 20);
        assert!(config.strip_brand);
        assert!(config.sheet.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"sheet": "雨刷"}"#).unwrap();
        assert_eq!(config.sheet.as_deref(), Some("雨刷"));
        assert_eq!(config.sources, Config::default().sources);
    }

    #[test]
    fn test_candidates_env_first() {
        let config = Config::default();
        let candidates = config.candidates_with_env(Some("/tmp/data.xlsx".into()));
        assert_eq!(candidates[0], "/tmp/data.xlsx");
        assert_eq!(candidates.len(), config.sources.len() + 1);

        let candidates = config.candidates_with_env(Some("  ".into()));
        assert_eq!(candidates, config.sources);
    }

    #[test]
    fn test_candidates_override() {
        let config = Config::default();
        let overrides = vec!["x.xlsx".to_string()];
        assert_eq!(config.candidates(&overrides), overrides);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        assert!(config.add_source("extra/*.xls".into()));
        assert!(!config.add_source("extra/*.xls".into()));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(loaded, Config::default());
    }
}

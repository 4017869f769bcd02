//! 検索ログ
//!
//! 検索語・件数・時刻を追記のみで記録する。保存先を指定すると JSON Lines で
//! 追記し、起動時に読み戻す。書き込み失敗は警告ログだけ出して検索には影響させない。
//!
//! メモリには直近 `MAX_RETAINED` 件だけ残す。全件の記録はファイル側。

use crate::error::{Result, WiperError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// メモリに保持する最大件数
pub const MAX_RETAINED: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub term: String,
    pub result_count: usize,
    /// RFC 3339（ローカル時刻）
    pub timestamp: String,
}

impl QueryLogEntry {
    pub fn new(term: impl Into<String>, result_count: usize) -> Self {
        Self {
            term: term.into(),
            result_count,
            timestamp: chrono::Local::now().to_rfc3339(),
        }
    }
}

pub struct QueryLog {
    entries: Mutex<VecDeque<QueryLogEntry>>,
    path: Option<PathBuf>,
    capacity: usize,
}

impl QueryLog {
    /// メモリのみ
    pub fn in_memory() -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            path: None,
            capacity: MAX_RETAINED,
        }
    }

    /// ファイルに追記するログを開く（既存の行を読み込む。壊れた行は読み飛ばす）
    pub fn open(path: &Path) -> Self {
        let mut entries = match read_entries(path) {
            Ok(entries) => VecDeque::from(entries),
            Err(e) => {
                tracing::warn!("failed to read query log {}: {}", path.display(), e);
                VecDeque::new()
            }
        };
        let excess = entries.len().saturating_sub(MAX_RETAINED);
        entries.drain(..excess);
        Self {
            entries: Mutex::new(entries),
            path: Some(path.to_path_buf()),
            capacity: MAX_RETAINED,
        }
    }

    /// メモリに残す件数を変える（1件未満にはしない）
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        let entries = self.entries.get_mut();
        let excess = entries.len().saturating_sub(self.capacity);
        entries.drain(..excess);
        self
    }

    /// 記録する。失敗しても呼び出し側には返さない
    pub fn record(&self, term: &str, result_count: usize) {
        if let Err(e) = self.append(QueryLogEntry::new(term, result_count)) {
            tracing::warn!("{}", e);
        }
    }

    /// 記録する（メモリには必ず残し、ファイル書き込みの失敗だけ返す）
    pub fn append(&self, entry: QueryLogEntry) -> Result<()> {
        let mut entries = self.entries.lock();
        let written = match &self.path {
            Some(path) => write_line(path, &entry),
            None => Ok(()),
        };
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
        written
    }

    /// 新しい順に最大 n 件（メモリに残っている範囲）
    pub fn recent(&self, n: usize) -> Vec<QueryLogEntry> {
        self.entries.lock().iter().rev().take(n).cloned().collect()
    }

    /// 検索回数の多い語（回数の降順、同数は語の昇順）
    pub fn top_terms(&self, n: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in self.entries.lock().iter() {
            *counts.entry(entry.term.clone()).or_default() += 1;
        }
        let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts.truncate(n);
        counts
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn write_line(path: &Path, entry: &QueryLogEntry) -> Result<()> {
    let line = serde_json::to_string(entry)
        .map_err(|e| WiperError::LogWrite(e.to_string()))?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| WiperError::LogWrite(format!("{}: {}", path.display(), e)))?;
    writeln!(file, "{}", line)
        .map_err(|e| WiperError::LogWrite(format!("{}: {}", path.display(), e)))
}

fn read_entries(path: &Path) -> std::io::Result<Vec<QueryLogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let reader = BufReader::new(std::fs::File::open(path)?);
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::debug!("skipping broken query log line: {}", e),
        }
    }
    Ok(entries)
}

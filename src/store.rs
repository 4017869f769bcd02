//! データセットストア
//!
//! ロード済みデータセットをプロセス内でキャッシュする。キーは
//! (ファイルパス, 更新日時, SHA-256)。更新日時が変わったらハッシュを取り直し、
//! 内容が変わっていれば全体を読み直す。
//!
//! 差し替えは常に `Arc<Dataset>` の入れ替えで行い、行単位の更新はしない。
//! 読み手は古いデータセットか新しいデータセットのどちらかを丸ごと見る。

use crate::error::{Result, WiperError};
use crate::loader;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use wiper_lookup_common::{Dataset, DatasetSource, Table};

/// キャッシュキー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    /// ファイル内容の SHA-256（16進）
    pub digest: String,
}

impl CacheKey {
    pub fn for_file(path: &Path) -> std::io::Result<Self> {
        let modified = std::fs::metadata(path)?.modified().ok();
        let digest = compute_file_hash(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            modified,
            digest,
        })
    }
}

/// ファイル内容の SHA-256
pub fn compute_file_hash(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

#[derive(Debug)]
struct Entry {
    dataset: Arc<Dataset>,
    /// ファイル由来でなければ None（サンプル・手動差し替え）
    key: Option<CacheKey>,
}

pub struct DatasetStore {
    candidates: Vec<String>,
    sheet: Option<String>,
    current: RwLock<Option<Arc<Entry>>>,
}

impl DatasetStore {
    pub fn new(candidates: Vec<String>, sheet: Option<String>) -> Self {
        Self {
            candidates,
            sheet,
            current: RwLock::new(None),
        }
    }

    /// 現在のデータセットを取得（未ロードならロード、ファイルが変わっていれば再ロード）
    pub fn get(&self) -> Result<Arc<Dataset>> {
        let entry = self.current.read().clone();
        match entry {
            None => self.reload(),
            Some(entry) => match &entry.key {
                None => Ok(entry.dataset.clone()),
                Some(key) => self.refresh_if_changed(&entry, key),
            },
        }
    }

    /// キャッシュを捨てて読み直す
    ///
    /// 失敗した場合も以前のデータセットは残さない。
    pub fn reload(&self) -> Result<Arc<Dataset>> {
        match self.load_entry() {
            Ok(entry) => {
                let dataset = entry.dataset.clone();
                *self.current.write() = Some(Arc::new(entry));
                Ok(dataset)
            }
            Err(e) => {
                *self.current.write() = None;
                Err(e)
            }
        }
    }

    /// キャッシュを破棄する（次の `get` で読み直す）
    pub fn invalidate(&self) {
        *self.current.write() = None;
        tracing::debug!("dataset cache invalidated");
    }

    /// 管理操作: 表を丸ごと差し替える
    ///
    /// ロードと同じくスキーマを解決し、失敗したら現在のデータセットはそのまま。
    pub fn replace(&self, table: Table) -> Result<Arc<Dataset>> {
        let dataset = Arc::new(Dataset::new(table, DatasetSource::Manual)?);
        *self.current.write() = Some(Arc::new(Entry {
            dataset: dataset.clone(),
            key: None,
        }));
        tracing::info!("dataset replaced ({} rows)", dataset.len());
        Ok(dataset)
    }

    /// アップロードされたファイルを取り込む
    ///
    /// 先に読み込んで検証し、問題なければデータファイルの場所にコピーして読み直す。
    /// コピー先は現在の読み込み元、無ければ最初のワイルドカードなし候補。
    pub fn import(&self, file: &Path) -> Result<(PathBuf, Arc<Dataset>)> {
        if !file.is_file() {
            return Err(WiperError::FileNotFound(file.display().to_string()));
        }
        loader::load_file(file, self.sheet.as_deref())?;

        let target = self.import_target().ok_or_else(|| {
            WiperError::Config("没有可写入的数据文件位置（所有候补都是通配符）".into())
        })?;
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        // 同じファイルへのコピーは中身を壊す
        let same_file = match (file.canonicalize(), target.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        if !same_file {
            std::fs::copy(file, &target)?;
        }
        tracing::info!("imported {} -> {}", file.display(), target.display());

        let dataset = self.reload()?;
        Ok((target, dataset))
    }

    /// 現在のキャッシュキー
    pub fn cache_key(&self) -> Option<CacheKey> {
        self.current.read().as_ref().and_then(|e| e.key.clone())
    }

    fn import_target(&self) -> Option<PathBuf> {
        loader::resolve_source(&self.candidates).or_else(|| {
            self.candidates
                .iter()
                .map(|c| c.trim())
                .find(|c| !c.is_empty() && !loader::pattern::is_pattern(c))
                .map(PathBuf::from)
        })
    }

    fn load_entry(&self) -> Result<Entry> {
        match loader::resolve_source(&self.candidates) {
            Some(path) => {
                // 読み込み前にキーを取る（読み込み中に更新されても次回の get で検出できる）
                let key = CacheKey::for_file(&path)
                    .map_err(|e| WiperError::load(path.display().to_string(), e))?;
                let dataset = loader::load_file(&path, self.sheet.as_deref())?;
                Ok(Entry {
                    dataset: Arc::new(dataset),
                    key: Some(key),
                })
            }
            None => Ok(Entry {
                dataset: Arc::new(loader::fallback_sample(&self.candidates)?),
                key: None,
            }),
        }
    }

    fn refresh_if_changed(&self, entry: &Arc<Entry>, key: &CacheKey) -> Result<Arc<Dataset>> {
        let modified = match std::fs::metadata(&key.path) {
            Ok(meta) => meta.modified().ok(),
            Err(e) => {
                tracing::warn!(
                    "data file {} unavailable ({}), keeping cached dataset",
                    key.path.display(),
                    e
                );
                return Ok(entry.dataset.clone());
            }
        };

        if modified == key.modified {
            return Ok(entry.dataset.clone());
        }

        let digest = compute_file_hash(&key.path)
            .map_err(|e| WiperError::load(key.path.display().to_string(), e))?;
        if digest == key.digest {
            tracing::debug!("{} touched but unchanged", key.path.display());
            let refreshed = Arc::new(Entry {
                dataset: entry.dataset.clone(),
                key: Some(CacheKey {
                    modified,
                    ..key.clone()
                }),
            });
            let mut current = self.current.write();
            if current.as_ref().is_some_and(|c| Arc::ptr_eq(c, entry)) {
                *current = Some(refreshed);
            }
            return Ok(entry.dataset.clone());
        }

        tracing::info!("{} changed, reloading", key.path.display());
        let loaded = self.load_entry();

        // 読み込み中に replace / reload された場合はそちらを優先する
        let mut current = self.current.write();
        if !current.as_ref().is_some_and(|c| Arc::ptr_eq(c, entry)) {
            if let Some(newer) = current.as_ref() {
                tracing::debug!("dataset swapped during reload, keeping the newer one");
                return Ok(newer.dataset.clone());
            }
        }
        match loaded {
            Ok(fresh) => {
                let dataset = fresh.dataset.clone();
                *current = Some(Arc::new(fresh));
                Ok(dataset)
            }
            Err(e) => {
                *current = None;
                Err(e)
            }
        }
    }
}

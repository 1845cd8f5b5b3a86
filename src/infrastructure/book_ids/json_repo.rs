//! JSON ファイル版 BookIdRepository 実装
//!
//! セッション開始時に読み込み、終了時に書き戻される保存済み書籍 ID の
//! 永続先。書き込みは一時ファイル + rename で原子的に行う。

use crate::domain::library::BookIdRepository;
use crate::infrastructure::config::AppConfig;
use serde_json::{from_reader, to_writer_pretty};
use std::{fs, io::Result, path::PathBuf};

pub struct JsonFileBookIdRepo {
    path: PathBuf,
}

impl JsonFileBookIdRepo {
    /// 設定ファイルの `cache_path`（未設定ならデータディレクトリ直下の
    /// `saved_books.json`）を使用する。
    pub fn new() -> Self {
        Self {
            path: AppConfig::load().cache_path(),
        }
    }

    /// 保存先を直接指定する（テスト・設定切替用）
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl BookIdRepository for JsonFileBookIdRepo {
    fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let f = fs::File::open(&self.path)?;
        Ok(from_reader::<_, Vec<String>>(f)?)
    }

    fn save(&self, all: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        {
            let f = fs::File::create(&tmp)?;
            to_writer_pretty(f, all)?;
        }
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

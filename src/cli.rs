use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about = "Book search client (search + saved books)")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// 書籍を検索して結果を表示
    Search {
        /// 検索語（複数指定時はスペースで結合）
        query: Vec<String>,
    },
    /// 📚 アカウントの保存済み書籍を一覧表示
    Saved,
    /// 保存済み書籍を 1 冊削除
    Remove { book_id: String },
    /// ログイン中ユーザーのプロフィール表示
    Me,
    /// 各種設定操作
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// `cache-path` 設定
    Set {
        #[command(subcommand)]
        field: ConfigField,
    },
}

#[derive(Subcommand)]
pub enum ConfigField {
    /// 保存済み書籍キャッシュの保存先を指定
    #[command(name = "cache-path")]
    CachePath { path: String },
}

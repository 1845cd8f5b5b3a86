//! Application層の抽象化トレイト定義
//! 外部依存を抽象化し、テスト可能な構造を提供します

use crate::domain::book::{Book, UserProfile};
use crate::error::Result;
use crate::infrastructure::external::google_books::VolumeItem;
use async_trait::async_trait;

/// 書籍検索 API の抽象化
#[async_trait]
pub trait VolumeSearchClient: Send + Sync {
    /// クエリ文字列でボリュームを検索
    async fn search_volumes(&self, query: &str) -> Result<Vec<VolumeItem>>;
}

/// 保存済み書籍バックエンド（GraphQL）の抽象化
#[async_trait]
pub trait SavedBooksClient: Send + Sync {
    /// 検索結果 1 冊をアカウントへ保存
    async fn save_book(&self, book: &Book) -> Result<()>;

    /// 保存済み書籍をアカウントから外す
    async fn remove_book(&self, book_id: &str) -> Result<()>;

    /// ログイン中ユーザーのプロフィールを取得
    async fn me(&self) -> Result<UserProfile>;
}

/// 認証トークン提供の抽象化
pub trait AuthTokenProvider: Send + Sync {
    /// 保持しているトークンを返す（未ログインなら None）
    fn token(&self) -> Option<String>;

    /// トークンの有無によるログイン判定
    fn logged_in(&self) -> bool {
        self.token().is_some()
    }
}

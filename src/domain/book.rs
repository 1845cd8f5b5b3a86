//! 書籍エンティティ – ドメイン層

use serde::{Deserialize, Serialize};

/// 著者情報が無い場合に表示する代替テキスト
pub const NO_AUTHOR_PLACEHOLDER: &str = "No author to display";

/// 検索結果 1 冊分。`saveBook` ミューテーションの `bookData` 入力と同じ形。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: String,    // 検索 API のボリューム ID
    pub authors: Vec<String>,
    pub title: String,
    pub description: String,
    pub image: String,      // サムネイル URL（無い場合は空文字）
}

impl Book {
    /// 著者一覧を表示用 1 行にまとめる
    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }
}

/// アカウントに保存済みの 1 冊。`me` クエリの `savedBooks` の形。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedBook {
    pub book_id: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// `me` クエリが返すユーザープロフィール
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub saved_books: Vec<SavedBook>,
}

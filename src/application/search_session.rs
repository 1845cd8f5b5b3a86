//! 書籍検索セッションを管理するサービス
//!
//! # 責任
//! - 検索入力・検索結果・保存済み書籍 ID のセッション状態管理
//! - 検索 API / バックエンド呼び出しと失敗時の状態保護
//! - セッション終了時のキャッシュ書き戻し
//!
//! 検索結果はセッション内のみで保持され、次の検索で置き換えられる。
//! 保存済み ID はセッション開始時にキャッシュから読み込み、終了時に
//! `close()` で 1 回だけ書き戻す。

use crate::application::traits::{AuthTokenProvider, SavedBooksClient, VolumeSearchClient};
use crate::domain::book::{Book, UserProfile};
use crate::domain::library::{BookIdRepository, is_saved};
use crate::infrastructure::external::google_books::volume_to_book;
use crate::utils::profiling;

use crate::error::Result;

/// 検索送信の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// 検索結果を n 件で置き換えた
    Updated(usize),
    /// 空クエリのため何もしなかった
    EmptyQuery,
}

/// 保存操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// 現在の検索結果に存在しない ID が指定された
    UnknownBook,
    /// 未ログインのため呼び出し自体を行わなかった
    NotLoggedIn,
}

/// 削除操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotLoggedIn,
}

/// 検索セッション
///
/// 1 回のマウント（開始）から `close()` までが 1 セッション。
pub struct SearchSession {
    search_client: Box<dyn VolumeSearchClient>,
    backend: Box<dyn SavedBooksClient>,
    auth: Box<dyn AuthTokenProvider>,
    id_repo: Box<dyn BookIdRepository>,
    search_input: String,
    searched_books: Vec<Book>,
    saved_book_ids: Vec<String>,
    closed: bool,
}

impl SearchSession {
    /// 保存ボタンの表示ラベル
    pub const LABEL_SAVE: &'static str = "Save this Book!";
    pub const LABEL_ALREADY_SAVED: &'static str = "This book has already been saved!";
    /// 一覧表示での説明文プレビュー長
    pub const DESCRIPTION_PREVIEW_LENGTH: usize = 160;

    /// セッションを開始し、保存済み ID をキャッシュから読み込む。
    ///
    /// キャッシュが読めない場合は空のリストで開始する（初回起動と同じ扱い）。
    pub fn open(
        search_client: Box<dyn VolumeSearchClient>,
        backend: Box<dyn SavedBooksClient>,
        auth: Box<dyn AuthTokenProvider>,
        id_repo: Box<dyn BookIdRepository>,
    ) -> Self {
        let saved_book_ids = match id_repo.load() {
            Ok(ids) => ids,
            Err(e) => {
                eprintln!("Warning: failed to load saved-book cache: {}", e);
                vec![]
            }
        };

        Self {
            search_client,
            backend,
            auth,
            id_repo,
            search_input: String::new(),
            searched_books: Vec::new(),
            saved_book_ids,
            closed: false,
        }
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn set_search_input(&mut self, input: String) {
        self.search_input = input;
    }

    pub fn searched_books(&self) -> &[Book] {
        &self.searched_books
    }

    pub fn saved_book_ids(&self) -> &[String] {
        &self.saved_book_ids
    }

    /// 指定 ID が保存済みかどうか（カードごとの描画時に評価される）
    pub fn is_saved(&self, book_id: &str) -> bool {
        is_saved(&self.saved_book_ids, book_id)
    }

    /// 保存ボタンに表示するラベル
    pub fn save_label(&self, book_id: &str) -> &'static str {
        if self.is_saved(book_id) {
            Self::LABEL_ALREADY_SAVED
        } else {
            Self::LABEL_SAVE
        }
    }

    /// 現在の検索入力で検索を実行する。
    ///
    /// 空入力は何もせず `EmptyQuery` を返す。検索失敗時は検索結果も
    /// 入力欄もそのまま残る。成功時は結果を置き換えて入力欄をクリアする。
    pub async fn submit_search(&mut self) -> Result<SearchOutcome> {
        if self.search_input.is_empty() {
            return Ok(SearchOutcome::EmptyQuery);
        }

        let api_timer = profiling::Timer::start("search.api");
        let items = self.search_client.search_volumes(&self.search_input).await?;
        if profiling::enabled() {
            api_timer.log_with(&format!("items={}", items.len()));
        } else {
            api_timer.log();
        }

        self.searched_books = items.into_iter().map(volume_to_book).collect();
        self.search_input.clear();
        Ok(SearchOutcome::Updated(self.searched_books.len()))
    }

    /// 現在の検索結果から 1 冊をアカウントへ保存する。
    ///
    /// 結果に無い ID・未ログインの場合はバックエンドを呼ばずに戻る。
    /// 成功時のみ保存済み ID に追記する。
    pub async fn save_book(&mut self, book_id: &str) -> Result<SaveOutcome> {
        let book = match self.searched_books.iter().find(|b| b.book_id == book_id) {
            Some(book) => book,
            None => return Ok(SaveOutcome::UnknownBook),
        };

        if !self.auth.logged_in() {
            return Ok(SaveOutcome::NotLoggedIn);
        }

        let mutation_timer = profiling::Timer::start("save.mutation");
        self.backend.save_book(book).await?;
        mutation_timer.log();

        // 重複チェックは行わない（保存済みの本は表示側で保存操作自体が無効になる）
        self.saved_book_ids.push(book_id.to_string());
        Ok(SaveOutcome::Saved)
    }

    /// 保存済みの 1 冊をアカウントから外す。
    ///
    /// セッション終了を待たず、キャッシュへも即時反映する。
    pub async fn remove_book(&mut self, book_id: &str) -> Result<RemoveOutcome> {
        if !self.auth.logged_in() {
            return Ok(RemoveOutcome::NotLoggedIn);
        }

        self.backend.remove_book(book_id).await?;

        self.saved_book_ids.retain(|id| id != book_id);
        if let Err(e) = self.id_repo.remove(book_id) {
            eprintln!("Warning: failed to update saved-book cache: {}", e);
        }
        Ok(RemoveOutcome::Removed)
    }

    /// ログイン中ユーザーのプロフィールを取得する。未ログインなら None。
    pub async fn profile(&self) -> Result<Option<UserProfile>> {
        if !self.auth.logged_in() {
            return Ok(None);
        }
        let me = self.backend.me().await?;
        Ok(Some(me))
    }

    /// フォーマット済み検索結果一覧。保存操作の表示は未ログイン時には出さない。
    pub fn render_results(&self) -> String {
        if self.searched_books.is_empty() {
            return "Search for a book to begin".to_string();
        }

        let mut output = format!("Viewing {} results:\n", self.searched_books.len());

        for (i, book) in self.searched_books.iter().enumerate() {
            output.push_str(&format!("  [{}] {}\n", i + 1, book.title));
            output.push_str(&format!("      Authors: {}\n", book.authors_line()));
            if !book.description.is_empty() {
                output.push_str(&format!("      {}\n", preview(&book.description)));
            }
            if !book.image.is_empty() {
                output.push_str(&format!("      Cover: {}\n", book.image));
            }
            if self.auth.logged_in() {
                output.push_str(&format!("      {}\n", self.save_label(&book.book_id)));
            }
        }

        output
    }

    /// セッション終了。保存済み ID をキャッシュへ 1 回だけ書き戻す。
    ///
    /// 2 回目以降の呼び出しは何もしない（冪等）。
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.id_repo.save(&self.saved_book_ids) {
            eprintln!("Error: failed to flush saved-book cache: {}", e);
        }
    }
}

/// 説明文を一覧表示向けに切り詰める
fn preview(text: &str) -> String {
    if text.chars().count() <= SearchSession::DESCRIPTION_PREVIEW_LENGTH {
        return text.to_string();
    }
    let head: String = text
        .chars()
        .take(SearchSession::DESCRIPTION_PREVIEW_LENGTH)
        .collect();
    format!("{}...", head)
}

/// ユーザーフィードバック
pub struct UserFeedback;

impl UserFeedback {
    pub fn book_saved(title: &str) -> String {
        format!("✅ Saved: {}", title)
    }

    pub fn already_saved(title: &str) -> String {
        format!("📚 {} is already in your saved books.", title)
    }

    pub fn login_required() -> String {
        "🔴 You need to be logged in to do that.".to_string()
    }

    pub fn unknown_book(book_id: &str) -> String {
        format!("❌ Book {} is not in the current results.", book_id)
    }

    pub fn book_removed(book_id: &str) -> String {
        format!("✅ Removed book {}", book_id)
    }

    pub fn profile_summary(username: &str, saved: usize) -> String {
        format!("📚 {} has {} saved book(s).", username, saved)
    }
}

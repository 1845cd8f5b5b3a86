//! 統一エラーハンドリング
//!
//! このモジュールは book_search アプリケーション全体で使用する統一エラー型を定義します。
//! 検索 API・GraphQL バックエンド・ローカルキャッシュの各エラーを統合し、
//! 一貫したエラーハンドリングを提供します。

use thiserror::Error;

/// book_search アプリケーション全体で使用する統一エラー型
#[derive(Debug, Error)]
pub enum BookSearchError {
    // ========================================
    // 検索関連エラー
    // ========================================
    #[error("Book search failed: {0}")]
    SearchFailed(String),

    // ========================================
    // バックエンド（GraphQL）関連エラー
    // ========================================
    #[error("Backend request failed: {0}")]
    BackendRequestFailed(String),

    #[error("Backend rejected the operation: {0}")]
    BackendRejected(String),

    // ========================================
    // 設定関連エラー
    // ========================================
    #[error("Configuration initialization error: {0}")]
    ConfigInitError(String),

    #[error("System error: {0}")]
    SystemError(String),
}

/// 統一Result型エイリアス
pub type Result<T> = std::result::Result<T, BookSearchError>;

// ========================================
// 既存エラー型からの自動変換実装
// ========================================

/// String からの変換（既存の文字列エラーとの互換性）
impl From<String> for BookSearchError {
    fn from(message: String) -> Self {
        BookSearchError::SystemError(message)
    }
}

/// &str からの変換（便利メソッド）
impl From<&str> for BookSearchError {
    fn from(message: &str) -> Self {
        BookSearchError::SystemError(message.to_string())
    }
}

/// String への変換（既存の文字列エラーとの互換性）
impl From<BookSearchError> for String {
    fn from(error: BookSearchError) -> Self {
        error.to_string()
    }
}

// ========================================
// ヘルパー関数
// ========================================

impl BookSearchError {
    /// エラーが再試行可能かどうかを判定
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookSearchError::SearchFailed(_) | BookSearchError::BackendRequestFailed(_)
        )
    }

    /// エラーがユーザーアクションで解決可能かどうかを判定
    pub fn is_user_actionable(&self) -> bool {
        matches!(self, BookSearchError::ConfigInitError(_))
    }

    /// エラーの重要度レベルを取得（ログレベル代替）
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BookSearchError::ConfigInitError(_) => ErrorSeverity::Error,

            BookSearchError::SearchFailed(_) | BookSearchError::BackendRequestFailed(_) => {
                ErrorSeverity::Warning
            }

            _ => ErrorSeverity::Debug,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

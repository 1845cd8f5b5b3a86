//! バックエンド GraphQL クライアント
//!
//! `{ query, variables }` の JSON エンベロープを POST し、`errors` 配列を
//! 含むレスポンスを失敗として扱います。認証トークンの付与はこの層の責任で、
//! 呼び出し側はログイン判定のみを行います。

use crate::application::traits::SavedBooksClient;
use crate::domain::book::{Book, UserProfile};
use crate::error::{BookSearchError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// `me` クエリ。ログイン中ユーザーと保存済み書籍を取得する。
pub const QUERY_ME: &str = r#"
{
    me {
        _id
        username
        email
        savedBooks {
            bookId
            authors
            image
            description
            title
            link
        }
    }
}
"#;

/// `saveBook` ミューテーション。検索結果 1 冊をアカウントへ保存する。
pub const SAVE_BOOK: &str = r#"
mutation saveBook($bookData: BookInput!) {
    saveBook(bookData: $bookData) {
        _id
        username
        email
        savedBooks {
            bookId
            authors
            image
            description
            title
            link
        }
    }
}
"#;

/// `removeBook` ミューテーション。保存済み書籍をアカウントから外す。
pub const REMOVE_BOOK: &str = r#"
mutation removeBook($bookId: ID!) {
    removeBook(bookId: $bookId) {
        _id
        username
        email
        savedBooks {
            bookId
            authors
            image
            description
            title
            link
        }
    }
}
"#;

/// リクエストエンベロープ
#[derive(Debug, Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

/// レスポンスエンベロープ
#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Serialize)]
struct NoVariables {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveBookVariables<'a> {
    book_data: &'a Book,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveBookVariables<'a> {
    book_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct MeData {
    me: Option<UserProfile>,
}

/// エンベロープを Result へ変換する。`errors` が 1 件でもあれば失敗。
fn envelope_into_result<T>(envelope: GraphqlResponse<T>) -> Result<T> {
    if !envelope.errors.is_empty() {
        let joined = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(BookSearchError::BackendRejected(joined));
    }

    envelope
        .data
        .ok_or_else(|| BookSearchError::BackendRequestFailed("response contained no data".into()))
}

/// GraphQL クライアント
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl GraphqlClient {
    /// 開発サーバーのデフォルトエンドポイント
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:3001/graphql";

    /// トークンは正規化済みであること（空文字は渡さない）
    pub fn new(endpoint: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            auth_token,
        }
    }

    /// 任意のオペレーションを 1 回実行する。
    async fn execute<V: Serialize, T: DeserializeOwned>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<T> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables });

        if let Some(token) = &self.auth_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| BookSearchError::BackendRequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BookSearchError::BackendRequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(BookSearchError::BackendRequestFailed(format!(
                "request failed with status {}: {}",
                status, body
            )));
        }

        let envelope: GraphqlResponse<T> = serde_json::from_str(&body).map_err(|e| {
            BookSearchError::BackendRequestFailed(format!("unexpected response: {}", e))
        })?;

        envelope_into_result(envelope)
    }
}

#[async_trait]
impl SavedBooksClient for GraphqlClient {
    async fn save_book(&self, book: &Book) -> Result<()> {
        let _: serde_json::Value = self
            .execute(SAVE_BOOK, SaveBookVariables { book_data: book })
            .await?;
        Ok(())
    }

    async fn remove_book(&self, book_id: &str) -> Result<()> {
        let _: serde_json::Value = self
            .execute(REMOVE_BOOK, RemoveBookVariables { book_id })
            .await?;
        Ok(())
    }

    async fn me(&self) -> Result<UserProfile> {
        let data: MeData = self.execute(QUERY_ME, NoVariables {}).await?;
        data.me
            .ok_or_else(|| BookSearchError::BackendRejected("me returned no user".into()))
    }
}

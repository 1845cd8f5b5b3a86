//! Google Books ボリューム検索 API クライアント
//!
//! `GET {base}/volumes?q=<query>` を 1 回発行し、レスポンスをドメインの
//! `Book` へ変換するための DTO と変換関数を提供します。

use crate::application::traits::VolumeSearchClient;
use crate::domain::book::{Book, NO_AUTHOR_PLACEHOLDER};
use crate::error::{BookSearchError, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// 検索レスポンス全体。ヒット 0 件時は `items` 自体が省略される。
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<VolumeItem>,
}

/// 検索結果の 1 ボリューム
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeItem {
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// ボリュームの書誌情報。欠落フィールドを許容する。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

/// `authors` が欠落している場合のみ代替テキストへ置き換える。
///
/// 空配列は「存在する」扱いでそのまま残す。
pub fn authors_or_placeholder(authors: Option<Vec<String>>) -> Vec<String> {
    authors.unwrap_or_else(|| vec![NO_AUTHOR_PLACEHOLDER.to_string()])
}

/// サムネイル URL が無い場合は空文字へフォールバックする。
pub fn thumbnail_or_empty(links: Option<&ImageLinks>) -> String {
    links
        .and_then(|l| l.thumbnail.clone())
        .unwrap_or_default()
}

/// 検索 API のボリュームをドメインの `Book` へ変換する。
pub fn volume_to_book(item: VolumeItem) -> Book {
    let VolumeInfo {
        authors,
        title,
        description,
        image_links,
    } = item.volume_info;

    Book {
        book_id: item.id,
        authors: authors_or_placeholder(authors),
        title,
        description,
        image: thumbnail_or_empty(image_links.as_ref()),
    }
}

/// Google Books API クライアント
pub struct GoogleBooksClient {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleBooksClient {
    /// 公式エンドポイント
    pub const DEFAULT_BASE_URL: &'static str = "https://www.googleapis.com/books/v1/volumes";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// 検索クエリを 1 回発行してボリューム一覧を返す。
    ///
    /// 非 2xx レスポンスはステータスと本文を含む `SearchFailed` になる。
    pub async fn search(&self, query: &str) -> Result<Vec<VolumeItem>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| BookSearchError::SearchFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BookSearchError::SearchFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(BookSearchError::SearchFailed(format!(
                "API request failed with status {}: {}",
                status, body
            )));
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| BookSearchError::SearchFailed(format!("unexpected response: {}", e)))?;

        Ok(parsed.items)
    }
}

#[async_trait]
impl VolumeSearchClient for GoogleBooksClient {
    async fn search_volumes(&self, query: &str) -> Result<Vec<VolumeItem>> {
        self.search(query).await
    }
}

// === Unit tests ==========================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn dune_volume_json() -> &'static str {
        r#"{
            "items": [
                {
                    "id": "b1",
                    "volumeInfo": {
                        "title": "Dune",
                        "authors": ["Frank Herbert"],
                        "description": "Desert planet epic",
                        "imageLinks": { "thumbnail": "http://x/img.jpg" }
                    }
                }
            ]
        }"#
    }

    /// 完全なボリュームは全フィールドがそのまま写像される
    #[test]
    fn full_volume_maps_all_fields() {
        let response: SearchResponse = serde_json::from_str(dune_volume_json()).unwrap();
        let book = volume_to_book(response.items.into_iter().next().unwrap());

        assert_eq!(book.book_id, "b1");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.authors, vec!["Frank Herbert".to_string()]);
        assert_eq!(book.description, "Desert planet epic");
        assert_eq!(book.image, "http://x/img.jpg");
    }

    /// imageLinks 欠落時は image が空文字になる
    #[test]
    fn missing_image_links_yields_empty_image() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "items": [
                    {
                        "id": "b1",
                        "volumeInfo": {
                            "title": "Dune",
                            "authors": ["Frank Herbert"],
                            "description": "Desert planet epic"
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        let book = volume_to_book(response.items.into_iter().next().unwrap());
        assert_eq!(book.image, "");
    }

    /// authors 欠落時のみ代替テキストが入る
    #[test]
    fn missing_authors_get_placeholder() {
        let book = volume_to_book(VolumeItem {
            id: "x1".into(),
            volume_info: VolumeInfo {
                authors: None,
                title: "Untitled".into(),
                description: String::new(),
                image_links: None,
            },
        });

        assert_eq!(book.authors, vec![NO_AUTHOR_PLACEHOLDER.to_string()]);
    }

    /// 空の authors 配列は空のまま残る
    #[test]
    fn empty_authors_list_stays_empty() {
        let book = volume_to_book(VolumeItem {
            id: "x2".into(),
            volume_info: VolumeInfo {
                authors: Some(vec![]),
                title: "Anonymous".into(),
                description: String::new(),
                image_links: None,
            },
        });

        assert!(book.authors.is_empty());
    }

    /// items キー省略（ヒット 0 件）は空リストとして扱う
    #[test]
    fn absent_items_key_parses_as_empty() {
        let response: SearchResponse =
            serde_json::from_str(r#"{ "kind": "books#volumes", "totalItems": 0 }"#).unwrap();
        assert!(response.items.is_empty());
    }

    /// thumbnail が null の場合も空文字になる
    #[test]
    fn null_thumbnail_yields_empty_image() {
        let links = ImageLinks { thumbnail: None };
        assert_eq!(thumbnail_or_empty(Some(&links)), "");
        assert_eq!(thumbnail_or_empty(None), "");
    }
}

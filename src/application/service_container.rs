//! サービスコンテナ
//!
//! # 責任
//! - 全ての依存関係の構築と管理
//! - 本番用クライアントと設定の接続
//! - テスト時のモック注入サポート

use crate::application::SearchSession;
use crate::application::traits::{AuthTokenProvider, SavedBooksClient, VolumeSearchClient};
use crate::domain::library::BookIdRepository;
use crate::error::Result;
use crate::infrastructure::auth::EnvAuthToken;
use crate::infrastructure::book_ids::JsonFileBookIdRepo;
use crate::infrastructure::external::{GoogleBooksClient, GraphqlClient};
use crate::utils::config::EnvConfig;

/// アプリケーション設定
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// 書籍検索 API のベース URL
    pub books_api_url: String,
    /// GraphQL エンドポイント
    pub graphql_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            books_api_url: GoogleBooksClient::DEFAULT_BASE_URL.to_string(),
            graphql_url: GraphqlClient::DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl AppConfig {
    /// 環境変数（EnvConfig）からエンドポイントを解決する
    pub fn from_env() -> Self {
        let env = EnvConfig::get();
        Self {
            books_api_url: env
                .books_api_url
                .clone()
                .unwrap_or_else(|| GoogleBooksClient::DEFAULT_BASE_URL.to_string()),
            graphql_url: env
                .graphql_url
                .clone()
                .unwrap_or_else(|| GraphqlClient::DEFAULT_ENDPOINT.to_string()),
        }
    }
}

/// サービスコンテナ
pub struct ServiceContainer {
    /// 検索セッション
    pub session: SearchSession,
}

impl ServiceContainer {
    /// デフォルト設定で新しいServiceContainerを作成
    ///
    /// `EnvConfig::init()` 済みであること。
    pub fn new() -> Result<Self> {
        Self::with_config(AppConfig::from_env())
    }

    /// カスタム設定で作成
    pub fn with_config(config: AppConfig) -> Result<Self> {
        let auth = EnvAuthToken::from_env_config();
        let search_client = Box::new(GoogleBooksClient::new(config.books_api_url.clone()));
        let backend = Box::new(GraphqlClient::new(config.graphql_url.clone(), auth.token()));
        let id_repo = Box::new(JsonFileBookIdRepo::new());

        Self::with_dependencies(search_client, backend, Box::new(auth), id_repo)
    }

    /// 依存関係を注入して作成（テスト用）
    pub fn with_dependencies(
        search_client: Box<dyn VolumeSearchClient>,
        backend: Box<dyn SavedBooksClient>,
        auth: Box<dyn AuthTokenProvider>,
        id_repo: Box<dyn BookIdRepository>,
    ) -> Result<Self> {
        Ok(ServiceContainer {
            session: SearchSession::open(search_client, backend, auth, id_repo),
        })
    }
}

/// テスト用のヘルパー実装
pub mod test_helpers {
    use super::*;
    use crate::domain::book::{Book, UserProfile};
    use crate::error::BookSearchError;
    use crate::infrastructure::external::google_books::VolumeItem;
    use async_trait::async_trait;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// テスト用のモック検索クライアント
    pub struct MockVolumeSearch {
        pub items: Vec<VolumeItem>,
        pub call_count: Arc<Mutex<usize>>,
    }

    impl MockVolumeSearch {
        pub fn new(items: Vec<VolumeItem>) -> Self {
            Self {
                items,
                call_count: Arc::new(Mutex::new(0)),
            }
        }
    }

    #[async_trait]
    impl VolumeSearchClient for MockVolumeSearch {
        async fn search_volumes(&self, _query: &str) -> Result<Vec<VolumeItem>> {
            *self.call_count.lock().unwrap() += 1;
            Ok(self.items.clone())
        }
    }

    /// テスト用のモックバックエンド
    pub struct MockSavedBooksBackend {
        pub reject_message: Option<String>,
        pub profile: Option<UserProfile>,
        pub save_calls: Arc<Mutex<usize>>,
        pub remove_calls: Arc<Mutex<usize>>,
    }

    impl MockSavedBooksBackend {
        pub fn accepting() -> Self {
            Self {
                reject_message: None,
                profile: None,
                save_calls: Arc::new(Mutex::new(0)),
                remove_calls: Arc::new(Mutex::new(0)),
            }
        }

        pub fn rejecting(message: &str) -> Self {
            Self {
                reject_message: Some(message.to_string()),
                ..Self::accepting()
            }
        }
    }

    #[async_trait]
    impl SavedBooksClient for MockSavedBooksBackend {
        async fn save_book(&self, _book: &Book) -> Result<()> {
            *self.save_calls.lock().unwrap() += 1;
            match &self.reject_message {
                Some(message) => Err(BookSearchError::BackendRejected(message.clone())),
                None => Ok(()),
            }
        }

        async fn remove_book(&self, _book_id: &str) -> Result<()> {
            *self.remove_calls.lock().unwrap() += 1;
            match &self.reject_message {
                Some(message) => Err(BookSearchError::BackendRejected(message.clone())),
                None => Ok(()),
            }
        }

        async fn me(&self) -> Result<UserProfile> {
            self.profile
                .clone()
                .ok_or_else(|| BookSearchError::BackendRejected("me returned no user".into()))
        }
    }

    /// テスト用の認証プロバイダ
    pub struct MockAuth {
        pub token: Option<String>,
    }

    impl AuthTokenProvider for MockAuth {
        fn token(&self) -> Option<String> {
            self.token.clone()
        }
    }

    /// テスト用のインメモリキャッシュ
    pub struct MemoryBookIdRepo {
        pub ids: Arc<Mutex<Vec<String>>>,
        pub save_count: Arc<Mutex<usize>>,
    }

    impl MemoryBookIdRepo {
        pub fn new() -> Self {
            Self::seeded(vec![])
        }

        pub fn seeded(ids: Vec<String>) -> Self {
            Self {
                ids: Arc::new(Mutex::new(ids)),
                save_count: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl Default for MemoryBookIdRepo {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BookIdRepository for MemoryBookIdRepo {
        fn load(&self) -> io::Result<Vec<String>> {
            Ok(self.ids.lock().unwrap().clone())
        }

        fn save(&self, all: &[String]) -> io::Result<()> {
            *self.save_count.lock().unwrap() += 1;
            *self.ids.lock().unwrap() = all.to_vec();
            Ok(())
        }
    }

    /// テスト用のセッションビルダー
    pub struct TestSessionBuilder {
        items: Vec<VolumeItem>,
        token: Option<String>,
        seeded_ids: Vec<String>,
        reject_message: Option<String>,
        profile: Option<UserProfile>,
    }

    impl TestSessionBuilder {
        pub fn new() -> Self {
            Self {
                items: vec![],
                token: Some("test-jwt".to_string()),
                seeded_ids: vec![],
                reject_message: None,
                profile: None,
            }
        }

        pub fn with_search_items(mut self, items: Vec<VolumeItem>) -> Self {
            self.items = items;
            self
        }

        pub fn logged_out(mut self) -> Self {
            self.token = None;
            self
        }

        pub fn with_saved_ids(mut self, ids: Vec<String>) -> Self {
            self.seeded_ids = ids;
            self
        }

        pub fn with_rejecting_backend(mut self, message: &str) -> Self {
            self.reject_message = Some(message.to_string());
            self
        }

        pub fn with_profile(mut self, profile: UserProfile) -> Self {
            self.profile = Some(profile);
            self
        }

        pub fn build(self) -> Result<ServiceContainer> {
            let search_client = Box::new(MockVolumeSearch::new(self.items));
            let backend = Box::new(MockSavedBooksBackend {
                reject_message: self.reject_message,
                profile: self.profile,
                save_calls: Arc::new(Mutex::new(0)),
                remove_calls: Arc::new(Mutex::new(0)),
            });
            let auth = Box::new(MockAuth { token: self.token });
            let id_repo = Box::new(MemoryBookIdRepo::seeded(self.seeded_ids));

            ServiceContainer::with_dependencies(search_client, backend, auth, id_repo)
        }
    }

    impl Default for TestSessionBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::infrastructure::external::{GoogleBooksClient, GraphqlClient};

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        // テスト用のEnvConfig初期化（環境変数は未設定扱い）
        EnvConfig::init_for_test(EnvConfig {
            auth_token: None,
            graphql_url: None,
            books_api_url: None,
            xdg_data_home: None,
            env_path: None,
        });

        let config = AppConfig::from_env();
        assert_eq!(config.books_api_url, GoogleBooksClient::DEFAULT_BASE_URL);
        assert_eq!(config.graphql_url, GraphqlClient::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_session_builder_creates_open_session() {
        let container = TestSessionBuilder::new()
            .build()
            .expect("Failed to create test container");

        assert!(container.session.searched_books().is_empty());
        assert!(container.session.saved_book_ids().is_empty());
        assert_eq!(container.session.search_input(), "");
    }

    #[test]
    fn test_session_builder_seeds_cache_ids() {
        let container = TestSessionBuilder::new()
            .with_saved_ids(vec!["b1".to_string()])
            .build()
            .expect("Failed to create test container");

        assert!(container.session.is_saved("b1"));
        assert!(!container.session.is_saved("b2"));
    }
}

//! 環境変数ベースの認証トークン提供
//!
//! トークンの発行・保存・更新は扱わない。起動時に渡されたトークンを
//! そのまま保持し、ログイン判定はトークンの有無のみで行う。

use crate::application::traits::AuthTokenProvider;
use crate::utils::config::EnvConfig;

pub struct EnvAuthToken {
    token: Option<String>,
}

impl EnvAuthToken {
    /// 空白のみのトークンは未ログイン扱いに正規化する
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// `BOOK_SEARCH_AUTH_TOKEN` から構築する
    pub fn from_env_config() -> Self {
        Self::new(EnvConfig::get().auth_token.clone())
    }
}

impl AuthTokenProvider for EnvAuthToken {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}

// === Unit tests ==========================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// トークンがあればログイン済み
    #[test]
    fn present_token_counts_as_logged_in() {
        let auth = EnvAuthToken::new(Some("jwt-token".into()));
        assert!(auth.logged_in());
        assert_eq!(auth.token(), Some("jwt-token".to_string()));
    }

    /// 空文字・空白のみのトークンは未ログイン扱い
    #[test]
    fn blank_token_counts_as_logged_out() {
        assert!(!EnvAuthToken::new(Some(String::new())).logged_in());
        assert!(!EnvAuthToken::new(Some("   ".into())).logged_in());
        assert!(!EnvAuthToken::new(None).logged_in());
    }

    /// 環境変数にトークンが無ければ未ログインで起動する
    #[test]
    fn from_env_config_without_token_is_logged_out() {
        EnvConfig::test_init();

        let auth = EnvAuthToken::from_env_config();
        assert!(!auth.logged_in());
    }
}

//! 保存済み書籍 ID のキャッシュ抽象 – ドメイン層

use std::io;

/// 指定 ID がキャッシュ済みかを判定します。
///
/// 検索結果カードの保存ボタンの活性判定に使用され、
/// 描画のたびに各カードごとに評価されます。
pub fn is_saved(saved_ids: &[String], book_id: &str) -> bool {
    saved_ids.iter().any(|id| id == book_id)
}

/// 保存済み書籍 ID 永続化 I/F
pub trait BookIdRepository: Send + Sync {
    fn load(&self) -> io::Result<Vec<String>>;
    fn save(&self, all: &[String]) -> io::Result<()>;

    /// bookId で削除。戻り値 true=削除した / false=見つからず
    fn remove(&self, book_id: &str) -> io::Result<bool> {
        let mut list = self.load()?;
        let len_before = list.len();
        list.retain(|id| id != book_id);
        let removed = len_before != list.len();
        if removed {
            self.save(&list)?;
        }
        Ok(removed)
    }
}

// === Unit tests ==========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MemoryRepo {
        ids: Mutex<Vec<String>>,
    }

    impl BookIdRepository for MemoryRepo {
        fn load(&self) -> io::Result<Vec<String>> {
            Ok(self.ids.lock().unwrap().clone())
        }

        fn save(&self, all: &[String]) -> io::Result<()> {
            *self.ids.lock().unwrap() = all.to_vec();
            Ok(())
        }
    }

    /// 保存済み判定は ID の完全一致で行われる
    #[test]
    fn is_saved_matches_exact_ids() {
        let ids = vec!["b1".to_string(), "b2".to_string()];
        assert!(is_saved(&ids, "b1"));
        assert!(!is_saved(&ids, "b3"));
        assert!(!is_saved(&[], "b1"));
    }

    /// remove は該当 ID を削除して true を返す
    #[test]
    fn remove_deletes_matching_id() {
        let repo = MemoryRepo {
            ids: Mutex::new(vec!["b1".into(), "b2".into()]),
        };

        assert!(repo.remove("b1").unwrap());
        assert_eq!(repo.load().unwrap(), vec!["b2".to_string()]);
    }

    /// remove は見つからない場合 false を返し保存しない
    #[test]
    fn remove_returns_false_when_missing() {
        let repo = MemoryRepo {
            ids: Mutex::new(vec!["b1".into()]),
        };

        assert!(!repo.remove("zzz").unwrap());
        assert_eq!(repo.load().unwrap(), vec!["b1".to_string()]);
    }
}

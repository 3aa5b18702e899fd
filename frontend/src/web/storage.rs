//! access token 的 localStorage 持久化
//!
//! 隐私模式等环境下 localStorage 可能不可用，调用方应先检查 `is_available`
//! 并退回到内存实现。

use web_sys::Storage;

use crate::http::TokenStore;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// 以固定键名保存 access token
#[derive(Debug, Clone)]
pub struct BrowserTokenStore {
    key: String,
}

impl BrowserTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// 当前环境是否可用 localStorage
    pub fn is_available() -> bool {
        local_storage().is_some()
    }
}

impl TokenStore for BrowserTokenStore {
    /// 空字符串视为没有 token
    fn load(&self) -> Option<String> {
        local_storage()?
            .get_item(&self.key)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) {
        let saved = local_storage().is_some_and(|s| s.set_item(&self.key, token).is_ok());
        if !saved {
            tracing::warn!(key = %self.key, "failed to persist access token");
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

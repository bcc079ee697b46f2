//! 持久化会话存储
//!
//! 只保存一个不透明的令牌字符串，不做任何内容校验。

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use bookclub_shared::STORAGE_TOKEN_KEY;

use crate::error::SessionResult;
use crate::web::LocalStorage;

pub trait TokenStore {
    fn save(&self, token: &str) -> SessionResult<()>;
    fn load(&self) -> SessionResult<Option<String>>;
    fn clear(&self) -> SessionResult<()>;
}

/// 浏览器 localStorage 中的 `authToken` 键
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn save(&self, token: &str) -> SessionResult<()> {
        LocalStorage::set(STORAGE_TOKEN_KEY, token)
    }

    fn load(&self) -> SessionResult<Option<String>> {
        LocalStorage::get(STORAGE_TOKEN_KEY)
    }

    fn clear(&self) -> SessionResult<()> {
        LocalStorage::delete(STORAGE_TOKEN_KEY)
    }
}

/// 内存实现，克隆后共享同一个槽位
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        *store.slot.borrow_mut() = Some(token.to_string());
        store
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> SessionResult<()> {
        *self.slot.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> SessionResult<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn clear(&self) -> SessionResult<()> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_token_loads_back_unchanged() {
        let store = MemoryTokenStore::new();
        for token in ["abc", "", "eyJhbGciOi.JIUzI1NiJ9.x-y_z"] {
            store.save(token).unwrap();
            assert_eq!(store.load().unwrap().as_deref(), Some(token));
        }
    }

    #[test]
    fn clear_empties_the_slot() {
        let store = MemoryTokenStore::with_token("abc");
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        // 重复清除不是错误
        store.clear().unwrap();
    }

    #[test]
    fn clones_share_the_slot() {
        let store = MemoryTokenStore::new();
        let view = store.clone();
        store.save("abc").unwrap();
        assert_eq!(view.load().unwrap().as_deref(), Some("abc"));
    }
}

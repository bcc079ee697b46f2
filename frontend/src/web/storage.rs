//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口。
//! 存储不可用（隐私模式、配额、非浏览器环境）时返回错误而不是静默忽略。

use crate::error::SessionError;

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Result<web_sys::Storage, SessionError> {
        let window = web_sys::window()
            .ok_or_else(|| SessionError::StorageUnavailable("无法获取 window 对象".to_string()))?;
        window
            .local_storage()
            .map_err(|e| SessionError::StorageUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| SessionError::StorageUnavailable("localStorage 未启用".to_string()))
    }

    /// 获取存储的字符串值，键不存在时返回 `Ok(None)`
    pub fn get(key: &str) -> Result<Option<String>, SessionError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| SessionError::StorageUnavailable(format!("{:?}", e)))
    }

    /// 设置存储值
    pub fn set(key: &str, value: &str) -> Result<(), SessionError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| SessionError::StorageUnavailable(format!("{:?}", e)))
    }

    /// 删除存储的键值对
    pub fn delete(key: &str) -> Result<(), SessionError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| SessionError::StorageUnavailable(format!("{:?}", e)))
    }
}

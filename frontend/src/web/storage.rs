//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 直接访问浏览器本地存储。
//! 本应用只持久化一个键：登录令牌 [`tokomo_shared::STORAGE_TOKEN_KEY`]。

use tokomo_shared::STORAGE_TOKEN_KEY;

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值；键不存在或发生错误时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回操作是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除键值对，返回操作是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    /// 读取登录令牌
    pub fn token() -> Option<String> {
        Self::get(STORAGE_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// 持久化登录令牌
    pub fn set_token(token: &str) -> bool {
        Self::set(STORAGE_TOKEN_KEY, token)
    }

    /// 清除登录令牌
    pub fn clear_token() -> bool {
        Self::delete(STORAGE_TOKEN_KEY)
    }
}

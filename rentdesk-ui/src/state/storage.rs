//! Browser local storage backend for the session store

use rentdesk::session::{SessionError, SessionResult, SessionStorage};

/// `window.localStorage`, looked up on every call
///
/// Reads return `None` when storage is unavailable (no window, private
/// mode); writes report it as [`SessionError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    fn require() -> SessionResult<web_sys::Storage> {
        Self::storage()
            .ok_or_else(|| SessionError::Unavailable("localStorage is not available".to_string()))
    }
}

impl SessionStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        Self::require()?
            .set_item(key, value)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        Self::require()?
            .remove_item(key)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use rentdesk::session::{Session, SessionStore, ADMIN_KEY, TOKEN_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_survives_in_local_storage() {
        let store = SessionStore::new(LocalStorage);
        store.clear().unwrap();
        assert_eq!(store.load(), None);

        store.save(&Session::new("abc", true)).unwrap();
        assert_eq!(LocalStorage.get_item(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(LocalStorage.get_item(ADMIN_KEY).as_deref(), Some("true"));
        assert_eq!(store.load(), Some(Session::new("abc", true)));

        store.clear().unwrap();
        assert_eq!(LocalStorage.get_item(TOKEN_KEY), None);
    }
}

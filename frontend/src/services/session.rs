use shared::session::{SessionStore, TOKEN_STORAGE_KEY};
use web_sys::Storage;

/// Session token kept in the browser's `localStorage`, shared by all tabs
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSession;

impl LocalStorageSession {
    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl SessionStore for LocalStorageSession {
    fn token(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()
    }

    fn set_token(&self, token: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
                    log::error!("Failed to persist session token");
                }
            }
            None => log::warn!("localStorage unavailable, session will not persist"),
        }
    }

    fn remove_token(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

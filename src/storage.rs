use crate::api::types::{AuthResponse, User};
use crate::api::fetch::js_error_message;
use crate::config::{TOKEN_KEY, USER_KEY};
use crate::error::AppError;

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str) -> Result<(), AppError>;
}

/// `window.localStorage`.
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, AppError> {
        let window = web_sys::window().ok_or_else(|| AppError::Storage("No window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| AppError::Storage(js_error_message(&e)))?
            .ok_or_else(|| AppError::Storage("No localStorage".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        self.storage
            .get_item(key)
            .map_err(|e| AppError::Storage(js_error_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| AppError::Storage(js_error_message(&e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.storage
            .remove_item(key)
            .map_err(|e| AppError::Storage(js_error_message(&e)))
    }
}

/// The signed-in user's token and profile, kept under two storage keys.
pub struct CredentialStore<S> {
    store: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn save(&self, auth: &AuthResponse) -> Result<(), AppError> {
        let user_json =
            serde_json::to_string(&auth.user).map_err(|e| AppError::Storage(e.to_string()))?;
        self.store.set_item(TOKEN_KEY, &auth.token)?;
        self.store.set_item(USER_KEY, &user_json)
    }

    /// Stored token, `None` when missing or blank.
    pub fn token(&self) -> Option<String> {
        self.store
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.trim().is_empty())
    }

    /// Stored profile. A corrupt entry reads as signed-out profile data.
    pub fn user(&self) -> Option<User> {
        let raw = self.store.get_item(USER_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Ignoring unreadable stored user: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove_item(TOKEN_KEY)?;
        self.store.remove_item(USER_KEY)
    }

    #[cfg(test)]
    pub fn inner(&self) -> &S {
        &self.store
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStorage;
    use super::*;

    fn auth() -> AuthResponse {
        AuthResponse {
            token: "abc.def".to_string(),
            user: User {
                email: "ana@example.com".to_string(),
                first_name: Some("Ana".to_string()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_save_writes_both_keys() {
        let creds = CredentialStore::new(MemoryStorage::new());
        creds.save(&auth()).unwrap();

        assert_eq!(creds.inner().get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc.def"));
        let stored_user = creds.inner().get_item(USER_KEY).unwrap().unwrap();
        assert!(stored_user.contains("ana@example.com"));
        assert_eq!(creds.user().unwrap().display_name(), "Ana");
        assert!(creds.is_authenticated());
    }

    #[test]
    fn test_blank_token_is_unauthenticated() {
        let store = MemoryStorage::new();
        store.set_item(TOKEN_KEY, "").unwrap();
        let creds = CredentialStore::new(store);
        assert!(!creds.is_authenticated());
        assert!(creds.token().is_none());
    }

    #[test]
    fn test_corrupt_user_reads_as_none() {
        let store = MemoryStorage::new();
        store.set_item(USER_KEY, "{not json").unwrap();
        let creds = CredentialStore::new(store);
        assert!(creds.user().is_none());
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let creds = CredentialStore::new(MemoryStorage::new());
        creds.save(&auth()).unwrap();
        creds.clear().unwrap();
        assert_eq!(creds.inner().len(), 0);
        assert!(!creds.is_authenticated());
    }
}

use leptos::prelude::*;

use crate::api::types::User;
use crate::api::{ApiClient, FetchTransport};
use crate::auth::AuthOutcome;
use crate::config::AppConfig;
use crate::storage::{BrowserStorage, CredentialStore};

pub const STORAGE_UNAVAILABLE: &str =
    "Your browser is blocking local storage, so we can't keep you signed in.";

/// App-wide reactive state: where the API lives and who is signed in.
#[derive(Clone, Copy)]
pub struct ApiContext {
    pub base_url: StoredValue<String>,
    pub token: RwSignal<Option<String>>,
    pub user: RwSignal<Option<User>>,
}

impl ApiContext {
    /// Seed from configuration and whatever credentials survived a reload.
    pub fn load(config: &AppConfig) -> Self {
        let (token, user) = match credentials() {
            Some(creds) if creds.is_authenticated() => (creds.token(), creds.user()),
            _ => (None, None),
        };
        Self {
            base_url: StoredValue::new(config.api_base_url.clone()),
            token: RwSignal::new(token),
            user: RwSignal::new(user),
        }
    }

    /// A client carrying the current token. Call from event handlers.
    pub fn client(&self) -> ApiClient<FetchTransport> {
        ApiClient::new(FetchTransport, self.base_url.get_value()).with_token(self.token.get_untracked())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.with(|t| t.is_some())
    }

    pub fn signed_in(&self, outcome: &AuthOutcome) {
        self.token.set(Some(outcome.token.clone()));
        self.user.set(Some(outcome.user.clone()));
    }

    pub fn signed_out(&self) {
        self.token.set(None);
        self.user.set(None);
    }
}

/// Credential store over `localStorage`, when the browser allows it.
pub fn credentials() -> Option<CredentialStore<BrowserStorage>> {
    match BrowserStorage::local() {
        Ok(storage) => Some(CredentialStore::new(storage)),
        Err(e) => {
            log::warn!("Browser storage unavailable: {}", e);
            None
        }
    }
}

pub fn use_api() -> ApiContext {
    expect_context::<ApiContext>()
}

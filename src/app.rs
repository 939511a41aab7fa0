//! Application root: the wired-together client, session, and state slices.
//!
//! One `App` is created at process start and shared (by reference or `Arc`)
//! with whatever drives it. All session mutation goes through the
//! documented operations; nothing here is a process-global.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::client::ApiClient;
use crate::config::ApiConfig;
use crate::session::Session;
use crate::state::{AuthSlice, KycSlice, TransactionsSlice, UserSlice, WalletSlice};
use crate::storage::CredentialStore;

/// Shared application state: the API client, the credential session, and
/// one lock-guarded slice per domain.
pub struct App {
    pub session: Arc<Session>,
    pub api: Arc<ApiClient>,

    pub auth: RwLock<AuthSlice>,
    pub users: RwLock<UserSlice>,
    pub kyc: RwLock<KycSlice>,
    pub wallets: RwLock<WalletSlice>,
    pub transactions: RwLock<TransactionsSlice>,
}

impl App {
    /// Production wiring: credentials persist in the system keyring.
    pub fn new(config: ApiConfig) -> Self {
        let store = CredentialStore::keyring(&config.keyring_service);
        Self::with_store(config, store)
    }

    /// Wiring with an injected credential store (tests, keyring-less hosts).
    pub fn with_store(config: ApiConfig, store: CredentialStore) -> Self {
        let session = Arc::new(Session::new(store));
        let api = Arc::new(ApiClient::new(&config, Arc::clone(&session)));

        Self {
            session,
            api,
            auth: RwLock::new(AuthSlice::default()),
            users: RwLock::new(UserSlice::default()),
            kyc: RwLock::new(KycSlice::default()),
            wallets: RwLock::new(WalletSlice::default()),
            transactions: RwLock::new(TransactionsSlice::default()),
        }
    }

    /// Restore a persisted session, if any. Call once at startup.
    pub async fn initialize(&self) {
        self.session.initialize().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_app_is_unauthenticated() {
        let app = App::with_store(
            ApiConfig::new("http://localhost:8080/api"),
            CredentialStore::memory(),
        );
        app.initialize().await;

        assert!(!app.session.is_authenticated().await);
        assert!(app.users.read().await.profile.is_none());
    }
}

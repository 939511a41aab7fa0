//! Session synchronization between application state, the persistent
//! credential store, and the dispatcher's default Authorization header.
//!
//! Three copies of the credential exist: the in-memory session state, the
//! persisted store, and the header value the dispatcher falls back to.
//! Every mutation here updates all of them together so no observer sees an
//! authenticated flag without a matching header, or vice versa, once the
//! call returns.
//!
//! A persisted token is trusted optimistically at startup: it is pushed
//! into the default header without server-side validation, and a stale
//! token is only rejected reactively, by the 401 on its first use.

use tokio::sync::RwLock;
use zeroize::Zeroize;

use crate::api::types::{AuthResponse, AuthUser};
use crate::storage::{CredentialStore, AUTH_TOKEN_KEY, AUTH_USER_KEY};

/// In-memory credential state.
#[derive(Debug, Default)]
struct SessionData {
    token: Option<String>,
    user: Option<AuthUser>,
    authenticated: bool,
}

/// The credential synchronizer shared by the dispatcher and the ops layer.
pub struct Session {
    store: CredentialStore,
    data: RwLock<SessionData>,
    /// Default Authorization bearer value, kept in sync with the token.
    bearer: RwLock<Option<String>>,
}

impl Session {
    pub fn new(store: CredentialStore) -> Self {
        Self {
            store,
            data: RwLock::new(SessionData::default()),
            bearer: RwLock::new(None),
        }
    }

    /// Restore persisted credentials at application start.
    ///
    /// The stored token is pushed into the default header unvalidated; the
    /// session counts as authenticated only when both the token and the
    /// identity snapshot survived the restart.
    pub async fn initialize(&self) {
        let token: Option<String> = self.store.get(AUTH_TOKEN_KEY);
        let user: Option<AuthUser> = self.store.get(AUTH_USER_KEY);

        let mut data = self.data.write().await;
        data.authenticated = token.is_some() && user.is_some();
        data.user = user;
        data.token = token.clone();
        *self.bearer.write().await = token;

        if data.authenticated {
            log::info!("session restored from credential store");
        }
    }

    /// Resolve the bearer token for one outgoing request.
    ///
    /// Priority: session state, then the persistent store, then the synced
    /// default header. `None` means the request goes out unauthenticated —
    /// lookup fails open, the server's authorization fails closed.
    pub async fn bearer_for_request(&self) -> Option<String> {
        if let Some(ref token) = self.data.read().await.token {
            return Some(token.clone());
        }
        if let Some(token) = self.store.get::<String>(AUTH_TOKEN_KEY) {
            return Some(token);
        }
        self.bearer.read().await.clone()
    }

    /// Push the state token into the default header. Idempotent; a missing
    /// token clears the header instead.
    pub async fn sync_header(&self) {
        let token = self.data.read().await.token.clone();
        *self.bearer.write().await = token;
    }

    /// Install the credentials returned by login or registration.
    ///
    /// State, store, and default header are updated in one call: the state
    /// token is never visible without the header having been set.
    pub async fn establish(&self, auth: &AuthResponse) {
        let identity = auth.identity();

        let mut data = self.data.write().await;
        if let Some(mut old) = data.token.take() {
            old.zeroize();
        }
        data.token = Some(auth.token.clone());
        data.user = Some(identity.clone());
        data.authenticated = true;

        self.store.set(AUTH_TOKEN_KEY, &auth.token);
        self.store.set(AUTH_USER_KEY, &identity);
        *self.bearer.write().await = Some(auth.token.clone());

        log::info!("session established for user {}", identity.username);
    }

    /// Refresh the persisted identity snapshot after a profile change.
    pub async fn update_identity(&self, user: AuthUser) {
        let mut data = self.data.write().await;
        self.store.set(AUTH_USER_KEY, &user);
        data.user = Some(user);
    }

    /// Tear the session down: remove both persisted keys, clear the default
    /// header, and flip the authenticated flag, all before returning.
    ///
    /// Runs on explicit logout and on any 401 response. The in-memory token
    /// is zeroized.
    pub async fn invalidate(&self) {
        let mut data = self.data.write().await;

        self.store.remove(AUTH_TOKEN_KEY);
        self.store.remove(AUTH_USER_KEY);

        if let Some(mut token) = data.token.take() {
            token.zeroize();
        }
        data.user = None;
        data.authenticated = false;
        *self.bearer.write().await = None;

        log::info!("session invalidated");
    }

    /// Whether the session currently counts as authenticated.
    pub async fn is_authenticated(&self) -> bool {
        self.data.read().await.authenticated
    }

    /// Current identity snapshot, if any.
    pub async fn user(&self) -> Option<AuthUser> {
        self.data.read().await.user.clone()
    }

    /// Current in-state token, if any.
    pub async fn token(&self) -> Option<String> {
        self.data.read().await.token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_response(token: &str, username: &str) -> AuthResponse {
        AuthResponse {
            token: token.to_string(),
            token_type: "Bearer".to_string(),
            id: 1,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            roles: vec!["ROLE_USER".to_string()],
        }
    }

    #[tokio::test]
    async fn test_stored_token_is_used_when_state_is_empty() {
        let store = CredentialStore::memory();
        store.set(AUTH_TOKEN_KEY, &"T1".to_string());
        let session = Session::new(store);

        assert_eq!(session.bearer_for_request().await, Some("T1".to_string()));
    }

    #[tokio::test]
    async fn test_initialize_restores_persisted_session() {
        let store = CredentialStore::memory();
        store.set(AUTH_TOKEN_KEY, &"T1".to_string());
        store.set(
            AUTH_USER_KEY,
            &AuthUser {
                id: 1,
                username: "ana".to_string(),
                email: "ana@example.com".to_string(),
                roles: vec![],
            },
        );

        let session = Session::new(store);
        session.initialize().await;

        assert!(session.is_authenticated().await);
        assert_eq!(session.token().await, Some("T1".to_string()));
        assert_eq!(session.bearer_for_request().await, Some("T1".to_string()));
    }

    #[tokio::test]
    async fn test_token_without_identity_is_not_authenticated() {
        let store = CredentialStore::memory();
        store.set(AUTH_TOKEN_KEY, &"T1".to_string());

        let session = Session::new(store);
        session.initialize().await;

        // The header is still primed so the first request can try the token.
        assert!(!session.is_authenticated().await);
        assert_eq!(session.bearer_for_request().await, Some("T1".to_string()));
    }

    #[tokio::test]
    async fn test_state_token_takes_priority_over_store() {
        let store = CredentialStore::memory();
        let session = Session::new(store);
        session.establish(&auth_response("state-token", "ana")).await;

        assert_eq!(
            session.bearer_for_request().await,
            Some("state-token".to_string())
        );
        assert!(session.is_authenticated().await);
        assert_eq!(session.user().await.map(|u| u.username), Some("ana".to_string()));
    }

    #[tokio::test]
    async fn test_invalidate_clears_every_credential_location() {
        let session = Session::new(CredentialStore::memory());
        session.establish(&auth_response("T1", "ana")).await;

        session.invalidate().await;

        assert!(!session.is_authenticated().await);
        assert_eq!(session.token().await, None);
        assert_eq!(session.user().await, None);
        assert_eq!(session.bearer_for_request().await, None);
    }

    #[tokio::test]
    async fn test_sync_header_is_idempotent() {
        let session = Session::new(CredentialStore::memory());
        session.establish(&auth_response("T1", "ana")).await;

        session.sync_header().await;
        session.sync_header().await;

        assert_eq!(session.bearer_for_request().await, Some("T1".to_string()));
    }

    #[tokio::test]
    async fn test_update_identity_rewrites_snapshot() {
        let store = CredentialStore::memory();
        let session = Session::new(store);
        session.establish(&auth_response("T1", "ana")).await;

        let renamed = AuthUser {
            id: 1,
            username: "ana".to_string(),
            email: "ana.new@example.com".to_string(),
            roles: vec!["ROLE_USER".to_string()],
        };
        session.update_identity(renamed.clone()).await;

        assert_eq!(session.user().await, Some(renamed));
    }
}

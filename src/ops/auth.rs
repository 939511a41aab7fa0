//! Registration, login, and logout.
//!
//! Both credential-producing operations hand the returned token to the
//! session in the same call that marks them fulfilled, so an authenticated
//! flag is never observable without the credential having been propagated.

use crate::api::envelope::ApiResponse;
use crate::api::types::{AuthResponse, LoginRequest, RegisterRequest};
use crate::app::App;

const REGISTER_PATH: &str = "/users/register";
const LOGIN_PATH: &str = "/users/login";

/// POST /users/register — create an account and establish the session.
pub async fn register(app: &App, request: RegisterRequest) {
    app.auth.write().await.registration.pending();

    let result = app
        .api
        .post::<AuthResponse, _>(REGISTER_PATH, &request)
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(Some(auth)) => {
            app.session.establish(&auth).await;
            app.auth.write().await.registration.fulfilled();
        }
        Ok(None) => {
            app.auth
                .write()
                .await
                .registration
                .rejected("registration returned no credentials");
        }
        Err(e) => {
            app.auth
                .write()
                .await
                .registration
                .rejected(e.message_or("registration failed"));
        }
    }
}

/// POST /users/login — authenticate and establish the session.
pub async fn login(app: &App, request: LoginRequest) {
    app.auth.write().await.login.pending();

    let result = app
        .api
        .post::<AuthResponse, _>(LOGIN_PATH, &request)
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(Some(auth)) => {
            app.session.establish(&auth).await;
            app.auth.write().await.login.fulfilled();
        }
        Ok(None) => {
            app.auth
                .write()
                .await
                .login
                .rejected("login returned no credentials");
        }
        Err(e) => {
            app.auth.write().await.login.rejected(e.message_or("login failed"));
        }
    }
}

/// Tear the session down and drop every slice's session-bound data.
///
/// Purely local: the backend holds no server-side session to end.
pub async fn logout(app: &App) {
    app.session.invalidate().await;

    app.auth.write().await.clear();
    app.users.write().await.clear();
    app.kyc.write().await.clear();
    app.wallets.write().await.clear();
    app.transactions.write().await.clear();

    log::info!("logout complete");
}

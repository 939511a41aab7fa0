//! Account operations: profile, verification, referral network, fund
//! movements, and the admin surface.
//!
//! Fund movements (license purchase, withdrawal, delegated purchase,
//! transfer) are parameter-addressed POSTs that return only a confirmation
//! message; their records carry no data beyond the lifecycle flags.

use crate::api::envelope::{ApiResponse, Page};
use crate::api::types::{
    AccountRequest, CryptoKind, EditProfileRequest, NetworkMember, PaymentMethod, RequestKind,
    User, WalletKind,
};
use crate::app::App;

const BASE_PATH: &str = "/users";

/// PUT /users/profile — edit the authenticated member's profile.
///
/// On success the profile slice and the persisted identity snapshot are
/// refreshed together.
pub async fn edit_profile(app: &App, request: EditProfileRequest) {
    app.users.write().await.edit_profile.pending();

    let result = app
        .api
        .put::<User, _>(&format!("{}/profile", BASE_PATH), &request)
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(Some(user)) => {
            {
                let mut slice = app.users.write().await;
                slice.profile = Some(user.clone());
                slice.edit_profile.fulfilled();
            }
            // Keep the persisted snapshot aligned with the new profile.
            if let Some(mut identity) = app.session.user().await {
                identity.username = user.username.clone();
                identity.email = user.email.clone();
                app.session.update_identity(identity).await;
            }
        }
        Ok(None) => {
            let mut slice = app.users.write().await;
            slice.edit_profile.fulfilled();
        }
        Err(e) => {
            app.users
                .write()
                .await
                .edit_profile
                .rejected(e.message_or("failed to edit profile"));
        }
    }
}

/// POST /users/two-step-verification — submit a verification code.
pub async fn verify_two_step(app: &App, code: &str) {
    app.users.write().await.two_step_verification.pending();

    let result = app
        .api
        .post_query::<String>(
            &format!("{}/two-step-verification", BASE_PATH),
            &[("code", code.to_string())],
        )
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(_) => app.users.write().await.two_step_verification.fulfilled(),
        Err(e) => app
            .users
            .write()
            .await
            .two_step_verification
            .rejected(e.message_or("two-step verification failed")),
    }
}

/// GET /users/network/{username} — the member's referral network.
pub async fn fetch_network(app: &App, username: &str) {
    app.users.write().await.network_op.pending();

    let result = app
        .api
        .get::<Vec<NetworkMember>>(&format!(
            "{}/network/{}",
            BASE_PATH,
            urlencoding::encode(username)
        ))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.users.write().await;
    match result {
        Ok(members) => {
            slice.network = Some(members.unwrap_or_default());
            slice.network_op.fulfilled();
        }
        Err(e) => {
            slice.network = Some(Vec::new());
            slice
                .network_op
                .rejected(e.message_or("failed to fetch referral network"));
        }
    }
}

/// PUT /users/admin/edit — admin edit of an arbitrary user.
pub async fn admin_edit_user(app: &App, user: &User) {
    app.users.write().await.admin_edit.pending();

    let result = app
        .api
        .put::<String, _>(&format!("{}/admin/edit", BASE_PATH), user)
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(_) => app.users.write().await.admin_edit.fulfilled(),
        Err(e) => app
            .users
            .write()
            .await
            .admin_edit
            .rejected(e.message_or("failed to edit user")),
    }
}

/// POST /users/request-license — ask to purchase a license tier.
pub async fn request_license_purchase(
    app: &App,
    crypto: CryptoKind,
    license_tier: &str,
    kind: RequestKind,
) {
    app.users.write().await.license_request.pending();

    let result = app
        .api
        .post_query::<String>(
            &format!("{}/request-license", BASE_PATH),
            &[
                ("crypto", crypto.as_str().to_string()),
                ("licenseTier", license_tier.to_string()),
                ("requestKind", kind.as_str().to_string()),
            ],
        )
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(_) => app.users.write().await.license_request.fulfilled(),
        Err(e) => app
            .users
            .write()
            .await
            .license_request
            .rejected(e.message_or("failed to request license purchase")),
    }
}

/// POST /users/request-withdrawal — ask to withdraw funds to an address.
pub async fn request_withdrawal(app: &App, wallet_address_id: u64, amount: f64, kind: RequestKind) {
    app.users.write().await.withdrawal_request.pending();

    let result = app
        .api
        .post_query::<String>(
            &format!("{}/request-withdrawal", BASE_PATH),
            &[
                ("walletAddressId", wallet_address_id.to_string()),
                ("amount", amount.to_string()),
                ("requestKind", kind.as_str().to_string()),
            ],
        )
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(_) => app.users.write().await.withdrawal_request.fulfilled(),
        Err(e) => app
            .users
            .write()
            .await
            .withdrawal_request
            .rejected(e.message_or("failed to request withdrawal")),
    }
}

/// POST /users/delegated-license — buy a license for another member.
pub async fn purchase_delegated_license(
    app: &App,
    license_tier: &str,
    recipient: &str,
    payment_method: PaymentMethod,
) {
    app.users.write().await.delegated_license.pending();

    let result = app
        .api
        .post_query::<String>(
            &format!("{}/delegated-license", BASE_PATH),
            &[
                ("licenseTier", license_tier.to_string()),
                ("recipient", recipient.to_string()),
                ("paymentMethod", payment_method.as_str().to_string()),
            ],
        )
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(_) => app.users.write().await.delegated_license.fulfilled(),
        Err(e) => app
            .users
            .write()
            .await
            .delegated_license
            .rejected(e.message_or("failed to purchase delegated license")),
    }
}

/// POST /users/transfer — move funds to another member's wallet.
pub async fn transfer_funds(app: &App, recipient: &str, amount: f64, wallet: WalletKind) {
    app.users.write().await.transfer.pending();

    let result = app
        .api
        .post_query::<String>(
            &format!("{}/transfer", BASE_PATH),
            &[
                ("recipient", recipient.to_string()),
                ("amount", amount.to_string()),
                ("wallet", wallet.as_str().to_string()),
            ],
        )
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(_) => app.users.write().await.transfer.fulfilled(),
        Err(e) => app
            .users
            .write()
            .await
            .transfer
            .rejected(e.message_or("transfer failed")),
    }
}

/// PUT /users/admin/approve-license/{id} — approve a pending purchase.
pub async fn approve_license(app: &App, request_id: u64) {
    app.users.write().await.approve_license.pending();

    let result = app
        .api
        .put_empty::<String>(&format!("{}/admin/approve-license/{}", BASE_PATH, request_id))
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(_) => app.users.write().await.approve_license.fulfilled(),
        Err(e) => app
            .users
            .write()
            .await
            .approve_license
            .rejected(e.message_or("failed to approve license purchase")),
    }
}

/// PUT /users/admin/reject-request/{id} — reject a pending request.
pub async fn reject_request(app: &App, request_id: u64) {
    app.users.write().await.reject_request.pending();

    let result = app
        .api
        .put_empty::<String>(&format!("{}/admin/reject-request/{}", BASE_PATH, request_id))
        .await
        .and_then(ApiResponse::into_result);

    match result {
        Ok(_) => app.users.write().await.reject_request.fulfilled(),
        Err(e) => app
            .users
            .write()
            .await
            .reject_request
            .rejected(e.message_or("failed to reject request")),
    }
}

/// GET /users/admin/pending-requests — pending account requests, paged.
pub async fn fetch_pending_requests(app: &App, page: u32, size: u32, sort: Option<&str>) {
    app.users.write().await.pending_requests_op.pending();

    let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
    if let Some(sort) = sort {
        query.push(("sort", sort.to_string()));
    }

    let result = app
        .api
        .get_query::<Page<AccountRequest>>(&format!("{}/admin/pending-requests", BASE_PATH), &query)
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.users.write().await;
    match result {
        Ok(requests) => {
            slice.pending_requests = requests;
            slice.pending_requests_op.fulfilled();
        }
        Err(e) => slice
            .pending_requests_op
            .rejected(e.message_or("failed to fetch pending requests")),
    }
}

/// GET /users — all users (admin explorer), paged with optional filter.
pub async fn fetch_users(app: &App, filter: Option<&str>, page: u32, size: u32, sort: Option<&str>) {
    app.users.write().await.users_op.pending();

    let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
    if let Some(filter) = filter {
        query.push(("filter", filter.to_string()));
    }
    if let Some(sort) = sort {
        query.push(("sort", sort.to_string()));
    }

    let result = app
        .api
        .get_query::<Page<User>>(BASE_PATH, &query)
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.users.write().await;
    match result {
        Ok(users) => {
            slice.users = users;
            slice.users_op.fulfilled();
        }
        Err(e) => slice.users_op.rejected(e.message_or("failed to fetch users")),
    }
}

/// GET /users/{id} — load one user into the admin detail selection.
pub async fn fetch_user_by_id(app: &App, user_id: u64) {
    app.users.write().await.selected_user_op.pending();

    let result = app
        .api
        .get::<User>(&format!("{}/{}", BASE_PATH, user_id))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.users.write().await;
    match result {
        Ok(user) => {
            slice.selected_user = user;
            slice.selected_user_op.fulfilled();
        }
        Err(e) => slice
            .selected_user_op
            .rejected(e.message_or("failed to fetch user")),
    }
}

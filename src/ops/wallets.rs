//! Withdrawal-address CRUD and listing (own vs. by-user).

use crate::api::envelope::ApiResponse;
use crate::api::types::{WalletAddress, WalletAddressRequest};
use crate::app::App;
use crate::state::op;

const BASE_PATH: &str = "/wallet-addresses";

/// POST /wallet-addresses — register a new withdrawal address.
pub async fn create_address(app: &App, request: WalletAddressRequest) {
    app.wallets.write().await.create.pending();

    let result = app
        .api
        .post::<WalletAddress, _>(BASE_PATH, &request)
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.wallets.write().await;
    match result {
        Ok(address) => {
            if let Some(address) = address {
                slice.address_created(address);
            }
            slice.create.fulfilled();
        }
        Err(e) => slice
            .create
            .rejected(e.message_or("failed to create wallet address")),
    }
}

/// GET /wallet-addresses/{id} — load one address into the selection.
pub async fn fetch_address(app: &App, address_id: u64) {
    app.wallets.write().await.fetch_by_id.pending();

    let result = app
        .api
        .get::<WalletAddress>(&format!("{}/{}", BASE_PATH, address_id))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.wallets.write().await;
    match result {
        Ok(address) => {
            slice.selected_address = address;
            slice.fetch_by_id.fulfilled();
        }
        Err(e) => slice
            .fetch_by_id
            .rejected(e.message_or("failed to fetch wallet address")),
    }
}

/// PUT /wallet-addresses/{id} — update an address in place.
pub async fn update_address(app: &App, address_id: u64, request: WalletAddressRequest) {
    app.wallets.write().await.update.pending();

    let result = app
        .api
        .put::<WalletAddress, _>(&format!("{}/{}", BASE_PATH, address_id), &request)
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.wallets.write().await;
    match result {
        Ok(address) => {
            if let Some(ref address) = address {
                slice.address_updated(address);
            }
            slice.update.fulfilled();
        }
        Err(e) => slice
            .update
            .rejected(e.message_or("failed to update wallet address")),
    }
}

/// DELETE /wallet-addresses/{id} — remove an address.
///
/// The id from the request parameters drives the removal; delete responses
/// carry no body.
pub async fn delete_address(app: &App, address_id: u64) {
    app.wallets.write().await.delete.pending();

    let result = app
        .api
        .delete::<String>(&format!("{}/{}", BASE_PATH, address_id))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.wallets.write().await;
    match result {
        Ok(_) => {
            slice.address_deleted(address_id);
            slice.delete.fulfilled();
        }
        Err(e) => slice
            .delete
            .rejected(e.message_or("failed to delete wallet address")),
    }
}

/// GET /wallet-addresses/mine — the caller's registered addresses.
pub async fn fetch_my_addresses(app: &App) {
    app.wallets.write().await.my_addresses.pending();

    let result = app
        .api
        .get::<Vec<WalletAddress>>(&format!("{}/mine", BASE_PATH))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.wallets.write().await;
    match result {
        Ok(addresses) => {
            op::replace(&mut slice.addresses, addresses.unwrap_or_default());
            slice.my_addresses.fulfilled();
        }
        Err(e) => slice
            .my_addresses
            .rejected(e.message_or("failed to fetch wallet addresses")),
    }
}

/// GET /wallet-addresses/user/{userId} — another member's addresses (admin).
pub async fn fetch_addresses_by_user(app: &App, user_id: u64) {
    app.wallets.write().await.by_user.pending();

    let result = app
        .api
        .get::<Vec<WalletAddress>>(&format!("{}/user/{}", BASE_PATH, user_id))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.wallets.write().await;
    match result {
        Ok(addresses) => {
            op::replace(&mut slice.addresses, addresses.unwrap_or_default());
            slice.by_user.fulfilled();
        }
        Err(e) => slice
            .by_user
            .rejected(e.message_or("failed to fetch the user's wallet addresses")),
    }
}

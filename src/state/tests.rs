//! Scenario tests for the merge policies and slice lifecycles.

use crate::api::envelope::{Page, PageInfo};
use crate::api::types::{
    CryptoKind, KycFile, KycFileKind, OperationStatus, Transaction, TransactionConcept,
    WalletAddress,
};
use crate::state::op;
use crate::state::{KycSlice, TransactionsSlice, UserSlice, WalletSlice};

// ── Helpers ──────────────────────────────────────────────────────────────

fn kyc_file(id: u64, status: OperationStatus) -> KycFile {
    KycFile {
        id,
        file_name: format!("document-{}.jpg", id),
        file_type: KycFileKind::IdentityDocument,
        file_size: Some(1024),
        uploaded_at: None,
        verified_at: None,
        status,
        rejection_reason: None,
        rejection_comment: None,
        user: None,
    }
}

fn address(id: u64, label: &str) -> WalletAddress {
    WalletAddress {
        id,
        address: format!("addr-{}", id),
        crypto: CryptoKind::Bitcoin,
        label: label.to_string(),
        withdrawn_balance: 0.0,
        user: None,
    }
}

fn transaction(id: u64) -> Transaction {
    Transaction {
        id,
        concept: TransactionConcept::UnilevelBonus,
        status: OperationStatus::Completed,
        amount: 10.0,
        occurred_at: None,
        crypto: None,
        payment_method: None,
        description: None,
        user: None,
    }
}

// ── Merge policies ───────────────────────────────────────────────────────

#[test]
fn test_create_then_list_refresh_yields_no_duplicate() {
    let mut slice = WalletSlice::default();

    // Creation arrives first; the list refresh then delivers the same id.
    slice.address_created(address(5, "A"));
    op::replace(
        &mut slice.addresses,
        vec![address(5, "A"), address(9, "B")],
    );
    assert_eq!(slice.addresses.iter().filter(|a| a.id == 5).count(), 1);

    // And in the other order: the refresh lands before the create echo.
    let mut slice = WalletSlice::default();
    op::replace(
        &mut slice.addresses,
        vec![address(5, "A"), address(9, "B")],
    );
    slice.address_created(address(5, "A"));
    assert_eq!(slice.addresses.iter().filter(|a| a.id == 5).count(), 1);
    assert_eq!(slice.addresses.len(), 2);
}

#[test]
fn test_created_address_is_prepended() {
    let mut slice = WalletSlice::default();
    op::replace(&mut slice.addresses, vec![address(1, "old")]);

    slice.address_created(address(2, "new"));

    assert_eq!(slice.addresses[0].id, 2);
    assert_eq!(slice.addresses[1].id, 1);
}

#[test]
fn test_update_by_id_replaces_copy_and_selection() {
    let mut slice = KycSlice::default();
    op::replace(
        &mut slice.my_files,
        vec![
            kyc_file(1, OperationStatus::Pending),
            kyc_file(2, OperationStatus::Pending),
        ],
    );
    slice.select_file(kyc_file(1, OperationStatus::Pending));

    slice.file_evaluated(&kyc_file(1, OperationStatus::Approved));

    assert_eq!(slice.my_files[0].status, OperationStatus::Approved);
    assert_eq!(slice.my_files[1].status, OperationStatus::Pending);
    assert_eq!(
        slice.selected_file.as_ref().map(|f| f.status),
        Some(OperationStatus::Approved)
    );
}

#[test]
fn test_update_with_unknown_id_changes_nothing() {
    let mut slice = KycSlice::default();
    op::replace(
        &mut slice.my_files,
        vec![
            kyc_file(1, OperationStatus::Pending),
            kyc_file(2, OperationStatus::Pending),
        ],
    );
    slice.select_file(kyc_file(1, OperationStatus::Pending));

    // Id 3 was never loaded: the update is dropped, not inserted.
    slice.file_evaluated(&kyc_file(3, OperationStatus::Approved));

    assert_eq!(slice.my_files.len(), 2);
    assert!(slice.my_files.iter().all(|f| f.status == OperationStatus::Pending));
    assert_eq!(
        slice.selected_file.as_ref().map(|f| f.status),
        Some(OperationStatus::Pending)
    );
}

#[test]
fn test_evaluation_updates_both_collections() {
    let mut slice = KycSlice::default();
    op::replace(&mut slice.my_files, vec![kyc_file(4, OperationStatus::Pending)]);
    op::replace(
        &mut slice.pending_files,
        vec![kyc_file(4, OperationStatus::Pending)],
    );

    slice.file_evaluated(&kyc_file(4, OperationStatus::Rejected));

    assert_eq!(slice.my_files[0].status, OperationStatus::Rejected);
    assert_eq!(slice.pending_files[0].status, OperationStatus::Rejected);
}

#[test]
fn test_remove_uses_the_request_id() {
    let mut slice = WalletSlice::default();
    op::replace(&mut slice.addresses, vec![address(7, "A"), address(9, "B")]);
    slice.select_address(address(7, "A"));

    // Delete responses carry no body; the id comes from the request.
    slice.address_deleted(7);

    assert_eq!(slice.addresses.len(), 1);
    assert_eq!(slice.addresses[0].id, 9);
    assert!(slice.selected_address.is_none());
}

#[test]
fn test_remove_of_unselected_entity_keeps_selection() {
    let mut slice = KycSlice::default();
    op::replace(
        &mut slice.my_files,
        vec![
            kyc_file(7, OperationStatus::Pending),
            kyc_file(9, OperationStatus::Pending),
        ],
    );
    slice.select_file(kyc_file(9, OperationStatus::Pending));

    slice.file_deleted(7);

    assert_eq!(slice.my_files.len(), 1);
    assert_eq!(slice.selected_file.as_ref().map(|f| f.id), Some(9));
}

// ── Operation record isolation ───────────────────────────────────────────

#[test]
fn test_records_on_one_slice_are_independent() {
    let mut slice = KycSlice::default();

    slice.upload.pending();
    slice.my_files_op.pending();
    slice.upload.rejected("upload failed");

    // The upload failure leaves the unrelated listing untouched.
    assert!(slice.my_files_op.is_loading());
    assert!(slice.my_files_op.error().is_none());
    assert_eq!(slice.upload.error(), Some("upload failed"));
}

#[test]
fn test_rejected_listing_keeps_previous_data() {
    let mut slice = KycSlice::default();
    op::replace(&mut slice.my_files, vec![kyc_file(1, OperationStatus::Pending)]);

    // A failed refresh must not discard previously loaded content.
    slice.my_files_op.pending();
    slice.my_files_op.rejected("timed out");

    assert_eq!(slice.my_files.len(), 1);
    assert_eq!(slice.my_files_op.error(), Some("timed out"));
}

#[test]
fn test_clear_errors_spares_in_flight_operations() {
    let mut slice = KycSlice::default();
    slice.upload.rejected("upload failed");
    slice.evaluate.pending();

    slice.clear_errors();

    assert!(slice.upload.error().is_none());
    assert!(slice.evaluate.is_loading());
}

// ── Slice lifecycle ──────────────────────────────────────────────────────

#[test]
fn test_transactions_page_replaces_wholesale() {
    let mut slice = TransactionsSlice::default();
    slice.page_loaded(Page {
        content: vec![transaction(1), transaction(2)],
        page: PageInfo {
            total_elements: 12,
            total_pages: 6,
            size: 2,
            number: 0,
        },
    });

    slice.page_loaded(Page {
        content: vec![transaction(3)],
        page: PageInfo {
            total_elements: 12,
            total_pages: 6,
            size: 2,
            number: 5,
        },
    });

    assert_eq!(slice.transactions.len(), 1);
    assert_eq!(slice.transactions[0].id, 3);
    assert_eq!(slice.current_page, 5);
    assert_eq!(slice.total_elements, 12);
}

#[test]
fn test_clear_resets_session_bound_data() {
    let mut users = UserSlice::default();
    users.network = Some(Vec::new());
    users.edit_profile.rejected("boom");

    users.clear();

    assert!(users.network.is_none());
    assert!(users.edit_profile.error().is_none());
}

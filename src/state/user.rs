//! Member/account state: the caller's profile, admin listings, and the
//! operation records for every account-level action.

use crate::api::envelope::Page;
use crate::api::types::{AccountRequest, NetworkMember, User};

use super::op::OpState;

#[derive(Default)]
pub struct UserSlice {
    /// The authenticated member's full profile, once loaded.
    pub profile: Option<User>,

    pub edit_profile: OpState,
    pub two_step_verification: OpState,
    pub admin_edit: OpState,
    pub license_request: OpState,
    pub withdrawal_request: OpState,
    pub delegated_license: OpState,
    pub transfer: OpState,
    pub approve_license: OpState,
    pub reject_request: OpState,

    /// Pending account requests (admin view), paged.
    pub pending_requests: Option<Page<AccountRequest>>,
    pub pending_requests_op: OpState,

    /// All users (admin explorer), paged.
    pub users: Option<Page<User>>,
    pub users_op: OpState,

    /// User opened in the admin detail view.
    pub selected_user: Option<User>,
    pub selected_user_op: OpState,

    /// The caller's referral network.
    pub network: Option<Vec<NetworkMember>>,
    pub network_op: OpState,
}

impl UserSlice {
    /// Drop everything tied to the session (logout).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

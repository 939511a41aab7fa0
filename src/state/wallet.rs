//! Withdrawal-address state: the loaded address collection, the current
//! selection, and one operation record per CRUD action.

use crate::api::types::WalletAddress;

use super::op::{self, OpState};

#[derive(Default)]
pub struct WalletSlice {
    pub addresses: Vec<WalletAddress>,
    pub selected_address: Option<WalletAddress>,

    pub create: OpState,
    pub fetch_by_id: OpState,
    pub update: OpState,
    pub delete: OpState,
    pub my_addresses: OpState,
    pub by_user: OpState,
}

impl WalletSlice {
    pub fn select_address(&mut self, address: WalletAddress) {
        self.selected_address = Some(address);
    }

    pub fn clear_selected_address(&mut self) {
        self.selected_address = None;
    }

    /// Prepend a freshly created address unless a list refresh already
    /// delivered it.
    pub fn address_created(&mut self, address: WalletAddress) {
        op::prepend_unique(&mut self.addresses, address);
    }

    /// Replace every loaded copy of an updated address. An address that was
    /// never loaded is not inserted.
    pub fn address_updated(&mut self, address: &WalletAddress) {
        op::update_in(&mut self.addresses, address);
        op::update_selection(&mut self.selected_address, address);
    }

    /// Drop a deleted address, keyed by the request id (delete responses
    /// carry no body).
    pub fn address_deleted(&mut self, id: u64) {
        op::remove_in(&mut self.addresses, id);
        op::clear_selection_if(&mut self.selected_address, id);
    }

    /// Drop everything tied to the session (logout).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

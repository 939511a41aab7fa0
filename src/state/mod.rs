//! Per-domain state slices and the operation-state tracker they share.
//!
//! Each slice owns independent operation records plus the collections and
//! selection slots its domain loads. Slices never reference each other;
//! concurrent operations only contend on their own slice's lock.

pub mod auth;
pub mod kyc;
pub mod op;
pub mod transactions;
pub mod user;
pub mod wallet;

#[cfg(test)]
mod tests;

pub use auth::AuthSlice;
pub use kyc::KycSlice;
pub use op::{Keyed, OpState};
pub use transactions::TransactionsSlice;
pub use user::UserSlice;
pub use wallet::WalletSlice;

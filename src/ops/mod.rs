//! Domain operation catalog.
//!
//! One async fn per remote procedure. Every operation drives its record
//! through pending → fulfilled/rejected on the owning slice; dispatcher
//! errors are always converted into rejected transitions, never allowed to
//! escape to the caller. Slice locks are released before the network call
//! and re-acquired for the terminal transition.

pub mod auth;
pub mod kyc;
pub mod transactions;
pub mod users;
pub mod wallets;

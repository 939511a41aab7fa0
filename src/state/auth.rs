//! Authentication operation records.
//!
//! The credential itself lives in [`crate::session::Session`]; this slice
//! only tracks the lifecycles of the two operations that can produce one.

use super::op::OpState;

#[derive(Debug, Default)]
pub struct AuthSlice {
    pub login: OpState,
    pub registration: OpState,
}

impl AuthSlice {
    /// Reset both records (logout).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

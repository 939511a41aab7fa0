//! Operation-state tracker primitives.
//!
//! Every named asynchronous action owns one [`OpState`]: an isolated
//! `{loading, error}` pair driven through exactly one `pending` and one
//! terminal transition per operation instance. Records never share flags,
//! so concurrent unrelated operations cannot disturb each other's UI state.
//!
//! The merge helpers implement the four policies a fulfilled result can
//! apply to in-memory collections: replace wholesale, prepend-one (guarded
//! against duplicates), update-by-id (existing copies only), and
//! remove-by-id (keyed by the original request, since delete responses may
//! carry no body).

/// Entities the tracker can locate in collections and selection slots.
pub trait Keyed {
    fn key(&self) -> u64;
}

/// Per-operation `{loading, error}` record.
///
/// Invariant: `loading` and a present `error` are mutually exclusive —
/// entering `pending` always clears the previous failure, so a retried
/// operation never shows a stale error while in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpState {
    loading: bool,
    error: Option<String>,
}

impl OpState {
    /// The operation was dispatched.
    pub fn pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// The operation completed successfully.
    pub fn fulfilled(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// The operation failed with a human-readable message.
    pub fn rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Drop a recorded failure without touching the loading flag.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

// ── Merge policies ───────────────────────────────────────────────────────

/// Replace-collection: the new data wins wholesale.
pub fn replace<T>(collection: &mut Vec<T>, items: Vec<T>) {
    *collection = items;
}

/// Prepend-one: insert at the front unless an entity with the same key is
/// already present (the creation may also arrive via a later list refresh).
pub fn prepend_unique<T: Keyed>(collection: &mut Vec<T>, item: T) {
    if !collection.iter().any(|e| e.key() == item.key()) {
        collection.insert(0, item);
    }
}

/// Update-by-id within one collection. An entity that is not present is
/// left alone — list membership belongs to explicit list operations.
/// Returns whether a copy was replaced.
pub fn update_in<T: Keyed + Clone>(collection: &mut Vec<T>, item: &T) -> bool {
    match collection.iter_mut().find(|e| e.key() == item.key()) {
        Some(slot) => {
            *slot = item.clone();
            true
        }
        None => false,
    }
}

/// Refresh a selection slot when it holds a copy of the updated entity.
pub fn update_selection<T: Keyed + Clone>(selection: &mut Option<T>, item: &T) {
    if selection.as_ref().is_some_and(|s| s.key() == item.key()) {
        *selection = Some(item.clone());
    }
}

/// Remove-by-id within one collection, keyed by the original request id.
pub fn remove_in<T: Keyed>(collection: &mut Vec<T>, key: u64) {
    collection.retain(|e| e.key() != key);
}

/// Clear a selection slot when it points at the removed entity.
pub fn clear_selection_if<T: Keyed>(selection: &mut Option<T>, key: u64) {
    if selection.as_ref().is_some_and(|s| s.key() == key) {
        *selection = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_is_exactly_the_open_interval() {
        let mut op = OpState::default();
        assert!(!op.is_loading());

        op.pending();
        assert!(op.is_loading());
        assert!(op.error().is_none());

        op.fulfilled();
        assert!(!op.is_loading());
        assert!(op.error().is_none());
    }

    #[test]
    fn test_rejected_sets_error_and_stops_loading() {
        let mut op = OpState::default();
        op.pending();
        op.rejected("network unreachable");

        assert!(!op.is_loading());
        assert_eq!(op.error(), Some("network unreachable"));
    }

    #[test]
    fn test_retry_clears_stale_error_while_in_flight() {
        let mut op = OpState::default();
        op.pending();
        op.rejected("first failure");

        op.pending();
        assert!(op.is_loading());
        assert!(op.error().is_none());

        op.fulfilled();
        assert!(op.error().is_none());
    }
}

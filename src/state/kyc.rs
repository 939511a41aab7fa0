//! KYC document state: the member's own uploads, the admin review queue,
//! and one operation record per document action.

use crate::api::types::KycFile;

use super::op::{self, OpState};

#[derive(Default)]
pub struct KycSlice {
    /// The member's own uploaded documents, most recent first.
    pub my_files: Vec<KycFile>,
    pub my_files_op: OpState,

    /// Documents awaiting review (admin view).
    pub pending_files: Vec<KycFile>,
    pub pending_files_op: OpState,

    pub upload: OpState,
    pub delete: OpState,
    pub evaluate: OpState,
    pub download: OpState,

    /// Document currently opened in a viewer or review dialog.
    pub selected_file: Option<KycFile>,
}

impl KycSlice {
    pub fn select_file(&mut self, file: KycFile) {
        self.selected_file = Some(file);
    }

    pub fn clear_selected_file(&mut self) {
        self.selected_file = None;
    }

    /// Reset every error without touching loaded data or in-flight flags.
    pub fn clear_errors(&mut self) {
        for op in [
            &mut self.my_files_op,
            &mut self.pending_files_op,
            &mut self.upload,
            &mut self.delete,
            &mut self.evaluate,
            &mut self.download,
        ] {
            op.clear_error();
        }
    }

    /// Prepend a freshly uploaded document to the member's list.
    pub fn file_uploaded(&mut self, file: KycFile) {
        op::prepend_unique(&mut self.my_files, file);
    }

    /// Apply a review verdict to every copy of the document.
    pub fn file_evaluated(&mut self, file: &KycFile) {
        op::update_in(&mut self.my_files, file);
        op::update_in(&mut self.pending_files, file);
        op::update_selection(&mut self.selected_file, file);
    }

    /// Drop a deleted document everywhere, keyed by the request id.
    pub fn file_deleted(&mut self, id: u64) {
        op::remove_in(&mut self.my_files, id);
        op::remove_in(&mut self.pending_files, id);
        op::clear_selection_if(&mut self.selected_file, id);
    }

    /// Drop everything tied to the session (logout).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

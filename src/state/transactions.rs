//! Transaction-history state: the current result page and the
//! earnings-by-month summary.

use crate::api::envelope::Page;
use crate::api::types::{MonthlyEarnings, Transaction};

use super::op::OpState;

#[derive(Default)]
pub struct TransactionsSlice {
    pub transactions: Vec<Transaction>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub fetch: OpState,

    pub earnings: Option<Vec<MonthlyEarnings>>,
    pub earnings_op: OpState,
}

impl TransactionsSlice {
    /// Install one result page, replacing the previous one wholesale.
    pub fn page_loaded(&mut self, page: Page<Transaction>) {
        self.transactions = page.content;
        self.current_page = page.page.number;
        self.total_pages = page.page.total_pages;
        self.total_elements = page.page.total_elements;
    }

    /// Drop everything tied to the session (logout).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

//! Transaction history: paged listing, criteria filtering, and the
//! earnings-by-month summary.

use crate::api::envelope::{ApiResponse, Page};
use crate::api::types::{MonthlyEarnings, Transaction, TransactionFilter};
use crate::app::App;

const BASE_PATH: &str = "/transactions";

/// GET /transactions — one page of the caller's history.
pub async fn list_transactions(app: &App, page: u32, size: u32) {
    let filter = TransactionFilter {
        page: Some(page),
        size: Some(size),
        ..Default::default()
    };
    fetch_page(app, BASE_PATH, &filter).await;
}

/// GET /transactions/filter — one page matching the given criteria.
pub async fn filter_transactions(app: &App, filter: &TransactionFilter) {
    fetch_page(app, &format!("{}/filter", BASE_PATH), filter).await;
}

async fn fetch_page(app: &App, path: &str, filter: &TransactionFilter) {
    app.transactions.write().await.fetch.pending();

    let result = app
        .api
        .get_query::<Page<Transaction>>(path, &filter.query_pairs())
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.transactions.write().await;
    match result {
        Ok(Some(page)) => {
            slice.page_loaded(page);
            slice.fetch.fulfilled();
        }
        Ok(None) => slice.fetch.fulfilled(),
        Err(e) => slice
            .fetch
            .rejected(e.message_or("failed to fetch transactions")),
    }
}

/// GET /transactions/earnings-by-month — aggregated earnings per month.
pub async fn fetch_earnings_by_month(app: &App) {
    app.transactions.write().await.earnings_op.pending();

    let result = app
        .api
        .get::<Vec<MonthlyEarnings>>(&format!("{}/earnings-by-month", BASE_PATH))
        .await
        .and_then(ApiResponse::into_result);

    let mut slice = app.transactions.write().await;
    match result {
        Ok(earnings) => {
            slice.earnings = Some(earnings.unwrap_or_default());
            slice.earnings_op.fulfilled();
        }
        Err(e) => slice
            .earnings_op
            .rejected(e.message_or("failed to fetch monthly earnings")),
    }
}

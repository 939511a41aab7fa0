//! Client-side API layer for the Meridian platform.
//!
//! Wraps the remote HTTP API behind an authenticated request pipeline:
//! credentials are attached to every outgoing call, authentication failures
//! invalidate the session everywhere at once, and every domain operation
//! exposes its own `{loading, error, data}` lifecycle so concurrent
//! operations never disturb each other's UI state.
//!
//! Typical embedding:
//!
//! ```no_run
//! use meridian_client::{ApiConfig, App};
//!
//! # async fn run() {
//! let app = App::new(ApiConfig::from_env());
//! app.initialize().await; // restore a persisted session, if any
//!
//! meridian_client::ops::wallets::fetch_my_addresses(&app).await;
//! let wallets = app.wallets.read().await;
//! if let Some(error) = wallets.my_addresses.error() {
//!     eprintln!("could not load addresses: {error}");
//! }
//! # }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod ops;
pub mod session;
pub mod state;
pub mod storage;

pub use api::{ApiClient, ApiError, ApiResponse, FilePayload, Page, UploadProgress};
pub use app::App;
pub use config::ApiConfig;
pub use session::Session;
pub use storage::CredentialStore;

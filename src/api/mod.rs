//! API layer: request dispatcher, wire envelope, error taxonomy, and the
//! request/response types of the Meridian backend.

pub mod client;
pub mod envelope;
pub mod error;
pub mod types;

pub use client::{ApiClient, FilePayload, ProgressCallback};
pub use envelope::{ApiResponse, Page, PageInfo, UploadProgress};
pub use error::ApiError;

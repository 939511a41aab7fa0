//! Wire envelope and progress types shared by every API call.
//!
//! The backend wraps every application-level response in
//! `{ success, message, data }`. A `success = false` envelope is a domain
//! failure even when it arrives on HTTP 2xx.

use serde::Deserialize;

use super::error::ApiError;

/// The `{success, message, data}` wrapper around every response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Absent on operations that return no payload (e.g. deletes).
    #[serde(default = "none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope: `success = false` becomes a domain failure
    /// carrying the server's message.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Server {
                status: None,
                message: self.message,
            })
        }
    }
}

/// One page of a paged listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageInfo,
}

/// Paging metadata attached to a [`Page`].
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
}

/// A single upload progress report, recomputed from the raw byte counters
/// on every transmitted chunk.
///
/// `total` is unknown for streamed payloads, in which case `progress` is
/// also absent and `length_computable` is false.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadProgress {
    /// Bytes handed to the transport so far.
    pub loaded: u64,
    /// Full payload size, when known up front.
    pub total: Option<u64>,
    /// Percentage in `0..=100`, only when `total` is known and non-zero.
    pub progress: Option<f64>,
    /// Whether `total` was known when this report was produced.
    pub length_computable: bool,
}

impl UploadProgress {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        let progress = total
            .filter(|t| *t > 0)
            .map(|t| (loaded as f64 / t as f64) * 100.0);
        Self {
            loaded,
            total,
            progress,
            length_computable: total.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_with_missing_data() {
        let raw = r#"{"success":true,"message":"deleted"}"#;
        let envelope: ApiResponse<String> = serde_json::from_str(raw).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message, "deleted");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_failure_envelope_becomes_domain_error() {
        let raw = r#"{"success":false,"message":"insufficient balance","data":null}"#;
        let envelope: ApiResponse<String> = serde_json::from_str(raw).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.to_string(), "insufficient balance");
    }

    #[test]
    fn test_success_envelope_yields_data() {
        let raw = r#"{"success":true,"message":"","data":"ok"}"#;
        let envelope: ApiResponse<String> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.into_result().unwrap(), Some("ok".to_string()));
    }

    #[test]
    fn test_progress_with_known_total() {
        let report = UploadProgress::new(512, Some(2048));
        assert_eq!(report.progress, Some(25.0));
        assert!(report.length_computable);
    }

    #[test]
    fn test_progress_with_unknown_total() {
        let report = UploadProgress::new(512, None);
        assert_eq!(report.progress, None);
        assert!(!report.length_computable);
        assert_eq!(report.loaded, 512);
    }
}

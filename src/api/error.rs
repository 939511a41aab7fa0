//! Error taxonomy for the request pipeline.
//!
//! Every failure a dispatcher call can produce is normalized into one of
//! these variants. The preference order for the human-readable text is:
//! server-supplied message, then the transport library's message, then a
//! caller-supplied fallback specific to the operation (`message_or`).

use thiserror::Error;

/// Normalized failure raised by [`crate::api::ApiClient`] calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response was received: connection refused, DNS, TLS, timeout.
    #[error("{0}")]
    Transport(String),

    /// The server answered with a failure: a non-2xx status, or a 2xx
    /// envelope carrying `success = false`.
    #[error("{message}")]
    Server {
        /// HTTP status, when the failure came with one.
        status: Option<u16>,
        /// Best available message (envelope message, raw body, or status line).
        message: String,
    },

    /// 401 from the server. The session has already been invalidated by the
    /// time this is raised; callers only need to route the user to login.
    #[error("{message}")]
    Unauthorized {
        /// Server-supplied message when one was present.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Transport-failure constructor from a reqwest error.
    pub fn transport(err: &reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }

    /// The normalized message, or `fallback` when nothing useful survived
    /// normalization (e.g. an empty body on a 500).
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }

    /// Whether this failure was an authentication rejection.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_preferred() {
        let err = ApiError::Server {
            status: Some(409),
            message: "username already taken".to_string(),
        };
        assert_eq!(err.message_or("registration failed"), "username already taken");
    }

    #[test]
    fn test_fallback_applies_to_empty_message() {
        let err = ApiError::Server {
            status: Some(500),
            message: String::new(),
        };
        assert_eq!(err.message_or("registration failed"), "registration failed");
    }

    #[test]
    fn test_unauthorized_is_flagged() {
        let err = ApiError::Unauthorized {
            message: "token expired".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.message_or("x"), "token expired");
    }
}

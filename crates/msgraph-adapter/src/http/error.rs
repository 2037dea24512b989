/*
[INPUT]:  Error sources (HTTP, OData envelopes, serialization, auth, templates)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

use crate::types::ODataError;

/// Main error type for the Graph adapter
#[derive(Error, Debug)]
pub enum GraphError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Graph returned its standard error envelope
    #[error("Graph API error (status {status}): {error}")]
    OData {
        status: u16,
        retry_after: Option<u64>,
        error: Box<ODataError>,
    },

    /// API returned an error response that is not an OData envelope
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Token acquisition failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// URL template could not be expanded
    #[error("Invalid URL template: {0}")]
    UrlTemplate(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timeout
    #[error("Request timed out after {duration}s")]
    Timeout { duration: u64 },
}

impl GraphError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GraphError::OData { status, .. } | GraphError::Api { status, .. } => Some(*status),
            GraphError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// OData error code such as `Request_ResourceNotFound`
    pub fn odata_code(&self) -> Option<&str> {
        match self {
            GraphError::OData { error, .. } => error.error.code.as_deref(),
            _ => None,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            GraphError::Http(_) | GraphError::Timeout { .. } => true,
            GraphError::OData { status, .. } | GraphError::Api { status, .. } => {
                matches!(status, 429 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            GraphError::OData {
                retry_after: Some(seconds),
                ..
            } => Some(*seconds),
            GraphError::Timeout { .. } => Some(1),
            _ => None,
        }
    }

    /// Check if error indicates authentication or authorization failure
    pub fn is_auth_error(&self) -> bool {
        match self {
            GraphError::Authentication { .. } => true,
            _ => matches!(self.status(), Some(401 | 403)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result type alias for Graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MainError;

    fn odata(status: u16, code: &str, retry_after: Option<u64>) -> GraphError {
        GraphError::OData {
            status,
            retry_after,
            error: Box::new(ODataError {
                error: MainError {
                    code: Some(code.to_string()),
                    message: Some("message".to_string()),
                    ..Default::default()
                },
            }),
        }
    }

    #[test]
    fn test_error_retryable() {
        let throttled = odata(429, "TooManyRequests", Some(7));
        assert!(throttled.is_retryable());
        assert_eq!(throttled.retry_delay(), Some(7));

        let timeout_err = GraphError::Timeout { duration: 30 };
        assert!(timeout_err.is_retryable());
        assert_eq!(timeout_err.retry_delay(), Some(1));

        assert!(!odata(404, "Request_ResourceNotFound", None).is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(odata(401, "InvalidAuthenticationToken", None).is_auth_error());
        assert!(GraphError::Api { status: 403, message: "denied".to_string() }.is_auth_error());
        assert!(GraphError::Authentication { message: "bad secret".to_string() }.is_auth_error());
        assert!(!GraphError::Timeout { duration: 30 }.is_auth_error());
    }

    #[test]
    fn test_odata_display_and_code() {
        let err = odata(404, "Request_ResourceNotFound", None);
        assert_eq!(err.odata_code(), Some("Request_ResourceNotFound"));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Graph API error (status 404): Request_ResourceNotFound: message"
        );
    }
}

/*
[INPUT]:  Graph error response bodies
[OUTPUT]: Typed OData error envelope
[POS]:    Data layer - error payload definitions
[UPDATE]: When the error envelope gains fields
*/

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// `{"error": {...}}` envelope returned for every failed Graph call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ODataError {
    pub error: MainError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_error: Option<InnerError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Diagnostic identifiers attached by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InnerError {
    #[serde(rename = "client-request-id", default, skip_serializing_if = "Option::is_none")]
    pub client_request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "request-id", default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(flatten)]
    pub additional_data: HashMap<String, serde_json::Value>,
}

impl fmt::Display for ODataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.error.code.as_deref().unwrap_or("UnknownError");
        match self.error.message.as_deref() {
            Some(message) => write!(f, "{code}: {message}"),
            None => f.write_str(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_envelope() {
        let body = r#"{
            "error": {
                "code": "Authorization_RequestDenied",
                "message": "Insufficient privileges to complete the operation.",
                "details": [{"code": "Forbidden", "message": "denied", "target": "user"}],
                "innerError": {
                    "date": "2024-05-01T10:00:00",
                    "request-id": "11111111-2222-3333-4444-555555555555",
                    "client-request-id": "66666666-7777-8888-9999-000000000000"
                }
            }
        }"#;

        let error: ODataError = serde_json::from_str(body).unwrap();
        assert_eq!(error.error.code.as_deref(), Some("Authorization_RequestDenied"));
        assert_eq!(error.error.details.len(), 1);

        let inner = error.error.inner_error.as_ref().unwrap();
        assert_eq!(
            inner.request_id.as_deref(),
            Some("11111111-2222-3333-4444-555555555555")
        );
        assert!(inner.additional_data.is_empty());
        assert_eq!(
            error.to_string(),
            "Authorization_RequestDenied: Insufficient privileges to complete the operation."
        );
    }

    #[test]
    fn test_display_without_message() {
        let error = ODataError::default();
        assert_eq!(error.to_string(), "UnknownError");
    }
}

/*
[INPUT]:  Non-2xx status codes, response bodies and Retry-After hints
[OUTPUT]: Typed GraphError values chosen by status pattern
[POS]:    Request layer - status-code-to-error mapping
[UPDATE]: When endpoints need status-specific error types
*/

use std::collections::HashMap;
use std::fmt;

use crate::http::GraphError;
use crate::types::ODataError;

/// Failed response handed to an error factory
#[derive(Debug, Clone)]
pub struct ErrorContext<'a> {
    pub status: u16,
    pub retry_after: Option<u64>,
    pub body: &'a [u8],
}

pub type ErrorFactory = fn(&ErrorContext<'_>) -> GraphError;

/// Status pattern to error factory table.
///
/// Patterns are exact codes (`"404"`), classes (`"4XX"`, `"5XX"`) or the
/// wildcard `"XXX"`; the most specific match wins.
#[derive(Clone, Default)]
pub struct ErrorMappings {
    entries: HashMap<String, ErrorFactory>,
}

impl fmt::Debug for ErrorMappings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("ErrorMappings").field("patterns", &keys).finish()
    }
}

impl ErrorMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapping every Graph builder uses: any failure decodes the OData
    /// error envelope.
    pub fn odata() -> Self {
        Self::new().with("XXX", odata_error_factory)
    }

    pub fn with(mut self, pattern: &str, factory: ErrorFactory) -> Self {
        self.entries.insert(pattern.to_ascii_uppercase(), factory);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, status: u16) -> Option<ErrorFactory> {
        let exact = status.to_string();
        let class = match status {
            400..=499 => Some("4XX"),
            500..=599 => Some("5XX"),
            _ => None,
        };

        self.entries
            .get(&exact)
            .or_else(|| class.and_then(|class| self.entries.get(class)))
            .or_else(|| self.entries.get("XXX"))
            .copied()
    }

    /// Build the error for a failed response
    pub fn resolve(&self, context: &ErrorContext<'_>) -> GraphError {
        match self.lookup(context.status) {
            Some(factory) => factory(context),
            None => GraphError::Api {
                status: context.status,
                message: body_text(context.body),
            },
        }
    }
}

/// Decode the Graph error envelope, falling back to the raw body
pub fn odata_error_factory(context: &ErrorContext<'_>) -> GraphError {
    match serde_json::from_slice::<ODataError>(context.body) {
        Ok(error) => GraphError::OData {
            status: context.status,
            retry_after: context.retry_after,
            error: Box::new(error),
        },
        Err(_) => GraphError::Api {
            status: context.status,
            message: body_text(context.body),
        },
    }
}

fn body_text(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        "empty response body".to_string()
    } else {
        text
    }
}

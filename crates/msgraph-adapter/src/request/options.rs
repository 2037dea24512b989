/*
[INPUT]:  Caller supplied headers, middleware options and query parameters
[OUTPUT]: Per-call request configuration
[POS]:    Request layer - shared configuration for every builder verb
[UPDATE]: When the adapter honours new per-request options
*/

use std::time::Duration;

use super::headers::RequestHeaders;

/// Per-request option consumed by the adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOption {
    /// Overall timeout for this request only
    Timeout(Duration),
    /// Opaque option for custom adapters
    Custom { key: String, value: String },
}

impl RequestOption {
    pub fn key(&self) -> &str {
        match self {
            RequestOption::Timeout(_) => "timeout",
            RequestOption::Custom { key, .. } => key,
        }
    }
}

/// Headers, options and query parameters for a single builder call.
///
/// `Q` is the query parameter shape the endpoint accepts; verbs that take no
/// query parameters use `()`.
#[derive(Debug, Clone)]
pub struct RequestConfiguration<Q = ()> {
    pub headers: RequestHeaders,
    pub options: Vec<RequestOption>,
    pub query_parameters: Option<Q>,
}

impl<Q> Default for RequestConfiguration<Q> {
    fn default() -> Self {
        Self {
            headers: RequestHeaders::default(),
            options: Vec::new(),
            query_parameters: None,
        }
    }
}

impl<Q> RequestConfiguration<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query_parameters: Q) -> Self {
        Self {
            query_parameters: Some(query_parameters),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }

    pub fn option(mut self, option: RequestOption) -> Self {
        self.options.push(option);
        self
    }
}

/*
[INPUT]:  HTTP client configuration and request descriptions
[OUTPUT]: HTTP responses and typed errors
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding transport options or error variants
*/

pub mod client;
pub mod error;

pub use error::{GraphError, Result};

pub use client::{ClientConfig, DEFAULT_BASE_URL, HttpRequestAdapter};

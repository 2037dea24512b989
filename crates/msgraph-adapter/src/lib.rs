/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Microsoft Graph adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod builders;
pub mod http;
pub mod pagination;
pub mod request;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    AccessTokenProvider,
    ClientCredentialsProvider,
    StaticTokenProvider,
    TokenCache,
};

// Re-export commonly used types from builders
pub use builders::GraphServiceClient;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    GraphError,
    HttpRequestAdapter,
    Result,
};

pub use pagination::PageIterator;

// Re-export commonly used types from request
pub use request::{
    CollectionQueryParameters,
    CountQueryParameters,
    ErrorMappings,
    HttpMethod,
    ItemQueryParameters,
    RequestAdapter,
    RequestAdapterExt,
    RequestConfiguration,
    RequestHeaders,
    RequestInformation,
    RequestOption,
};

// Re-export all types
pub use types::*;

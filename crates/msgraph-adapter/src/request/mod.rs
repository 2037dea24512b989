/*
[INPUT]:  URL templates, path/query parameters, headers and bodies
[OUTPUT]: Transport-independent request descriptions and the adapter seam
[POS]:    Request layer - abstractions every request builder is written against
[UPDATE]: When adding request options, query shapes or adapter capabilities
*/

pub mod adapter;
pub mod errors;
pub mod headers;
pub mod information;
pub mod options;
pub mod query;
pub mod url_template;

pub use adapter::{RawResponse, RequestAdapter, RequestAdapterExt};
pub use errors::{ErrorContext, ErrorFactory, ErrorMappings, odata_error_factory};
pub use headers::RequestHeaders;
pub use information::{BASE_URL_KEY, HttpMethod, PathParameters, RAW_URL_KEY, RequestInformation};
pub use options::{RequestConfiguration, RequestOption};
pub use query::{
    CollectionQueryParameters,
    CountQueryParameters,
    ItemQueryParameters,
    QueryParameters,
    QueryValue,
};
pub use url_template::UrlTemplate;

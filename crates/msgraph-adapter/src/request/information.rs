/*
[INPUT]:  HTTP verb, URL template, path/query parameters, headers and body
[OUTPUT]: Fully described request ready for any RequestAdapter
[POS]:    Request layer - the unit of work handed to adapters
[UPDATE]: When request descriptions gain new fields
*/

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use url::Url;

use super::headers::RequestHeaders;
use super::options::{RequestConfiguration, RequestOption};
use super::query::{QueryParameters, QueryValue};
use super::url_template::UrlTemplate;
use crate::http::{GraphError, Result};

/// Path parameter key holding a raw URL that bypasses template expansion
pub const RAW_URL_KEY: &str = "request-raw-url";

/// Path parameter key holding the service base URL
pub const BASE_URL_KEY: &str = "baseurl";

pub type PathParameters = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything an adapter needs to execute one request
#[derive(Debug, Clone)]
pub struct RequestInformation {
    pub method: HttpMethod,
    pub url_template: String,
    pub path_parameters: PathParameters,
    pub query_parameters: BTreeMap<String, QueryValue>,
    pub headers: RequestHeaders,
    pub content: Option<Vec<u8>>,
    options: BTreeMap<String, RequestOption>,
}

impl RequestInformation {
    pub fn new(
        method: HttpMethod,
        url_template: impl Into<String>,
        path_parameters: PathParameters,
    ) -> Self {
        Self {
            method,
            url_template: url_template.into(),
            path_parameters,
            query_parameters: BTreeMap::new(),
            headers: RequestHeaders::new(),
            content: None,
            options: BTreeMap::new(),
        }
    }

    /// Request against an opaque server-issued URL such as `@odata.nextLink`
    pub fn from_raw_url(method: HttpMethod, raw_url: impl Into<String>) -> Self {
        let mut path_parameters = PathParameters::new();
        path_parameters.insert(RAW_URL_KEY.to_string(), raw_url.into());
        Self::new(method, String::new(), path_parameters)
    }

    pub fn add_query_parameters<Q: QueryParameters + ?Sized>(&mut self, parameters: &Q) {
        for (name, value) in parameters.query_pairs() {
            self.query_parameters.insert(name.to_string(), value);
        }
    }

    /// Apply caller headers, options and (when present) query parameters
    pub fn configure<Q: QueryParameters>(&mut self, config: Option<&RequestConfiguration<Q>>) {
        let Some(config) = config else {
            return;
        };
        if let Some(query) = &config.query_parameters {
            self.add_query_parameters(query);
        }
        self.headers.add_all(&config.headers);
        self.add_request_options(config.options.iter().cloned());
    }

    pub fn add_request_options(&mut self, options: impl IntoIterator<Item = RequestOption>) {
        for option in options {
            self.options.insert(option.key().to_string(), option);
        }
    }

    pub fn request_option(&self, key: &str) -> Option<&RequestOption> {
        self.options.get(key)
    }

    pub fn request_options(&self) -> impl Iterator<Item = &RequestOption> {
        self.options.values()
    }

    /// Serialize `body` as JSON and set the content type
    pub fn set_json_content<T: Serialize + ?Sized>(&mut self, body: &T) -> Result<()> {
        let bytes = serde_json::to_vec(body)?;
        self.set_content(bytes, "application/json");
        Ok(())
    }

    pub fn set_content(&mut self, content: Vec<u8>, content_type: &str) {
        self.headers.remove("Content-Type");
        self.headers.add("Content-Type", content_type);
        self.content = Some(content);
    }

    pub fn raw_url(&self) -> Option<&str> {
        self.path_parameters.get(RAW_URL_KEY).map(String::as_str)
    }

    pub fn set_base_url_if_missing(&mut self, base_url: &str) {
        self.path_parameters
            .entry(BASE_URL_KEY.to_string())
            .or_insert_with(|| base_url.trim_end_matches('/').to_string());
    }

    /// Resolve the final URL.
    ///
    /// A raw URL wins over the template; its query string is kept verbatim and
    /// template query parameters are ignored.
    pub fn url(&self) -> Result<Url> {
        if let Some(raw) = self.raw_url() {
            return Ok(Url::parse(raw)?);
        }
        if self.url_template.is_empty() {
            return Err(GraphError::UrlTemplate(
                "request has neither a URL template nor a raw URL".to_string(),
            ));
        }

        let expanded =
            UrlTemplate::expand(&self.url_template, &self.path_parameters, &self.query_parameters)?;
        Ok(Url::parse(&expanded)?)
    }
}

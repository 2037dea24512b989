/*
[INPUT]:  HTTP configuration (base URL, timeouts, allowed hosts, token provider)
[OUTPUT]: reqwest-backed RequestAdapter ready for Graph calls
[POS]:    HTTP layer - core adapter implementation
[UPDATE]: When adding connection options or changing transport behavior
*/

use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::auth::AccessTokenProvider;
use crate::http::{GraphError, Result};
use crate::request::{
    ErrorContext, ErrorMappings, HttpMethod, RawResponse, RequestAdapter, RequestInformation,
    RequestOption,
};

/// Default Graph service root
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Hosts that may receive the bearer token
const GRAPH_HOSTS: &[&str] = &[
    "graph.microsoft.com",
    "graph.microsoft.us",
    "dod-graph.microsoft.us",
    "graph.microsoft.de",
    "microsoftgraph.chinacloudapi.cn",
    "canary.graph.microsoft.com",
];

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
    /// Hosts allowed to receive the access token. Empty allows every host;
    /// the base URL host is always allowed.
    pub allowed_hosts: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("msgraph-adapter/", env!("CARGO_PKG_VERSION")).to_string(),
            allowed_hosts: GRAPH_HOSTS.iter().map(|host| host.to_string()).collect(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// reqwest implementation of [`RequestAdapter`]
pub struct HttpRequestAdapter {
    http_client: Client,
    base_url: RwLock<String>,
    timeout: Duration,
    allowed_hosts: Vec<String>,
    token_provider: Option<Arc<dyn AccessTokenProvider>>,
}

impl fmt::Debug for HttpRequestAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequestAdapter")
            .field("base_url", &self.base_url())
            .field("timeout", &self.timeout)
            .field("allowed_hosts", &self.allowed_hosts)
            .field("authenticated", &self.token_provider.is_some())
            .finish()
    }
}

impl HttpRequestAdapter {
    /// Create an unauthenticated adapter with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create an adapter with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http_client,
            base_url: RwLock::new(config.base_url.trim_end_matches('/').to_string()),
            timeout: config.timeout,
            allowed_hosts: config
                .allowed_hosts
                .iter()
                .map(|host| host.to_ascii_lowercase())
                .collect(),
            token_provider: None,
        })
    }

    /// Attach the provider used to authorize requests
    pub fn with_token_provider(mut self, provider: Arc<dyn AccessTokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    fn is_allowed_host(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        if self.allowed_hosts.is_empty() {
            return true;
        }

        let host = host.to_ascii_lowercase();
        let base_host = Url::parse(&self.base_url())
            .ok()
            .and_then(|base| base.host_str().map(str::to_ascii_lowercase));

        base_host.as_deref() == Some(host.as_str()) || self.allowed_hosts.contains(&host)
    }
}

#[async_trait]
impl RequestAdapter for HttpRequestAdapter {
    fn base_url(&self) -> String {
        self.base_url
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_base_url(&self, base_url: &str) {
        let mut guard = self
            .base_url
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = base_url.trim_end_matches('/').to_string();
    }

    async fn send_raw(
        &self,
        mut request: RequestInformation,
        errors: &ErrorMappings,
    ) -> Result<Option<RawResponse>> {
        request.set_base_url_if_missing(&self.base_url());
        let url = request.url()?;

        let mut builder = self
            .http_client
            .request(to_reqwest_method(request.method), url.clone());

        for (name, values) in request.headers.iter() {
            for value in values {
                builder = builder.header(name, value.as_str());
            }
        }
        if !request.headers.contains("client-request-id") {
            builder = builder.header("client-request-id", Uuid::new_v4().to_string());
        }

        if let Some(provider) = &self.token_provider {
            if !request.headers.contains("authorization") && self.is_allowed_host(&url) {
                let token = provider.access_token().await?;
                builder = builder.bearer_auth(token);
            }
        }

        let mut timeout = self.timeout;
        if let Some(RequestOption::Timeout(duration)) = request.request_option("timeout") {
            timeout = *duration;
            builder = builder.timeout(timeout);
        }

        if let Some(content) = request.content.take() {
            builder = builder.body(content);
        }

        debug!(method = %request.method, url = %url, "sending graph request");

        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                GraphError::Timeout {
                    duration: timeout.as_secs(),
                }
            } else {
                GraphError::Http(err)
            }
        })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| parse_retry_after(value, Utc::now()));
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let err = errors.resolve(&ErrorContext {
                status: status.as_u16(),
                retry_after,
                body: &body,
            });
            warn!(
                method = %request.method,
                url = %url,
                status = status.as_u16(),
                error = %err,
                "graph request failed"
            );
            return Err(err);
        }

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            "graph request completed"
        );

        if status == StatusCode::NO_CONTENT || body.is_empty() {
            return Ok(None);
        }

        Ok(Some(RawResponse {
            status: status.as_u16(),
            content_type,
            body,
        }))
    }
}

/// Seconds to wait from a `Retry-After` value, either delta-seconds or an
/// HTTP-date. A date in the past means no wait.
fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<u64> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(seconds);
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?;
    let seconds = at.with_timezone(&Utc).signed_duration_since(now).num_seconds();
    Some(u64::try_from(seconds).unwrap_or(0))
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    }
}

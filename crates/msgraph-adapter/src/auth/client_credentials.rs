/*
[INPUT]:  Tenant, application id and client secret
[OUTPUT]: Cached application access tokens for Graph
[POS]:    Auth layer - OAuth 2.0 client credentials flow
[UPDATE]: When token endpoint parameters or caching rules change
*/

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

use super::{AccessTokenProvider, TokenCache};
use crate::http::{ClientConfig, GraphError, Result};

/// Public cloud Entra ID authority
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// Scope requesting every application permission granted to the app
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Successful token endpoint response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: u64,
}

/// Token endpoint error body
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Acquires app-only tokens with the client credentials grant
pub struct ClientCredentialsProvider {
    http_client: Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
    scope: String,
    cache: TokenCache,
    refresh_lock: Mutex<()>,
}

impl fmt::Debug for ClientCredentialsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsProvider")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .finish()
    }
}

impl ClientCredentialsProvider {
    /// Create a provider against the public cloud authority
    pub fn new(
        tenant_id: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::with_authority(DEFAULT_AUTHORITY, tenant_id, client_id, client_secret)
    }

    /// Create a provider against an explicit authority (national clouds, tests)
    pub fn with_authority(
        authority: &str,
        tenant_id: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let tenant_id = tenant_id.trim();
        if tenant_id.is_empty() {
            return Err(GraphError::Config("tenant id must not be empty".to_string()));
        }
        let client_id = client_id.into();
        if client_id.trim().is_empty() {
            return Err(GraphError::Config("client id must not be empty".to_string()));
        }

        let token_url = Url::parse(&format!(
            "{}/{}/oauth2/v2.0/token",
            authority.trim_end_matches('/'),
            tenant_id
        ))?;

        let config = ClientConfig::default();
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http_client,
            token_url,
            client_id,
            client_secret: client_secret.into(),
            scope: GRAPH_DEFAULT_SCOPE.to_string(),
            cache: TokenCache::new(),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Override the requested scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Get the token cache
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Call the token endpoint without touching the cache
    ///
    /// POST {authority}/{tenant}/oauth2/v2.0/token
    pub async fn request_token(&self) -> Result<TokenResponse> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", self.scope.as_str()),
        ];

        debug!(token_url = %self.token_url, client_id = %self.client_id, "requesting access token");
        let response = self
            .http_client
            .post(self.token_url.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let message = match serde_json::from_slice::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => format!(
                    "token endpoint returned {}: {}",
                    status.as_u16(),
                    String::from_utf8_lossy(&body).trim()
                ),
            };
            return Err(GraphError::Authentication { message });
        }

        let token: TokenResponse = serde_json::from_slice(&body)?;
        Ok(token)
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsProvider {
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.cache.get_token() {
            return Ok(token);
        }

        // Concurrent callers wait for a single refresh.
        let _guard = self.refresh_lock.lock().await;
        if let Some(token) = self.cache.get_token() {
            return Ok(token);
        }

        let response = self.request_token().await?;
        info!(
            client_id = %self.client_id,
            expires_in = response.expires_in,
            "acquired graph access token"
        );
        self.cache
            .set_token(response.access_token.clone(), response.expires_in);
        Ok(response.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_url_from_authority() {
        let provider = ClientCredentialsProvider::with_authority(
            "https://login.microsoftonline.us/",
            "contoso.onmicrosoft.com",
            "app-id",
            "secret",
        )
        .unwrap();

        assert_eq!(
            provider.token_url().as_str(),
            "https://login.microsoftonline.us/contoso.onmicrosoft.com/oauth2/v2.0/token"
        );
    }

    #[test]
    fn test_empty_tenant_is_config_error() {
        let err = ClientCredentialsProvider::new(" ", "app-id", "secret").unwrap_err();
        assert!(matches!(err, GraphError::Config(_)));
    }

    #[test]
    fn test_debug_hides_secret() {
        let provider = ClientCredentialsProvider::new("tenant", "app-id", "hunter2").unwrap();
        assert!(!format!("{provider:?}").contains("hunter2"));
    }
}

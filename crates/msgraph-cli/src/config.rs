/*
[INPUT]:  YAML configuration file and MSGRAPH_* environment variables
[OUTPUT]: Validated client configuration and token provider
[POS]:    Configuration layer - CLI setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use msgraph_adapter::auth::DEFAULT_AUTHORITY;
use msgraph_adapter::http::DEFAULT_BASE_URL;
use msgraph_adapter::{
    AccessTokenProvider, ClientConfig, ClientCredentialsProvider, StaticTokenProvider,
};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_ENV: &str = "MSGRAPH_ACCESS_TOKEN";
pub const CLIENT_SECRET_ENV: &str = "MSGRAPH_CLIENT_SECRET";

/// Top-level configuration for the Graph CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphConfig {
    /// Service root, e.g. a national cloud endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Pre-issued bearer token; wins over `auth`
    #[serde(default)]
    pub access_token: Option<String>,
    /// App registration used for the client credentials flow
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

/// Client credentials of an Entra ID app registration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub tenant_id: String,
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub authority: Option<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            access_token: None,
            auth: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl GraphConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parse config file {}", path.display()))?;
        Ok(config)
    }

    /// `<config dir>/msgraph/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("msgraph").join("config.yaml"))
    }

    /// Apply `MSGRAPH_ACCESS_TOKEN` and `MSGRAPH_CLIENT_SECRET` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from `lookup`; empty values are ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(token) = lookup(ACCESS_TOKEN_ENV) {
            self.access_token = Some(token);
        }
        if let (Some(secret), Some(auth)) = (lookup(CLIENT_SECRET_ENV), self.auth.as_mut()) {
            auth.client_secret = Some(secret);
        }
    }

    /// Check the config can authenticate; dry runs only need a usable base URL
    pub fn validate(&self, require_credentials: bool) -> Result<()> {
        url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url '{}'", self.base_url))?;
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if !require_credentials || self.has_access_token() {
            return Ok(());
        }

        match &self.auth {
            Some(auth) => {
                if auth.tenant_id.trim().is_empty() || auth.client_id.trim().is_empty() {
                    bail!("auth.tenant_id and auth.client_id must not be empty");
                }
                if auth.client_secret.as_deref().is_none_or(|s| s.trim().is_empty()) {
                    bail!("auth.client_secret is missing (set it in the config or {CLIENT_SECRET_ENV})");
                }
                Ok(())
            }
            None => bail!("no credentials configured: set access_token, auth, or {ACCESS_TOKEN_ENV}"),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            ..ClientConfig::default()
        }
    }

    /// Provider matching the configured credentials, `None` when there are none
    pub fn token_provider(&self) -> Result<Option<Arc<dyn AccessTokenProvider>>> {
        if let Some(token) = self.access_token.as_deref().filter(|t| !t.trim().is_empty()) {
            return Ok(Some(Arc::new(StaticTokenProvider::new(token))));
        }

        let Some(auth) = &self.auth else {
            return Ok(None);
        };
        let Some(secret) = auth.client_secret.clone() else {
            return Ok(None);
        };
        let provider = ClientCredentialsProvider::with_authority(
            auth.authority.as_deref().unwrap_or(DEFAULT_AUTHORITY),
            &auth.tenant_id,
            auth.client_id.clone(),
            secret,
        )
        .context("build client credentials provider")?;
        Ok(Some(Arc::new(provider)))
    }

    fn has_access_token(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(yaml: &str) -> GraphConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("{}");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate(false).is_ok());
        assert!(config.validate(true).is_err());
    }

    #[test]
    fn test_client_credentials_config() {
        let config = parse(
            r#"
base_url: https://graph.microsoft.us/v1.0
timeout_secs: 15
auth:
  tenant_id: contoso.onmicrosoft.com
  client_id: 11111111-2222-3333-4444-555555555555
  client_secret: shh
  authority: https://login.microsoftonline.us
"#,
        );

        assert!(config.validate(true).is_ok());
        assert_eq!(config.client_config().timeout, Duration::from_secs(15));
        assert!(config.token_provider().unwrap().is_some());
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let config = parse(
            r#"
auth:
  tenant_id: contoso
  client_id: app
"#,
        );
        let err = config.validate(true).unwrap_err();
        assert!(err.to_string().contains("client_secret"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = parse(
            r#"
auth:
  tenant_id: contoso
  client_id: app
  client_secret: from-file
"#,
        );
        let env: HashMap<&str, &str> = HashMap::from([
            (CLIENT_SECRET_ENV, "from-env"),
            (ACCESS_TOKEN_ENV, "  "),
        ]);
        config.apply_overrides(|name| env.get(name).map(|value| value.to_string()));

        assert_eq!(
            config.auth.as_ref().and_then(|auth| auth.client_secret.as_deref()),
            Some("from-env")
        );
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_access_token_override_wins() {
        let mut config = GraphConfig::default();
        config.apply_overrides(|name| (name == ACCESS_TOKEN_ENV).then(|| "tok".to_string()));

        assert!(config.validate(true).is_ok());
        assert!(config.token_provider().unwrap().is_some());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = parse("base_url: not a url");
        assert!(config.validate(false).is_err());
    }
}

/*
[INPUT]:  Access tokens and expiration timestamps
[OUTPUT]: Token retrieval and expiration status
[POS]:    Auth layer - token lifecycle management
[UPDATE]: When adding token refresh or changing storage strategy
*/

use std::fmt::Debug;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::http::Result;

/// Source of bearer tokens for the request adapter
#[async_trait]
pub trait AccessTokenProvider: Send + Sync + Debug {
    async fn access_token(&self) -> Result<String>;
}

/// Provider for a token obtained elsewhere
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Longest lifetime accepted from a token endpoint
const MAX_TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Stored token data with metadata
#[derive(Clone)]
pub struct TokenData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Point after which the token is refreshed
    pub refresh_at: DateTime<Utc>,
}

impl Debug for TokenData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenData")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("refresh_at", &self.refresh_at)
            .finish()
    }
}

/// Thread-safe token slot.
///
/// A token counts as expired `skew` before its real expiry so callers refresh
/// ahead of the server rejecting it. The skew never exceeds half the token's
/// lifetime, so short-lived tokens are still reused.
#[derive(Debug, Clone)]
pub struct TokenCache {
    data: Arc<RwLock<Option<TokenData>>>,
    skew: Duration,
}

impl TokenCache {
    /// Create a new empty cache with a five minute refresh skew
    pub fn new() -> Self {
        Self::with_skew(Duration::minutes(5))
    }

    pub fn with_skew(skew: Duration) -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
            skew,
        }
    }

    /// Store a new token with expiration; lifetimes above a day are capped
    pub fn set_token(&self, token: String, expires_seconds: u64) {
        let now = Utc::now();
        let lifetime = i64::try_from(expires_seconds)
            .unwrap_or(i64::MAX)
            .min(MAX_TOKEN_LIFETIME_SECS);
        let lifetime = Duration::try_seconds(lifetime).unwrap_or_else(Duration::zero);
        let skew = self.skew.min(lifetime / 2);

        let expires_at = now.checked_add_signed(lifetime).unwrap_or(now);
        let refresh_at = expires_at.checked_sub_signed(skew).unwrap_or(expires_at);
        let mut guard = self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(TokenData {
            token,
            expires_at,
            refresh_at,
        });
    }

    /// Get the current token if it is still fresh
    pub fn get_token(&self) -> Option<String> {
        let guard = self
            .data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard
            .as_ref()
            .filter(|data| Utc::now() < data.refresh_at)
            .map(|data| data.token.clone())
    }

    /// Check if token is missing or inside the refresh window
    pub fn is_expired(&self) -> bool {
        self.get_token().is_none()
    }

    /// Get token data if available
    pub fn token_data(&self) -> Option<TokenData> {
        let guard = self
            .data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone()
    }

    /// Clear the stored token
    pub fn clear(&self) {
        let mut guard = self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cache_is_empty() {
        let cache = TokenCache::new();
        assert!(cache.get_token().is_none());
        assert!(cache.is_expired());
    }

    #[test]
    fn test_set_and_get_token() {
        let cache = TokenCache::new();
        cache.set_token("test_token".to_string(), 3600);

        assert_eq!(cache.get_token(), Some("test_token".to_string()));
        assert!(!cache.is_expired());
    }

    #[test]
    fn test_token_inside_skew_is_expired() {
        let cache = TokenCache::with_skew(Duration::seconds(120));
        cache.set_token("already_due".to_string(), 0);

        assert!(cache.is_expired());
        assert!(cache.token_data().is_some());
    }

    #[test]
    fn test_short_lived_token_is_reused() {
        let cache = TokenCache::new();
        cache.set_token("five_minutes".to_string(), 300);

        assert_eq!(cache.get_token(), Some("five_minutes".to_string()));
        let data = cache.token_data().unwrap();
        assert_eq!(data.expires_at - data.refresh_at, Duration::seconds(150));
    }

    #[test]
    fn test_huge_lifetimes_are_capped() {
        let cache = TokenCache::new();

        for expires_in in [10_000_000_000_000_000, u64::MAX] {
            cache.set_token("long_lived".to_string(), expires_in);

            let data = cache.token_data().unwrap();
            let lifetime = data.expires_at - Utc::now();
            assert!(lifetime > Duration::hours(23));
            assert!(lifetime <= Duration::hours(24));
            assert!(!cache.is_expired());
        }
    }

    #[test]
    fn test_clear_token() {
        let cache = TokenCache::new();
        cache.set_token("test_token".to_string(), 3600);
        cache.clear();

        assert!(cache.get_token().is_none());
        assert!(cache.token_data().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let provider = StaticTokenProvider::new("very-secret");
        assert!(!format!("{provider:?}").contains("very-secret"));
    }

    #[tokio::test]
    async fn test_static_provider_returns_token() {
        let provider = StaticTokenProvider::new("abc");
        assert_eq!(provider.access_token().await.unwrap(), "abc");
    }
}

/*
[INPUT]:  RequestInformation plus error mappings from request builders
[OUTPUT]: Decoded responses, primitives, or mapped GraphError values
[POS]:    Request layer - adapter trait every builder delegates to
[UPDATE]: When adding new response shapes or adapter capabilities
*/

use std::fmt::Debug;
use std::str::FromStr;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::errors::ErrorMappings;
use super::information::RequestInformation;
use crate::http::{GraphError, Result};

/// Successful response body with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Transport seam between request builders and the wire.
///
/// Implementations execute the request, map non-2xx statuses through
/// `errors`, and return `None` when the server sent no content.
#[async_trait]
pub trait RequestAdapter: Send + Sync + Debug {
    fn base_url(&self) -> String;

    fn set_base_url(&self, base_url: &str);

    async fn send_raw(
        &self,
        request: RequestInformation,
        errors: &ErrorMappings,
    ) -> Result<Option<RawResponse>>;
}

/// Typed helpers over [`RequestAdapter::send_raw`]
#[async_trait]
pub trait RequestAdapterExt: RequestAdapter {
    /// Send and deserialize a JSON body; `None` when there is no content
    async fn send<T>(&self, request: RequestInformation, errors: &ErrorMappings) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.send_raw(request, errors).await? {
            Some(response) => Ok(Some(serde_json::from_slice(&response.body)?)),
            None => Ok(None),
        }
    }

    /// Send and discard any response body
    async fn send_no_content(&self, request: RequestInformation, errors: &ErrorMappings) -> Result<()> {
        self.send_raw(request, errors).await?;
        Ok(())
    }

    /// Send and return the body bytes untouched
    async fn send_bytes(
        &self,
        request: RequestInformation,
        errors: &ErrorMappings,
    ) -> Result<Option<Vec<u8>>> {
        Ok(self
            .send_raw(request, errors)
            .await?
            .map(|response| response.body))
    }

    /// Send and parse a text/plain primitive such as a `$count` result
    async fn send_primitive<T>(
        &self,
        request: RequestInformation,
        errors: &ErrorMappings,
    ) -> Result<Option<T>>
    where
        T: FromStr + Send,
        T::Err: std::fmt::Display,
    {
        let Some(response) = self.send_raw(request, errors).await? else {
            return Ok(None);
        };
        let text = String::from_utf8_lossy(&response.body);
        text.trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| GraphError::InvalidResponse(format!("invalid primitive body '{text}': {e}")))
    }
}

impl<A: RequestAdapter + ?Sized> RequestAdapterExt for A {}

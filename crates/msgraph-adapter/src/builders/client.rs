/*
[INPUT]:  A RequestAdapter (or a token provider and client configuration)
[OUTPUT]: Root navigation into Graph resources
[POS]:    Builder layer - service client entry point
[UPDATE]: When new top-level resources are exposed
*/

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::drives::DrivesRequestBuilder;
use super::groups::GroupsRequestBuilder;
use super::reports::ReportsRequestBuilder;
use super::users::UsersRequestBuilder;
use super::BaseRequestBuilder;
use crate::auth::AccessTokenProvider;
use crate::http::{ClientConfig, HttpRequestAdapter, Result, DEFAULT_BASE_URL};
use crate::pagination::PageIterator;
use crate::request::{PathParameters, RequestAdapter, RequestInformation, BASE_URL_KEY};
use crate::types::CollectionResponse;

/// Root of the fluent API: `client.users().by_user_id("id").get(None)`
#[derive(Debug, Clone)]
pub struct GraphServiceClient {
    base: BaseRequestBuilder,
}

impl GraphServiceClient {
    /// Wrap an adapter; an adapter without a base URL gets the public cloud root
    pub fn new(adapter: Arc<dyn RequestAdapter>) -> Self {
        if adapter.base_url().is_empty() {
            adapter.set_base_url(DEFAULT_BASE_URL);
        }

        let mut path_parameters = PathParameters::new();
        path_parameters.insert(BASE_URL_KEY.to_string(), adapter.base_url());
        Self {
            base: BaseRequestBuilder::new(adapter, "{+baseurl}", path_parameters),
        }
    }

    /// Client over the reqwest adapter authorized by `provider`
    pub fn with_provider(
        config: ClientConfig,
        provider: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let adapter = HttpRequestAdapter::with_config(config)?.with_token_provider(provider);
        Ok(Self::new(Arc::new(adapter)))
    }

    pub fn adapter(&self) -> &Arc<dyn RequestAdapter> {
        self.base.adapter()
    }

    pub fn base_url(&self) -> &str {
        self.base
            .path_parameters()
            .get(BASE_URL_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn users(&self) -> UsersRequestBuilder {
        UsersRequestBuilder::from_parent(&self.base)
    }

    pub fn groups(&self) -> GroupsRequestBuilder {
        GroupsRequestBuilder::from_parent(&self.base)
    }

    pub fn reports(&self) -> ReportsRequestBuilder {
        ReportsRequestBuilder::from_parent(&self.base)
    }

    pub fn drives(&self) -> DrivesRequestBuilder {
        DrivesRequestBuilder::from_parent(&self.base)
    }

    /// Iterate every page that follows `first_page`.
    ///
    /// Follow-up requests carry no extra headers; use
    /// [`Self::page_iterator_for`] when the first request set some, such as
    /// `ConsistencyLevel`.
    pub fn page_iterator<T>(&self, first_page: CollectionResponse<T>) -> PageIterator<T>
    where
        T: DeserializeOwned + Send,
    {
        PageIterator::new(Arc::clone(self.base.adapter()), first_page)
    }

    /// Like [`Self::page_iterator`], reusing the headers and options of the
    /// request that produced `first_page`
    pub fn page_iterator_for<T>(
        &self,
        first_page: CollectionResponse<T>,
        request: &RequestInformation,
    ) -> PageIterator<T>
    where
        T: DeserializeOwned + Send,
    {
        self.page_iterator(first_page)
            .with_headers(request.headers.clone())
            .with_options(request.request_options().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_support::RecordingAdapter;

    #[test]
    fn test_empty_adapter_gets_default_base_url() {
        let adapter = RecordingAdapter::replying("{}");
        let client = GraphServiceClient::new(adapter.clone());

        assert_eq!(adapter.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_existing_base_url_is_kept() {
        let adapter = RecordingAdapter::replying("{}");
        adapter.set_base_url("https://graph.microsoft.us/v1.0");
        let client = GraphServiceClient::new(adapter);

        let info = client.users().to_get_request_information(None);
        assert_eq!(
            info.url().unwrap().as_str(),
            "https://graph.microsoft.us/v1.0/users"
        );
    }
}

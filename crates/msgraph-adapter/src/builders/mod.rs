/*
[INPUT]:  A RequestAdapter, URL templates and path parameters
[OUTPUT]: Fluent request builders for Graph resources
[POS]:    Builder layer - typed entry points over the request layer
[UPDATE]: When new Graph resources or verbs are exposed
*/

pub mod client;
pub mod count;
pub mod drives;
pub mod groups;
pub mod reports;
pub mod users;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::http::{GraphError, Result};
use crate::request::{
    ErrorMappings, HttpMethod, PathParameters, QueryParameters, RAW_URL_KEY, RequestAdapter,
    RequestAdapterExt, RequestConfiguration, RequestInformation,
};

pub use client::GraphServiceClient;
pub use count::{CountRequestBuilder, GroupsCountRequestBuilder, UsersCountRequestBuilder};
pub use drives::{
    DriveItemRequestBuilder, DriveItemsRequestBuilder, DriveRequestBuilder, DrivesRequestBuilder,
    WorkbookFunctionsAbsRequestBuilder, WorkbookFunctionsRequestBuilder, WorkbookRequestBuilder,
};
pub use groups::{
    GroupItemRequestBuilder, GroupMemberItemRefRequestBuilder, GroupMemberItemRequestBuilder,
    GroupMembersRefRequestBuilder, GroupMembersRequestBuilder, GroupsRequestBuilder,
};
pub use reports::{ReportFunctionRequestBuilder, ReportsRequestBuilder};
pub use users::{
    UserCheckMemberGroupsRequestBuilder, UserItemRequestBuilder, UserMemberOfRequestBuilder,
    UsersDeltaRequestBuilder, UsersRequestBuilder,
};

pub(crate) const JSON: &str = "application/json";

/// State shared by every request builder
#[derive(Clone)]
pub struct BaseRequestBuilder {
    adapter: Arc<dyn RequestAdapter>,
    url_template: String,
    path_parameters: PathParameters,
}

impl fmt::Debug for BaseRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseRequestBuilder")
            .field("url_template", &self.url_template)
            .field("path_parameters", &self.path_parameters)
            .finish()
    }
}

impl BaseRequestBuilder {
    pub fn new(
        adapter: Arc<dyn RequestAdapter>,
        url_template: impl Into<String>,
        path_parameters: PathParameters,
    ) -> Self {
        Self {
            adapter,
            url_template: url_template.into(),
            path_parameters,
        }
    }

    pub fn adapter(&self) -> &Arc<dyn RequestAdapter> {
        &self.adapter
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn path_parameters(&self) -> &PathParameters {
        &self.path_parameters
    }

    /// Builder for a nested resource, inheriting the current path parameters
    /// except a raw URL
    pub(crate) fn child(&self, url_template: impl Into<String>) -> Self {
        let mut path_parameters = self.path_parameters.clone();
        path_parameters.remove(RAW_URL_KEY);
        Self::new(Arc::clone(&self.adapter), url_template, path_parameters)
    }

    /// Like [`Self::child`], binding one more path parameter
    pub(crate) fn child_with(
        &self,
        url_template: impl Into<String>,
        name: &str,
        value: impl Into<String>,
    ) -> Self {
        let mut child = self.child(url_template);
        child.path_parameters.insert(name.to_string(), value.into());
        child
    }

    /// Same template bound to an opaque URL. The path parameters stay so
    /// navigation from here still resolves the parent ids.
    pub(crate) fn with_raw_url(&self, raw_url: impl Into<String>) -> Self {
        let mut path_parameters = self.path_parameters.clone();
        path_parameters.insert(RAW_URL_KEY.to_string(), raw_url.into());
        Self::new(Arc::clone(&self.adapter), self.url_template.clone(), path_parameters)
    }

    /// Describe a request; `accept` is only applied when the caller set none
    pub(crate) fn request_information<Q: QueryParameters>(
        &self,
        method: HttpMethod,
        accept: &str,
        config: Option<&RequestConfiguration<Q>>,
    ) -> RequestInformation {
        let mut info = RequestInformation::new(
            method,
            self.url_template.clone(),
            self.path_parameters.clone(),
        );
        info.configure(config);
        info.headers.try_add("Accept", accept);
        info
    }

    /// Send expecting a JSON body; no content is an error
    pub(crate) async fn send_json<T>(&self, info: RequestInformation) -> Result<T>
    where
        T: DeserializeOwned + Send,
    {
        let method = info.method;
        let value: Option<T> = self.adapter.send(info, &ErrorMappings::odata()).await?;
        value.ok_or_else(|| GraphError::InvalidResponse(format!("{method} returned no content")))
    }

    /// Send where the service may answer 204
    pub(crate) async fn send_json_optional<T>(&self, info: RequestInformation) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        self.adapter.send(info, &ErrorMappings::odata()).await
    }

    pub(crate) async fn send_no_content(&self, info: RequestInformation) -> Result<()> {
        self.adapter
            .send_no_content(info, &ErrorMappings::odata())
            .await
    }

    pub(crate) async fn send_bytes(&self, info: RequestInformation) -> Result<Vec<u8>> {
        Ok(self
            .adapter
            .send_bytes(info, &ErrorMappings::odata())
            .await?
            .unwrap_or_default())
    }

    pub(crate) async fn send_count(&self, info: RequestInformation) -> Result<i64> {
        let count: Option<i64> = self
            .adapter
            .send_primitive(info, &ErrorMappings::odata())
            .await?;
        count.ok_or_else(|| GraphError::InvalidResponse("count returned no content".to_string()))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::http::Result;
    use crate::request::{ErrorMappings, RawResponse, RequestAdapter, RequestInformation};

    /// Adapter that records requests and replays a canned body
    #[derive(Debug, Default)]
    pub(crate) struct RecordingAdapter {
        pub base_url: Mutex<String>,
        pub requests: Mutex<Vec<RequestInformation>>,
        pub response: Mutex<Option<Vec<u8>>>,
    }

    impl RecordingAdapter {
        pub(crate) fn replying(body: &str) -> Arc<Self> {
            let adapter = Self::default();
            *adapter.response.lock().unwrap() = Some(body.as_bytes().to_vec());
            Arc::new(adapter)
        }

        pub(crate) fn last_request(&self) -> RequestInformation {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl RequestAdapter for RecordingAdapter {
        fn base_url(&self) -> String {
            self.base_url.lock().unwrap().clone()
        }

        fn set_base_url(&self, base_url: &str) {
            *self.base_url.lock().unwrap() = base_url.to_string();
        }

        async fn send_raw(
            &self,
            request: RequestInformation,
            _errors: &ErrorMappings,
        ) -> Result<Option<RawResponse>> {
            self.requests.lock().unwrap().push(request);
            Ok(self.response.lock().unwrap().clone().map(|body| RawResponse {
                status: 200,
                content_type: Some("application/json".to_string()),
                body,
            }))
        }
    }
}

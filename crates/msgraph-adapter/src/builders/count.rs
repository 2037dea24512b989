/*
[INPUT]:  Collection path plus $filter/$search options
[OUTPUT]: Item counts parsed from text/plain bodies
[POS]:    Builder layer - `$count` segments
[UPDATE]: When more collections expose `$count`
*/

use super::BaseRequestBuilder;
use crate::http::Result;
use crate::request::{CountQueryParameters, HttpMethod, RequestConfiguration, RequestInformation};

const TEXT_PLAIN: &str = "text/plain;q=0.9";

/// `GET <collection>/$count`.
///
/// Graph only answers advanced queries with the `ConsistencyLevel: eventual`
/// header; callers add it through the request configuration.
#[derive(Debug, Clone)]
pub struct CountRequestBuilder {
    base: BaseRequestBuilder,
}

pub type UsersCountRequestBuilder = CountRequestBuilder;
pub type GroupsCountRequestBuilder = CountRequestBuilder;

impl CountRequestBuilder {
    pub(crate) fn from_parent(parent: &BaseRequestBuilder, url_template: &str) -> Self {
        Self {
            base: parent.child(url_template),
        }
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration<CountQueryParameters>>,
    ) -> RequestInformation {
        self.base
            .request_information(HttpMethod::Get, TEXT_PLAIN, config)
    }

    /// Get the number of resources in the collection
    pub async fn get(
        &self,
        config: Option<&RequestConfiguration<CountQueryParameters>>,
    ) -> Result<i64> {
        let info = self.to_get_request_information(config);
        self.base.send_count(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_support::RecordingAdapter;
    use crate::GraphServiceClient;

    #[tokio::test]
    async fn test_users_count() {
        let adapter = RecordingAdapter::replying("42");
        let client = GraphServiceClient::new(adapter.clone());

        let config = RequestConfiguration::with_query(CountQueryParameters {
            filter: Some("accountEnabled eq true".to_string()),
            ..Default::default()
        })
        .header("ConsistencyLevel", "eventual");
        let count = client.users().count().get(Some(&config)).await.unwrap();

        assert_eq!(count, 42);
        let request = adapter.last_request();
        assert_eq!(request.headers.first("accept"), Some(TEXT_PLAIN));
        assert_eq!(request.headers.first("consistencylevel"), Some("eventual"));
        assert_eq!(
            request.url().unwrap().as_str(),
            "https://graph.microsoft.com/v1.0/users/$count?%24filter=accountEnabled%20eq%20true"
        );
    }

    #[tokio::test]
    async fn test_count_rejects_non_numeric_body() {
        let adapter = RecordingAdapter::replying("many");
        let client = GraphServiceClient::new(adapter);

        let err = client.groups().count().get(None).await.unwrap_err();
        assert!(matches!(err, crate::GraphError::InvalidResponse(_)));
    }
}

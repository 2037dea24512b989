/*
[INPUT]:  A first collection page (or the request producing it) and an adapter
[OUTPUT]: Every page or item of the collection, plus the final delta link
[POS]:    Paging layer - follows @odata.nextLink across a collection
[UPDATE]: When paging needs new stop conditions or per-page hooks
*/

use std::fmt;
use std::sync::Arc;

use futures_util::stream::{self, Stream, TryStreamExt};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::builders::JSON;
use crate::http::{GraphError, Result};
use crate::request::{
    ErrorMappings, HttpMethod, RequestAdapter, RequestAdapterExt, RequestHeaders,
    RequestInformation, RequestOption,
};
use crate::types::CollectionResponse;

/// Walks a paged collection by requesting each `@odata.nextLink` verbatim
pub struct PageIterator<T> {
    adapter: Arc<dyn RequestAdapter>,
    headers: RequestHeaders,
    options: Vec<RequestOption>,
    pending: Option<CollectionResponse<T>>,
    next_link: Option<String>,
    delta_link: Option<String>,
    pages: usize,
}

impl<T> fmt::Debug for PageIterator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageIterator")
            .field("next_link", &self.next_link)
            .field("delta_link", &self.delta_link)
            .field("pages", &self.pages)
            .finish()
    }
}

impl<T> PageIterator<T>
where
    T: DeserializeOwned + Send,
{
    pub fn new(adapter: Arc<dyn RequestAdapter>, first_page: CollectionResponse<T>) -> Self {
        Self {
            adapter,
            headers: RequestHeaders::new(),
            options: Vec::new(),
            pending: Some(first_page),
            next_link: None,
            delta_link: None,
            pages: 0,
        }
    }

    /// Send `request` for the first page; its headers and options are reused
    /// for every following page
    pub async fn from_request(
        adapter: Arc<dyn RequestAdapter>,
        request: RequestInformation,
    ) -> Result<Self> {
        let headers = request.headers.clone();
        let options: Vec<RequestOption> = request.request_options().cloned().collect();

        let first: Option<CollectionResponse<T>> =
            adapter.send(request, &ErrorMappings::odata()).await?;
        let first = first.ok_or_else(|| {
            GraphError::InvalidResponse("collection request returned no content".to_string())
        })?;

        Ok(Self::new(adapter, first)
            .with_headers(headers)
            .with_options(options))
    }

    /// Headers sent with every follow-up request
    pub fn with_headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_options(mut self, options: Vec<RequestOption>) -> Self {
        self.options = options;
        self
    }

    /// Delta link of the last page seen, if the collection is a delta query
    pub fn delta_link(&self) -> Option<&str> {
        self.delta_link.as_deref()
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Next page, or `None` once a page without a next link has been returned
    pub async fn next_page(&mut self) -> Result<Option<CollectionResponse<T>>> {
        let page = match self.pending.take() {
            Some(page) => page,
            None => {
                let Some(link) = self.next_link.take() else {
                    return Ok(None);
                };
                self.fetch(link).await?
            }
        };

        self.next_link = page.next_link.clone().filter(|link| !link.is_empty());
        if page.delta_link.is_some() {
            self.delta_link = page.delta_link.clone();
        }
        self.pages += 1;
        Ok(Some(page))
    }

    /// Drain every remaining page into one vector
    pub async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.value);
        }
        Ok(items)
    }

    /// Stream of items across all remaining pages
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        stream::try_unfold(self, |mut pages| async move {
            let page = pages.next_page().await?;
            Ok::<_, GraphError>(page.map(|page| {
                let items = stream::iter(page.value.into_iter().map(Ok::<T, GraphError>));
                (items, pages)
            }))
        })
        .try_flatten()
    }

    async fn fetch(&self, link: String) -> Result<CollectionResponse<T>> {
        debug!(next_link = %link, page = self.pages + 1, "fetching next page");

        let mut request = RequestInformation::from_raw_url(HttpMethod::Get, link);
        request.headers.add_all(&self.headers);
        request.headers.try_add("Accept", JSON);
        request.add_request_options(self.options.iter().cloned());

        let page: Option<CollectionResponse<T>> =
            self.adapter.send(request, &ErrorMappings::odata()).await?;
        page.ok_or_else(|| GraphError::InvalidResponse("next page returned no content".to_string()))
    }
}

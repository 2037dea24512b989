/*
[INPUT]:  OData query options chosen by callers
[OUTPUT]: Named query values ready for URL template expansion
[POS]:    Request layer - OData query parameter shapes
[UPDATE]: When endpoints accept new query options
*/

/// A single query or path value as understood by the URL template expander
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    String(String),
    Int(i64),
    Bool(bool),
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        QueryValue::List(value)
    }
}

/// Query parameter set attached to a request.
///
/// Names are the spellings used inside URL templates, so `$select` is
/// reported as `%24select`.
pub trait QueryParameters {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)>;
}

impl QueryParameters for () {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)> {
        Vec::new()
    }
}

/// Query options accepted by entity collections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQueryParameters {
    /// Include count of items
    pub count: Option<bool>,
    /// Expand related entities
    pub expand: Vec<String>,
    /// Filter items by property values
    pub filter: Option<String>,
    /// Order items by property values
    pub orderby: Vec<String>,
    /// Search items by search phrases
    pub search: Option<String>,
    /// Select properties to be returned
    pub select: Vec<String>,
    /// Skip the first n items
    pub skip: Option<i32>,
    /// Show only the first n items
    pub top: Option<i32>,
}

impl QueryParameters for CollectionQueryParameters {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)> {
        let mut pairs = Vec::new();
        if let Some(count) = self.count {
            pairs.push(("%24count", QueryValue::Bool(count)));
        }
        push_list(&mut pairs, "%24expand", &self.expand);
        if let Some(filter) = &self.filter {
            pairs.push(("%24filter", QueryValue::String(filter.clone())));
        }
        push_list(&mut pairs, "%24orderby", &self.orderby);
        if let Some(search) = &self.search {
            pairs.push(("%24search", QueryValue::String(search.clone())));
        }
        push_list(&mut pairs, "%24select", &self.select);
        if let Some(skip) = self.skip {
            pairs.push(("%24skip", QueryValue::from(skip)));
        }
        if let Some(top) = self.top {
            pairs.push(("%24top", QueryValue::from(top)));
        }
        pairs
    }
}

/// Query options accepted by single entities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQueryParameters {
    pub expand: Vec<String>,
    pub select: Vec<String>,
}

impl QueryParameters for ItemQueryParameters {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)> {
        let mut pairs = Vec::new();
        push_list(&mut pairs, "%24expand", &self.expand);
        push_list(&mut pairs, "%24select", &self.select);
        pairs
    }
}

/// Query options accepted by `$count` segments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountQueryParameters {
    pub filter: Option<String>,
    pub search: Option<String>,
}

impl QueryParameters for CountQueryParameters {
    fn query_pairs(&self) -> Vec<(&'static str, QueryValue)> {
        let mut pairs = Vec::new();
        if let Some(filter) = &self.filter {
            pairs.push(("%24filter", QueryValue::String(filter.clone())));
        }
        if let Some(search) = &self.search {
            pairs.push(("%24search", QueryValue::String(search.clone())));
        }
        pairs
    }
}

fn push_list(pairs: &mut Vec<(&'static str, QueryValue)>, name: &'static str, values: &[String]) {
    if !values.is_empty() {
        pairs.push((name, QueryValue::List(values.to_vec())));
    }
}

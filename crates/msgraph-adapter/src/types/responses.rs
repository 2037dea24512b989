/*
[INPUT]:  Paged collection bodies returned by Graph
[OUTPUT]: Generic collection envelope with paging links
[POS]:    Data layer - response wrappers
[UPDATE]: When collection envelopes gain annotations
*/

use serde::{Deserialize, Serialize};

/// `{"value": [...], "@odata.nextLink": ...}` page of a collection.
///
/// Links are opaque and must be followed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink", default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
    #[serde(rename = "@odata.deltaLink", default, skip_serializing_if = "Option::is_none")]
    pub delta_link: Option<String>,
    #[serde(rename = "@odata.count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl<T> Default for CollectionResponse<T> {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            next_link: None,
            delta_link: None,
            count: None,
        }
    }
}

impl<T> CollectionResponse<T> {
    pub fn has_next_page(&self) -> bool {
        self.next_link.as_deref().is_some_and(|link| !link.is_empty())
    }
}

/// Collection of plain strings, e.g. the group ids from `checkMemberGroups`
pub type StringCollectionResponse = CollectionResponse<String>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::User;

    #[test]
    fn test_collection_links_are_opaque() {
        let page: CollectionResponse<User> = serde_json::from_str(
            r#"{
                "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#users",
                "@odata.count": 12,
                "@odata.nextLink": "https://graph.microsoft.com/v1.0/users?$skiptoken=RFNwdAIAAQAAAD8",
                "value": [{"id": "1"}, {"id": "2"}]
            }"#,
        )
        .unwrap();

        assert_eq!(page.value.len(), 2);
        assert_eq!(page.count, Some(12));
        assert!(page.has_next_page());
        assert_eq!(
            page.next_link.as_deref(),
            Some("https://graph.microsoft.com/v1.0/users?$skiptoken=RFNwdAIAAQAAAD8")
        );
    }

    #[test]
    fn test_missing_value_is_empty() {
        let page: StringCollectionResponse =
            serde_json::from_str(r#"{"@odata.deltaLink": "https://x/delta?token=1"}"#).unwrap();
        assert!(page.value.is_empty());
        assert!(!page.has_next_page());
        assert_eq!(page.delta_link.as_deref(), Some("https://x/delta?token=1"));
    }
}

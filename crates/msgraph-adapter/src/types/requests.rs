/*
[INPUT]:  Action and reference payloads sent to Graph
[OUTPUT]: Serializable request bodies
[POS]:    Data layer - request body definitions
[UPDATE]: When new actions need a body type
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body for `POST .../$ref`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCreate {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
}

impl ReferenceCreate {
    /// Reference to a directory object under `base_url`
    pub fn directory_object(base_url: &str, id: &str) -> Self {
        Self {
            odata_id: format!(
                "{}/directoryObjects/{}",
                base_url.trim_end_matches('/'),
                id
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckMemberGroupsBody {
    pub group_ids: Vec<String>,
}

/// Body for the workbook `abs` function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbsBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Value>,
}

/*
[INPUT]:  Graph reports resource
[OUTPUT]: Report root model
[POS]:    Data layer - reports definitions
[UPDATE]: When the reports singleton gains properties
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `/reports` singleton; usage reports themselves are CSV streams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRoot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@odata.type", default, skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(flatten)]
    pub additional_data: HashMap<String, Value>,
}

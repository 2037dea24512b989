/*
[INPUT]:  Graph directory schemas (entity, user, group) and serde requirements
[OUTPUT]: Typed directory models with discriminator-based decoding
[POS]:    Data layer - directory object definitions
[UPDATE]: When directory resources gain properties or derived types
*/

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub const USER_ODATA_TYPE: &str = "#microsoft.graph.user";
pub const GROUP_ODATA_TYPE: &str = "#microsoft.graph.group";

/// Base shape of every Graph entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@odata.type", default, skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(flatten)]
    pub additional_data: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_change_password_next_sign_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_change_password_next_sign_in_with_mfa: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedLicense {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_plans: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<String>,
}

/// Microsoft Entra user account.
///
/// Every property is optional so a partially populated value doubles as a
/// PATCH body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@odata.type", default, skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_licenses: Option<Vec<AssignedLicense>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_phones: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_profile: Option<PasswordProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Properties not modelled above
    #[serde(flatten)]
    pub additional_data: HashMap<String, Value>,
}

impl User {
    /// Empty user carrying its discriminator
    pub fn new() -> Self {
        Self {
            odata_type: Some(USER_ODATA_TYPE.to_string()),
            ..Self::default()
        }
    }
}

/// Microsoft 365 or security group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "@odata.type", default, skip_serializing_if = "Option::is_none")]
    pub odata_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewed_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Directory object URLs bound as members on create
    #[serde(rename = "members@odata.bind", default, skip_serializing_if = "Option::is_none")]
    pub members_odata_bind: Option<Vec<String>>,
    /// Directory object URLs bound as owners on create
    #[serde(rename = "owners@odata.bind", default, skip_serializing_if = "Option::is_none")]
    pub owners_odata_bind: Option<Vec<String>>,
    #[serde(flatten)]
    pub additional_data: HashMap<String, Value>,
}

impl Group {
    pub fn new() -> Self {
        Self {
            odata_type: Some(GROUP_ODATA_TYPE.to_string()),
            ..Self::default()
        }
    }
}

/// Polymorphic directory object, resolved from `@odata.type`
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryObject {
    User(Box<User>),
    Group(Box<Group>),
    Other(Entity),
}

impl DirectoryObject {
    pub fn id(&self) -> Option<&str> {
        match self {
            DirectoryObject::User(user) => user.id.as_deref(),
            DirectoryObject::Group(group) => group.id.as_deref(),
            DirectoryObject::Other(entity) => entity.id.as_deref(),
        }
    }

    pub fn odata_type(&self) -> Option<&str> {
        match self {
            DirectoryObject::User(_) => Some(USER_ODATA_TYPE),
            DirectoryObject::Group(_) => Some(GROUP_ODATA_TYPE),
            DirectoryObject::Other(entity) => entity.odata_type.as_deref(),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            DirectoryObject::User(user) => user.display_name.as_deref(),
            DirectoryObject::Group(group) => group.display_name.as_deref(),
            DirectoryObject::Other(entity) => entity
                .additional_data
                .get("displayName")
                .and_then(Value::as_str),
        }
    }
}

impl<'de> Deserialize<'de> for DirectoryObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let discriminator = value
            .get("@odata.type")
            .and_then(Value::as_str)
            .map(str::to_string);

        match discriminator.as_deref() {
            Some(USER_ODATA_TYPE) => serde_json::from_value(value)
                .map(|user| DirectoryObject::User(Box::new(user)))
                .map_err(D::Error::custom),
            Some(GROUP_ODATA_TYPE) => serde_json::from_value(value)
                .map(|group| DirectoryObject::Group(Box::new(group)))
                .map_err(D::Error::custom),
            _ => serde_json::from_value(value)
                .map(DirectoryObject::Other)
                .map_err(D::Error::custom),
        }
    }
}

impl Serialize for DirectoryObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut value = match self {
            DirectoryObject::User(user) => serde_json::to_value(user),
            DirectoryObject::Group(group) => serde_json::to_value(group),
            DirectoryObject::Other(entity) => serde_json::to_value(entity),
        }
        .map_err(S::Error::custom)?;

        if let (Some(object), Some(odata_type)) = (value.as_object_mut(), self.odata_type()) {
            object
                .entry("@odata.type")
                .or_insert_with(|| Value::String(odata_type.to_string()));
        }
        value.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_keeps_unknown_properties() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "87d349ed-44d7-43e1-9a83-5f2406dee5bd",
            "displayName": "Adele Vance",
            "userPrincipalName": "AdeleV@contoso.com",
            "businessPhones": ["+1 425 555 0109"],
            "employeeId": "1234"
        }))
        .unwrap();

        assert_eq!(user.display_name.as_deref(), Some("Adele Vance"));
        assert_eq!(user.business_phones.as_ref().map(Vec::len), Some(1));
        assert_eq!(
            user.additional_data.get("employeeId"),
            Some(&Value::String("1234".to_string()))
        );
    }

    #[test]
    fn test_partial_user_serializes_only_set_fields() {
        let patch = User {
            job_title: Some("Retail Manager".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"jobTitle": "Retail Manager"})
        );
    }

    #[test]
    fn test_group_odata_bind_names() {
        let group = Group {
            display_name: Some("Library Assist".to_string()),
            members_odata_bind: Some(vec![
                "https://graph.microsoft.com/v1.0/users/1".to_string(),
            ]),
            ..Group::new()
        };

        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value["@odata.type"], GROUP_ODATA_TYPE);
        assert_eq!(
            value["members@odata.bind"][0],
            "https://graph.microsoft.com/v1.0/users/1"
        );
    }

    #[test]
    fn test_directory_object_discriminator() {
        let objects: Vec<DirectoryObject> = serde_json::from_value(serde_json::json!([
            {"@odata.type": "#microsoft.graph.user", "id": "1", "displayName": "Adele"},
            {"@odata.type": "#microsoft.graph.group", "id": "2", "securityEnabled": true},
            {"@odata.type": "#microsoft.graph.device", "id": "3", "displayName": "Laptop"},
            {"id": "4"}
        ]))
        .unwrap();

        assert!(matches!(&objects[0], DirectoryObject::User(user) if user.display_name.as_deref() == Some("Adele")));
        assert!(matches!(&objects[1], DirectoryObject::Group(group) if group.security_enabled == Some(true)));
        assert!(matches!(&objects[2], DirectoryObject::Other(_)));
        assert_eq!(objects[2].odata_type(), Some("#microsoft.graph.device"));
        assert_eq!(objects[2].display_name(), Some("Laptop"));
        assert_eq!(objects[3].id(), Some("4"));
        assert_eq!(objects[3].odata_type(), None);
    }

    #[test]
    fn test_directory_object_serializes_discriminator() {
        let object = DirectoryObject::User(Box::new(User {
            id: Some("1".to_string()),
            ..Default::default()
        }));

        let value = serde_json::to_value(&object).unwrap();
        assert_eq!(value, serde_json::json!({"@odata.type": USER_ODATA_TYPE, "id": "1"}));
    }
}

/*
[INPUT]:  Group ids, member references and group bodies
[OUTPUT]: Requests against /groups and group membership
[POS]:    Builder layer - group resources
[UPDATE]: When group navigation properties or actions are added
*/

use super::count::GroupsCountRequestBuilder;
use super::{BaseRequestBuilder, JSON};
use crate::http::Result;
use crate::request::{
    CollectionQueryParameters, HttpMethod, ItemQueryParameters, RequestConfiguration,
    RequestInformation,
};
use crate::types::{CollectionResponse, DirectoryObject, Group, ReferenceCreate};

const GROUPS: &str = "{+baseurl}/groups{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
const GROUPS_COUNT: &str = "{+baseurl}/groups/$count{?%24filter,%24search}";
const GROUP_ITEM: &str = "{+baseurl}/groups/{group%2Did}{?%24expand,%24select}";
const GROUP_MEMBERS: &str = "{+baseurl}/groups/{group%2Did}/members{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
const GROUP_MEMBERS_REF: &str = "{+baseurl}/groups/{group%2Did}/members/$ref";
const GROUP_MEMBER_ITEM: &str = "{+baseurl}/groups/{group%2Did}/members/{directoryObject%2Did}";
const GROUP_MEMBER_ITEM_REF: &str = "{+baseurl}/groups/{group%2Did}/members/{directoryObject%2Did}/$ref";

/// `/groups`
#[derive(Debug, Clone)]
pub struct GroupsRequestBuilder {
    base: BaseRequestBuilder,
}

impl GroupsRequestBuilder {
    pub(crate) fn from_parent(parent: &BaseRequestBuilder) -> Self {
        Self {
            base: parent.child(GROUPS),
        }
    }

    pub fn by_group_id(&self, group_id: impl Into<String>) -> GroupItemRequestBuilder {
        GroupItemRequestBuilder {
            base: self.base.child_with(GROUP_ITEM, "group%2Did", group_id),
        }
    }

    pub fn count(&self) -> GroupsCountRequestBuilder {
        GroupsCountRequestBuilder::from_parent(&self.base, GROUPS_COUNT)
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration<CollectionQueryParameters>>,
    ) -> RequestInformation {
        self.base.request_information(HttpMethod::Get, JSON, config)
    }

    pub async fn get(
        &self,
        config: Option<&RequestConfiguration<CollectionQueryParameters>>,
    ) -> Result<CollectionResponse<Group>> {
        let info = self.to_get_request_information(config);
        self.base.send_json(info).await
    }

    pub fn to_post_request_information(
        &self,
        body: &Group,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.base.request_information(HttpMethod::Post, JSON, config);
        info.set_json_content(body)?;
        Ok(info)
    }

    /// Create a group; members and owners may be bound with `@odata.bind`
    pub async fn post(&self, body: &Group, config: Option<&RequestConfiguration>) -> Result<Group> {
        let info = self.to_post_request_information(body, config)?;
        self.base.send_json(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

/// `/groups/{group-id}`
#[derive(Debug, Clone)]
pub struct GroupItemRequestBuilder {
    base: BaseRequestBuilder,
}

impl GroupItemRequestBuilder {
    pub fn members(&self) -> GroupMembersRequestBuilder {
        GroupMembersRequestBuilder {
            base: self.base.child(GROUP_MEMBERS),
        }
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration<ItemQueryParameters>>,
    ) -> RequestInformation {
        self.base.request_information(HttpMethod::Get, JSON, config)
    }

    pub async fn get(
        &self,
        config: Option<&RequestConfiguration<ItemQueryParameters>>,
    ) -> Result<Group> {
        let info = self.to_get_request_information(config);
        self.base.send_json(info).await
    }

    pub fn to_patch_request_information(
        &self,
        body: &Group,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.base.request_information(HttpMethod::Patch, JSON, config);
        info.set_json_content(body)?;
        Ok(info)
    }

    pub async fn patch(
        &self,
        body: &Group,
        config: Option<&RequestConfiguration>,
    ) -> Result<Option<Group>> {
        let info = self.to_patch_request_information(body, config)?;
        self.base.send_json_optional(info).await
    }

    pub fn to_delete_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> RequestInformation {
        self.base.request_information(HttpMethod::Delete, JSON, config)
    }

    pub async fn delete(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        let info = self.to_delete_request_information(config);
        self.base.send_no_content(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

/// `/groups/{group-id}/members`
#[derive(Debug, Clone)]
pub struct GroupMembersRequestBuilder {
    base: BaseRequestBuilder,
}

impl GroupMembersRequestBuilder {
    /// `$ref` segment used to add members
    pub fn reference(&self) -> GroupMembersRefRequestBuilder {
        GroupMembersRefRequestBuilder {
            base: self.base.child(GROUP_MEMBERS_REF),
        }
    }

    pub fn by_directory_object_id(
        &self,
        directory_object_id: impl Into<String>,
    ) -> GroupMemberItemRequestBuilder {
        GroupMemberItemRequestBuilder {
            base: self.base.child_with(
                GROUP_MEMBER_ITEM,
                "directoryObject%2Did",
                directory_object_id,
            ),
        }
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration<CollectionQueryParameters>>,
    ) -> RequestInformation {
        self.base.request_information(HttpMethod::Get, JSON, config)
    }

    /// Direct members; users, groups, devices and service principals alike
    pub async fn get(
        &self,
        config: Option<&RequestConfiguration<CollectionQueryParameters>>,
    ) -> Result<CollectionResponse<DirectoryObject>> {
        let info = self.to_get_request_information(config);
        self.base.send_json(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

/// `/groups/{group-id}/members/$ref`
#[derive(Debug, Clone)]
pub struct GroupMembersRefRequestBuilder {
    base: BaseRequestBuilder,
}

impl GroupMembersRefRequestBuilder {
    pub fn to_post_request_information(
        &self,
        body: &ReferenceCreate,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.base.request_information(HttpMethod::Post, JSON, config);
        info.set_json_content(body)?;
        Ok(info)
    }

    /// Add the referenced directory object as a member
    pub async fn post(
        &self,
        body: &ReferenceCreate,
        config: Option<&RequestConfiguration>,
    ) -> Result<()> {
        let info = self.to_post_request_information(body, config)?;
        self.base.send_no_content(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

/// `/groups/{group-id}/members/{directoryObject-id}`, navigation only
#[derive(Debug, Clone)]
pub struct GroupMemberItemRequestBuilder {
    base: BaseRequestBuilder,
}

impl GroupMemberItemRequestBuilder {
    pub fn reference(&self) -> GroupMemberItemRefRequestBuilder {
        GroupMemberItemRefRequestBuilder {
            base: self.base.child(GROUP_MEMBER_ITEM_REF),
        }
    }
}

/// `/groups/{group-id}/members/{directoryObject-id}/$ref`
#[derive(Debug, Clone)]
pub struct GroupMemberItemRefRequestBuilder {
    base: BaseRequestBuilder,
}

impl GroupMemberItemRefRequestBuilder {
    pub fn to_delete_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> RequestInformation {
        self.base.request_information(HttpMethod::Delete, JSON, config)
    }

    /// Remove the member; the directory object itself is untouched
    pub async fn delete(&self, config: Option<&RequestConfiguration>) -> Result<()> {
        let info = self.to_delete_request_information(config);
        self.base.send_no_content(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

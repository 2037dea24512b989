/*
[INPUT]:  User ids, OData query options and user bodies
[OUTPUT]: Requests against /users and its navigation properties
[POS]:    Builder layer - user resources
[UPDATE]: When user navigation properties or actions are added
*/

use super::count::UsersCountRequestBuilder;
use super::{BaseRequestBuilder, JSON};
use crate::http::Result;
use crate::request::{
    CollectionQueryParameters, HttpMethod, ItemQueryParameters, RequestConfiguration,
    RequestInformation,
};
use crate::types::{
    CheckMemberGroupsBody, CollectionResponse, DirectoryObject, StringCollectionResponse, User,
};

const USERS: &str = "{+baseurl}/users{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
const USERS_COUNT: &str = "{+baseurl}/users/$count{?%24filter,%24search}";
const USERS_DELTA: &str = "{+baseurl}/users/delta(){?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
const USER_ITEM: &str = "{+baseurl}/users/{user%2Did}{?%24expand,%24select}";
const USER_MEMBER_OF: &str = "{+baseurl}/users/{user%2Did}/memberOf{?%24count,%24expand,%24filter,%24orderby,%24search,%24select,%24skip,%24top}";
const USER_CHECK_MEMBER_GROUPS: &str = "{+baseurl}/users/{user%2Did}/checkMemberGroups";

pub(crate) const USER_ID: &str = "user%2Did";

/// `/users`
#[derive(Debug, Clone)]
pub struct UsersRequestBuilder {
    base: BaseRequestBuilder,
}

impl UsersRequestBuilder {
    pub(crate) fn from_parent(parent: &BaseRequestBuilder) -> Self {
        Self {
            base: parent.child(USERS),
        }
    }

    /// Navigate to a single user by id or user principal name
    pub fn by_user_id(&self, user_id: impl Into<String>) -> UserItemRequestBuilder {
        UserItemRequestBuilder {
            base: self.base.child_with(USER_ITEM, USER_ID, user_id),
        }
    }

    pub fn count(&self) -> UsersCountRequestBuilder {
        UsersCountRequestBuilder::from_parent(&self.base, USERS_COUNT)
    }

    pub fn delta(&self) -> UsersDeltaRequestBuilder {
        UsersDeltaRequestBuilder {
            base: self.base.child(USERS_DELTA),
        }
    }

    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration<CollectionQueryParameters>>,
    ) -> RequestInformation {
        self.base.request_information(HttpMethod::Get, JSON, config)
    }

    /// List users; follow `@odata.nextLink` with a [`crate::PageIterator`]
    pub async fn get(
        &self,
        config: Option<&RequestConfiguration<CollectionQueryParameters>>,
    ) -> Result<CollectionResponse<User>> {
        let info = self.to_get_request_information(config);
        self.base.send_json(info).await
    }

    pub fn to_post_request_information(
        &self,
        body: &User,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.base.request_information(HttpMethod::Post, JSON, config);
        info.set_json_content(body)?;
        Ok(info)
    }

    /// Create a user
    pub async fn post(&self, body: &User, config: Option<&RequestConfiguration>) -> Result<User> {
        let info = self.to_post_request_information(body, config)?;
        self.base.send_json(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

/// `/users/delta()`
#[derive(Debug, Clone)]
pub struct UsersDeltaRequestBuilder {
    base: BaseRequestBuilder,
}

impl UsersDeltaRequestBuilder {
    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration<CollectionQueryParameters>>,
    ) -> RequestInformation {
        self.base.request_information(HttpMethod::Get, JSON, config)
    }

    /// Changed users; the last page carries `@odata.deltaLink`
    pub async fn get(
        &self,
        config: Option<&RequestConfiguration<CollectionQueryParameters>>,
    ) -> Result<CollectionResponse<User>> {
        let info = self.to_get_request_information(config);
        self.base.send_json(info).await
    }

    /// Resume from a stored delta or next link
    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

/// `/users/{user-id}`
#[derive(Debug, Clone)]
pub struct UserItemRequestBuilder {
    base: BaseRequestBuilder,
}

impl UserItemRequestBuilder {
    pub fn member_of(&self) -> UserMemberOfRequestBuilder {
        UserMemberOfRequestBuilder {
            base: self.base.child(USER_MEMBER_OF),
        }
    }

    pub fn check_member_groups(&self) -> UserCheckMemberGroupsRequestBuilder {
        UserCheckMemberGroupsRequestBuilder {
            base: self.base.child(USER_CHECK_MEMBER_GROUPS),
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
    ) -> Result<User> {
        let info = self.to_get_request_information(config);
        self.base.send_json(info).await
    }

    pub fn to_patch_request_information(
        &self,
        body: &User,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.base.request_information(HttpMethod::Patch, JSON, config);
        info.set_json_content(body)?;
        Ok(info)
    }

    /// Update the properties set on `body`; `None` when Graph answers 204
    pub async fn patch(
        &self,
        body: &User,
        config: Option<&RequestConfiguration>,
    ) -> Result<Option<User>> {
        let info = self.to_patch_request_information(body, config)?;
        self.base.send_json_optional(info).await
    }

    pub fn to_delete_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> RequestInformation {
        self.base.request_information(HttpMethod::Delete, JSON, config)
    }

    /// Delete the user; it stays restorable from deleted items for 30 days
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

/// `/users/{user-id}/memberOf`
#[derive(Debug, Clone)]
pub struct UserMemberOfRequestBuilder {
    base: BaseRequestBuilder,
}

impl UserMemberOfRequestBuilder {
    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration<CollectionQueryParameters>>,
    ) -> RequestInformation {
        self.base.request_information(HttpMethod::Get, JSON, config)
    }

    /// Groups, directory roles and administrative units the user is a direct member of
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

/// `/users/{user-id}/checkMemberGroups`
#[derive(Debug, Clone)]
pub struct UserCheckMemberGroupsRequestBuilder {
    base: BaseRequestBuilder,
}

impl UserCheckMemberGroupsRequestBuilder {
    pub fn to_post_request_information(
        &self,
        body: &CheckMemberGroupsBody,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.base.request_information(HttpMethod::Post, JSON, config);
        info.set_json_content(body)?;
        Ok(info)
    }

    /// Subset of `body.group_ids` the user is a transitive member of
    pub async fn post(
        &self,
        body: &CheckMemberGroupsBody,
        config: Option<&RequestConfiguration>,
    ) -> Result<StringCollectionResponse> {
        let info = self.to_post_request_information(body, config)?;
        self.base.send_json(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

/*
[INPUT]:  Drive ids, drive item ids and workbook function arguments
[OUTPUT]: Requests against Excel workbook functions stored in drives
[POS]:    Builder layer - drive and workbook resources
[UPDATE]: When more workbook functions are exposed
*/

use super::{BaseRequestBuilder, JSON};
use crate::http::Result;
use crate::request::{HttpMethod, ItemQueryParameters, RequestConfiguration, RequestInformation};
use crate::types::{AbsBody, WorkbookFunctionResult, WorkbookFunctions};

const DRIVE: &str = "{+baseurl}/drives/{drive%2Did}";
const DRIVE_ITEM: &str = "{+baseurl}/drives/{drive%2Did}/items/{driveItem%2Did}";
const WORKBOOK: &str = "{+baseurl}/drives/{drive%2Did}/items/{driveItem%2Did}/workbook";
const WORKBOOK_FUNCTIONS: &str = "{+baseurl}/drives/{drive%2Did}/items/{driveItem%2Did}/workbook/functions{?%24expand,%24select}";
const WORKBOOK_FUNCTIONS_ABS: &str = "{+baseurl}/drives/{drive%2Did}/items/{driveItem%2Did}/workbook/functions/abs";

/// `/drives`, navigation only
#[derive(Debug, Clone)]
pub struct DrivesRequestBuilder {
    base: BaseRequestBuilder,
}

impl DrivesRequestBuilder {
    pub(crate) fn from_parent(parent: &BaseRequestBuilder) -> Self {
        Self {
            base: parent.child("{+baseurl}/drives"),
        }
    }

    pub fn by_drive_id(&self, drive_id: impl Into<String>) -> DriveRequestBuilder {
        DriveRequestBuilder {
            base: self.base.child_with(DRIVE, "drive%2Did", drive_id),
        }
    }
}

/// `/drives/{drive-id}`, navigation only
#[derive(Debug, Clone)]
pub struct DriveRequestBuilder {
    base: BaseRequestBuilder,
}

impl DriveRequestBuilder {
    pub fn items(&self) -> DriveItemsRequestBuilder {
        DriveItemsRequestBuilder {
            base: self.base.child("{+baseurl}/drives/{drive%2Did}/items"),
        }
    }
}

/// `/drives/{drive-id}/items`, navigation only
#[derive(Debug, Clone)]
pub struct DriveItemsRequestBuilder {
    base: BaseRequestBuilder,
}

impl DriveItemsRequestBuilder {
    pub fn by_drive_item_id(&self, drive_item_id: impl Into<String>) -> DriveItemRequestBuilder {
        DriveItemRequestBuilder {
            base: self.base.child_with(DRIVE_ITEM, "driveItem%2Did", drive_item_id),
        }
    }
}

/// `/drives/{drive-id}/items/{driveItem-id}`, navigation only
#[derive(Debug, Clone)]
pub struct DriveItemRequestBuilder {
    base: BaseRequestBuilder,
}

impl DriveItemRequestBuilder {
    pub fn workbook(&self) -> WorkbookRequestBuilder {
        WorkbookRequestBuilder {
            base: self.base.child(WORKBOOK),
        }
    }
}

/// `.../workbook`, navigation only
#[derive(Debug, Clone)]
pub struct WorkbookRequestBuilder {
    base: BaseRequestBuilder,
}

impl WorkbookRequestBuilder {
    pub fn functions(&self) -> WorkbookFunctionsRequestBuilder {
        WorkbookFunctionsRequestBuilder {
            base: self.base.child(WORKBOOK_FUNCTIONS),
        }
    }
}

/// `.../workbook/functions`
#[derive(Debug, Clone)]
pub struct WorkbookFunctionsRequestBuilder {
    base: BaseRequestBuilder,
}

impl WorkbookFunctionsRequestBuilder {
    pub fn abs(&self) -> WorkbookFunctionsAbsRequestBuilder {
        WorkbookFunctionsAbsRequestBuilder {
            base: self.base.child(WORKBOOK_FUNCTIONS_ABS),
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
    ) -> Result<WorkbookFunctions> {
        let info = self.to_get_request_information(config);
        self.base.send_json(info).await
    }

    pub fn to_patch_request_information(
        &self,
        body: &WorkbookFunctions,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.base.request_information(HttpMethod::Patch, JSON, config);
        info.set_json_content(body)?;
        Ok(info)
    }

    pub async fn patch(
        &self,
        body: &WorkbookFunctions,
        config: Option<&RequestConfiguration>,
    ) -> Result<Option<WorkbookFunctions>> {
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

/// `.../workbook/functions/abs`
#[derive(Debug, Clone)]
pub struct WorkbookFunctionsAbsRequestBuilder {
    base: BaseRequestBuilder,
}

impl WorkbookFunctionsAbsRequestBuilder {
    pub fn to_post_request_information(
        &self,
        body: &AbsBody,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.base.request_information(HttpMethod::Post, JSON, config);
        info.set_json_content(body)?;
        Ok(info)
    }

    /// Absolute value of `body.number`
    pub async fn post(
        &self,
        body: &AbsBody,
        config: Option<&RequestConfiguration>,
    ) -> Result<WorkbookFunctionResult> {
        let info = self.to_post_request_information(body, config)?;
        self.base.send_json(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

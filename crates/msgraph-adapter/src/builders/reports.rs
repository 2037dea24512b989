/*
[INPUT]:  Report function names and reporting periods
[OUTPUT]: Requests against /reports and its CSV usage functions
[POS]:    Builder layer - usage reports
[UPDATE]: When more report functions get dedicated helpers
*/

use chrono::NaiveDate;

use super::{BaseRequestBuilder, JSON};
use crate::http::{GraphError, Result};
use crate::request::{HttpMethod, ItemQueryParameters, RequestConfiguration, RequestInformation};
use crate::types::ReportRoot;

const REPORTS: &str = "{+baseurl}/reports{?%24expand,%24select}";
const OCTET_STREAM: &str = "application/octet-stream, application/json";

/// `/reports`
#[derive(Debug, Clone)]
pub struct ReportsRequestBuilder {
    base: BaseRequestBuilder,
}

impl ReportsRequestBuilder {
    pub(crate) fn from_parent(parent: &BaseRequestBuilder) -> Self {
        Self {
            base: parent.child(REPORTS),
        }
    }

    /// Any `<function>(period='{period}')` usage report.
    ///
    /// `function` must be a bare identifier such as `getMailboxUsageDetail`.
    pub fn usage_report(
        &self,
        function: &str,
        period: impl Into<String>,
    ) -> Result<ReportFunctionRequestBuilder> {
        check_function_name(function)?;
        Ok(self.function(function, period))
    }

    /// Any `<function>(date={date})` usage report, for example
    /// `getOffice365ActiveUserDetail` for a single day.
    pub fn usage_report_with_date(
        &self,
        function: &str,
        date: NaiveDate,
    ) -> Result<ReportFunctionRequestBuilder> {
        check_function_name(function)?;
        Ok(self.dated_function(function, date))
    }

    pub fn get_email_activity_user_detail_with_date(
        &self,
        date: NaiveDate,
    ) -> ReportFunctionRequestBuilder {
        self.dated_function("getEmailActivityUserDetail", date)
    }

    pub fn get_office365_active_user_detail_with_date(
        &self,
        date: NaiveDate,
    ) -> ReportFunctionRequestBuilder {
        self.dated_function("getOffice365ActiveUserDetail", date)
    }

    pub fn get_teams_user_activity_user_detail_with_date(
        &self,
        date: NaiveDate,
    ) -> ReportFunctionRequestBuilder {
        self.dated_function("getTeamsUserActivityUserDetail", date)
    }

    pub fn get_email_activity_user_detail_with_period(
        &self,
        period: impl Into<String>,
    ) -> ReportFunctionRequestBuilder {
        self.function("getEmailActivityUserDetail", period)
    }

    pub fn get_mailbox_usage_detail_with_period(
        &self,
        period: impl Into<String>,
    ) -> ReportFunctionRequestBuilder {
        self.function("getMailboxUsageDetail", period)
    }

    pub fn get_office365_active_user_detail_with_period(
        &self,
        period: impl Into<String>,
    ) -> ReportFunctionRequestBuilder {
        self.function("getOffice365ActiveUserDetail", period)
    }

    pub fn get_teams_user_activity_user_detail_with_period(
        &self,
        period: impl Into<String>,
    ) -> ReportFunctionRequestBuilder {
        self.function("getTeamsUserActivityUserDetail", period)
    }

    fn function(&self, function: &str, period: impl Into<String>) -> ReportFunctionRequestBuilder {
        let template = format!("{{+baseurl}}/reports/{function}(period='{{period}}')");
        ReportFunctionRequestBuilder {
            base: self.base.child_with(template, "period", period),
        }
    }

    fn dated_function(&self, function: &str, date: NaiveDate) -> ReportFunctionRequestBuilder {
        let template = format!("{{+baseurl}}/reports/{function}(date={{date}})");
        ReportFunctionRequestBuilder {
            base: self
                .base
                .child_with(template, "date", date.format("%Y-%m-%d").to_string()),
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
    ) -> Result<ReportRoot> {
        let info = self.to_get_request_information(config);
        self.base.send_json(info).await
    }

    pub fn to_patch_request_information(
        &self,
        body: &ReportRoot,
        config: Option<&RequestConfiguration>,
    ) -> Result<RequestInformation> {
        let mut info = self.base.request_information(HttpMethod::Patch, JSON, config);
        info.set_json_content(body)?;
        Ok(info)
    }

    pub async fn patch(
        &self,
        body: &ReportRoot,
        config: Option<&RequestConfiguration>,
    ) -> Result<Option<ReportRoot>> {
        let info = self.to_patch_request_information(body, config)?;
        self.base.send_json_optional(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

fn check_function_name(function: &str) -> Result<()> {
    if function.is_empty() || !function.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(GraphError::UrlTemplate(format!(
            "invalid report function name '{function}'"
        )));
    }
    Ok(())
}

/// `/reports/<function>(period='{period}')` or `/reports/<function>(date={date})`
#[derive(Debug, Clone)]
pub struct ReportFunctionRequestBuilder {
    base: BaseRequestBuilder,
}

impl ReportFunctionRequestBuilder {
    pub fn to_get_request_information(
        &self,
        config: Option<&RequestConfiguration>,
    ) -> RequestInformation {
        self.base
            .request_information(HttpMethod::Get, OCTET_STREAM, config)
    }

    /// Raw CSV report; an empty body yields an empty report
    pub async fn get(&self, config: Option<&RequestConfiguration>) -> Result<Vec<u8>> {
        let info = self.to_get_request_information(config);
        self.base.send_bytes(info).await
    }

    pub fn with_url(&self, raw_url: impl Into<String>) -> Self {
        Self {
            base: self.base.with_raw_url(raw_url),
        }
    }
}

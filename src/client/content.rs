//! Content localization endpoints (`/localization/...`)

use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::protocol::{ApiRequest, ApiResponse};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocalizeBody<'a, C: ?Sized> {
    content: &'a C,
    target_regions: &'a [&'a str],
}

pub struct ContentService<'a> {
    client: &'a ApiClient,
}

impl<'a> ContentService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// POST `/localization/localize` with `{content, targetRegions}`
    pub async fn localize_content<C: Serialize + ?Sized>(
        &self,
        content: &C,
        target_regions: &[&str],
    ) -> ApiResult<ApiResponse> {
        let request = Self::localize_content_request(content, target_regions)?;
        self.client.execute(request).await
    }

    pub fn localize_content_request<C: Serialize + ?Sized>(
        content: &C,
        target_regions: &[&str],
    ) -> ApiResult<ApiRequest> {
        ApiRequest::post("/localization/localize").json(&LocalizeBody {
            content,
            target_regions,
        })
    }

    /// GET `/localization/performance/{contentId}?regions=..`
    pub async fn regional_performance(
        &self,
        content_id: &str,
        regions: &[&str],
    ) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::regional_performance_request(content_id, regions))
            .await
    }

    pub fn regional_performance_request(content_id: &str, regions: &[&str]) -> ApiRequest {
        ApiRequest::get("/localization/performance")
            .segment(content_id)
            .query_all("regions", regions)
    }

    /// GET `/localization/strategy/{region}?industry=..`
    pub async fn regional_strategy(&self, region: &str, industry: &str) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::regional_strategy_request(region, industry))
            .await
    }

    pub fn regional_strategy_request(region: &str, industry: &str) -> ApiRequest {
        ApiRequest::get("/localization/strategy")
            .segment(region)
            .query("industry", industry)
    }

    pub async fn engagement_analytics(&self, region: &str) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::engagement_analytics_request(region))
            .await
    }

    pub fn engagement_analytics_request(region: &str) -> ApiRequest {
        ApiRequest::get("/localization/analytics/engagement").segment(region)
    }

    pub async fn content_effectiveness(
        &self,
        content_id: &str,
        region: &str,
    ) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::content_effectiveness_request(content_id, region))
            .await
    }

    pub fn content_effectiveness_request(content_id: &str, region: &str) -> ApiRequest {
        ApiRequest::get("/localization/analytics/effectiveness")
            .segment(content_id)
            .query("region", region)
    }

    pub async fn optimization_recommendations(
        &self,
        content_id: &str,
        region: &str,
    ) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::optimization_recommendations_request(content_id, region))
            .await
    }

    pub fn optimization_recommendations_request(content_id: &str, region: &str) -> ApiRequest {
        ApiRequest::get("/localization/analytics/recommendations")
            .segment(content_id)
            .query("region", region)
    }

    /// POST `/localization/monitor/{contentId}?regions=..` (no body)
    pub async fn start_monitoring(
        &self,
        content_id: &str,
        regions: &[&str],
    ) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::start_monitoring_request(content_id, regions))
            .await
    }

    pub fn start_monitoring_request(content_id: &str, regions: &[&str]) -> ApiRequest {
        ApiRequest::post("/localization/monitor")
            .segment(content_id)
            .query_all("regions", regions)
    }

    pub async fn update_timing(&self, content_id: &str, region: &str) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::update_timing_request(content_id, region))
            .await
    }

    pub fn update_timing_request(content_id: &str, region: &str) -> ApiRequest {
        ApiRequest::get("/localization/monitor/timing")
            .segment(content_id)
            .query("region", region)
    }
}

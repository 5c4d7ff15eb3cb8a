use super::ApiClient;
use crate::error::ApiResult;
use crate::protocol::{ApiRequest, ApiResponse};

pub struct TrendService<'a> {
    client: &'a ApiClient,
}

impl<'a> TrendService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn industry_trends(&self, industry: &str) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::industry_trends_request(industry))
            .await
    }

    pub fn industry_trends_request(industry: &str) -> ApiRequest {
        ApiRequest::get("/trends/industry").segment(industry)
    }

    pub async fn regional_trends(&self, region: &str) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::regional_trends_request(region))
            .await
    }

    pub fn regional_trends_request(region: &str) -> ApiRequest {
        ApiRequest::get("/trends/region").segment(region)
    }

    pub async fn predicted_trends(&self, industry: &str, timeframe: &str) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::predicted_trends_request(industry, timeframe))
            .await
    }

    pub fn predicted_trends_request(industry: &str, timeframe: &str) -> ApiRequest {
        ApiRequest::get("/trends/predicted")
            .query("industry", industry)
            .query("timeframe", timeframe)
    }
}

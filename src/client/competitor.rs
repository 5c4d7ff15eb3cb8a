use super::ApiClient;
use crate::error::ApiResult;
use crate::protocol::{ApiRequest, ApiResponse};

pub struct CompetitorService<'a> {
    client: &'a ApiClient,
}

impl<'a> CompetitorService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// POST `/competitor-analysis/analyze?industry=..`.
    ///
    /// The competitor list is the whole JSON body, not nested under a field.
    pub async fn analyze_competitors(
        &self,
        industry: &str,
        competitors: &[&str],
    ) -> ApiResult<ApiResponse> {
        let request = Self::analyze_competitors_request(industry, competitors)?;
        self.client.execute(request).await
    }

    pub fn analyze_competitors_request(
        industry: &str,
        competitors: &[&str],
    ) -> ApiResult<ApiRequest> {
        ApiRequest::post("/competitor-analysis/analyze")
            .query("industry", industry)
            .json(competitors)
    }

    pub async fn competitive_advantage(&self, industry: &str) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::competitive_advantage_request(industry))
            .await
    }

    pub fn competitive_advantage_request(industry: &str) -> ApiRequest {
        ApiRequest::get("/competitor-analysis/competitive-advantage").segment(industry)
    }

    pub async fn predict_competitor_moves(
        &self,
        competitor: &str,
        industry: &str,
    ) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::predict_competitor_moves_request(competitor, industry))
            .await
    }

    pub fn predict_competitor_moves_request(competitor: &str, industry: &str) -> ApiRequest {
        ApiRequest::get("/competitor-analysis/predict")
            .segment(competitor)
            .query("industry", industry)
    }
}

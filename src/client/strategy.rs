use serde::Serialize;

use super::ApiClient;
use crate::error::ApiResult;
use crate::protocol::{ApiRequest, ApiResponse};

#[derive(Serialize)]
struct OptimizeBody<'a, C: ?Sized> {
    industry: &'a str,
    content: &'a C,
}

pub struct StrategyService<'a> {
    client: &'a ApiClient,
}

impl<'a> StrategyService<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn generate_strategy(&self, industry: &str) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::generate_strategy_request(industry))
            .await
    }

    pub fn generate_strategy_request(industry: &str) -> ApiRequest {
        ApiRequest::get("/industry/strategy").segment(industry)
    }

    pub async fn niche_strategy(&self, industry: &str, niche: &str) -> ApiResult<ApiResponse> {
        self.client
            .execute(Self::niche_strategy_request(industry, niche))
            .await
    }

    pub fn niche_strategy_request(industry: &str, niche: &str) -> ApiRequest {
        ApiRequest::get("/industry/niche-strategy")
            .query("industry", industry)
            .query("niche", niche)
    }

    /// POST `/industry/optimize` with `{industry, content}`
    pub async fn optimize_content<C: Serialize + ?Sized>(
        &self,
        industry: &str,
        content: &C,
    ) -> ApiResult<ApiResponse> {
        let request = Self::optimize_content_request(industry, content)?;
        self.client.execute(request).await
    }

    pub fn optimize_content_request<C: Serialize + ?Sized>(
        industry: &str,
        content: &C,
    ) -> ApiResult<ApiRequest> {
        ApiRequest::post("/industry/optimize").json(&OptimizeBody { industry, content })
    }
}

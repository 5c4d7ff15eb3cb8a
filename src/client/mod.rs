mod builder;
mod competitor;
mod content;
mod strategy;
mod trend;

pub use builder::ApiClientBuilder;
pub use competitor::CompetitorService;
pub use content::ContentService;
pub use strategy::StrategyService;
pub use trend::TrendService;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::sync::Arc;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::{ApiError, ApiResult};
use crate::protocol::{ApiRequest, ApiResponse};

/// Shared client for the content platform API.
///
/// Cloning is cheap: clones share the connection pool and the token provider.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    default_headers: HeaderMap,
    token_provider: Arc<dyn TokenProvider>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// Client using `API_BASE_URL` (or the default) and no token
    pub fn from_env() -> ApiResult<Self> {
        ApiClientBuilder::new().build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    pub fn content(&self) -> ContentService<'_> {
        ContentService::new(self)
    }

    pub fn competitor(&self) -> CompetitorService<'_> {
        CompetitorService::new(self)
    }

    pub fn strategy(&self) -> StrategyService<'_> {
        StrategyService::new(self)
    }

    pub fn trend(&self) -> TrendService<'_> {
        TrendService::new(self)
    }

    /// Turn a request description into a wire request.
    ///
    /// The token provider is consulted here, once per call, and its token is
    /// set on this request only. The default headers are never modified.
    pub async fn prepare(&self, request: &ApiRequest) -> ApiResult<reqwest::Request> {
        let url = request.url(&self.base_url)?;

        let mut builder = self
            .http
            .request(request.method().clone(), url)
            .headers(self.default_headers.clone());
        if let Some(body) = request.body() {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        let mut prepared = builder.build()?;

        match self.token_provider.token().await? {
            Some(token) if !token.is_empty() => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| ApiError::InvalidHeader(format!("Authorization: {}", e)))?;
                value.set_sensitive(true);
                prepared.headers_mut().insert(AUTHORIZATION, value);
            }
            _ => {
                tracing::trace!("No token available for {} {}", request.method(), request.path());
            }
        }

        Ok(prepared)
    }

    /// Send one request and hand back the response unchanged.
    ///
    /// Non-2xx statuses become [`ApiError::Status`]; nothing is retried.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let prepared = self.prepare(&request).await?;
        tracing::debug!("{} {}", prepared.method(), prepared.url());

        let response = self.http.execute(prepared).await?;
        let status = response.status();
        let response = ApiResponse::from_response(response).await?;
        tracing::debug!("{} {} -> {}", request.method(), request.path(), status);

        if !status.is_success() {
            tracing::warn!(
                "HTTP {} for {} {}",
                status,
                request.method(),
                request.path()
            );
            return Err(ApiError::Status {
                status,
                method: request.method().clone(),
                path: request.path(),
                body: response.data,
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{FnToken, StaticToken};
    use reqwest::header::CONTENT_TYPE;
    use serde_json::json;

    fn client_with<P: TokenProvider + 'static>(provider: P) -> ApiClient {
        ApiClient::builder()
            .base_url("http://localhost:8080/api/v1")
            .token_provider(provider)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_prepare_without_token() {
        let client = ApiClient::builder()
            .base_url("http://localhost:8080/api/v1")
            .build()
            .unwrap();
        let prepared = client
            .prepare(&ApiRequest::get("/trends/region").segment("EU"))
            .await
            .unwrap();

        assert_eq!(prepared.method(), &reqwest::Method::GET);
        assert_eq!(
            prepared.url().as_str(),
            "http://localhost:8080/api/v1/trends/region/EU"
        );
        assert_eq!(prepared.headers()[CONTENT_TYPE], "application/json");
        assert!(prepared.headers().get(AUTHORIZATION).is_none());
        assert!(prepared.body().is_none());
    }

    #[tokio::test]
    async fn test_prepare_with_token() {
        let client = client_with(StaticToken::new("abc"));
        let prepared = client
            .prepare(&ApiRequest::get("/trends/predicted"))
            .await
            .unwrap();

        let auth = &prepared.headers()[AUTHORIZATION];
        assert_eq!(auth, "Bearer abc");
        assert!(auth.is_sensitive());
        assert!(!client.default_headers().contains_key(AUTHORIZATION));
    }

    #[tokio::test]
    async fn test_empty_token_adds_no_header() {
        let client = client_with(StaticToken::new(""));
        let prepared = client
            .prepare(&ApiRequest::get("/trends/predicted"))
            .await
            .unwrap();
        assert!(prepared.headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_token_with_newline_is_rejected() {
        let client = client_with(StaticToken::new("abc\ndef"));
        let err = client
            .prepare(&ApiRequest::get("/trends/predicted"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidHeader(_)));
    }

    #[tokio::test]
    async fn test_token_is_read_at_prepare_time() {
        let current = Arc::new(std::sync::Mutex::new(None::<String>));
        let source = current.clone();
        let client = client_with(FnToken::new(move || source.lock().unwrap().clone()));
        let request = ApiRequest::get("/trends/predicted");

        let first = client.prepare(&request).await.unwrap();
        assert!(first.headers().get(AUTHORIZATION).is_none());

        *current.lock().unwrap() = Some("fresh".to_string());
        let second = client.prepare(&request).await.unwrap();
        assert_eq!(second.headers()[AUTHORIZATION], "Bearer fresh");
    }

    #[tokio::test]
    async fn test_prepare_serializes_body() {
        let client = client_with(StaticToken::new("abc"));
        let request = ApiRequest::post("/industry/optimize")
            .json(&json!({"industry": "retail", "content": "post"}))
            .unwrap();
        let prepared = client.prepare(&request).await.unwrap();

        let bytes = prepared.body().and_then(|b| b.as_bytes()).unwrap();
        let body: serde_json::Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(body, json!({"industry": "retail", "content": "post"}));
    }

    #[test]
    fn test_client_is_send_sync_clone() {
        fn assert_traits<T: Send + Sync + Clone>() {}
        assert_traits::<ApiClient>();
    }
}

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::ApiClient;
use crate::auth::{NoToken, TokenProvider};
use crate::config::{resolve_base_url, ClientConfig, ENV_BASE_URL};
use crate::error::{ApiError, ApiResult};

pub struct ApiClientBuilder {
    base_url: Option<String>,
    headers: Vec<(String, String)>,
    token_provider: Arc<dyn TokenProvider>,
    timeout_ms: Option<u64>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            headers: Vec::new(),
            token_provider: Arc::new(NoToken),
            timeout_ms: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let mut builder = Self::new().base_url(&config.base_url);
        builder.timeout_ms = config.timeout_ms;
        builder
    }

    /// Explicit base URL; when unset, `API_BASE_URL` or the default is used at build time
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Extra header sent with every request, next to `Content-Type: application/json`
    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn token_provider<P: TokenProvider + 'static>(mut self, provider: P) -> Self {
        self.token_provider = Arc::new(provider);
        self
    }

    pub fn shared_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = provider;
        self
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    pub fn build(self) -> ApiResult<ApiClient> {
        let base = self
            .base_url
            .unwrap_or_else(|| resolve_base_url(std::env::var(ENV_BASE_URL).ok()));
        let base_url =
            Url::parse(&base).map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", base, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::InvalidHeader(format!("{}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::InvalidHeader(format!("{}: {}", name, e)))?;
            default_headers.insert(header_name, header_value);
        }

        let mut http = reqwest::Client::builder();
        if let Some(ms) = self.timeout_ms {
            http = http.timeout(Duration::from_millis(ms));
        }
        let http = http.build()?;

        tracing::debug!("API client configured for {}", base_url);

        Ok(ApiClient {
            base_url,
            default_headers,
            token_provider: self.token_provider,
            http,
        })
    }
}

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiResult;

/// Response handed back to callers unchanged: status, headers and parsed body
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub data: Value,
}

impl ApiResponse {
    pub(crate) async fn from_response(response: reqwest::Response) -> ApiResult<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;

        Ok(Self {
            status,
            headers,
            data: parse_body(&text),
        })
    }

    /// Deserialize `data` into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    pub fn into_data(self) -> Value {
        self.data
    }
}

/// JSON when the body parses, the raw text otherwise, `null` when empty
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

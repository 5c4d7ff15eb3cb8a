use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, ApiResult};

/// One outgoing API call: method, path, query string and optional JSON body.
///
/// Built by the service groups and turned into a wire request by
/// [`ApiClient::prepare`](crate::ApiClient::prepare).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    /// Start a request for a fixed path such as `/trends/predicted`
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append one path segment taken from caller input.
    ///
    /// The value always stays a single segment: `/`, `?`, `#` and spaces are
    /// percent-encoded when the URL is built.
    pub fn segment(mut self, value: &str) -> Self {
        self.segments.push(value.to_string());
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add `key=value` once per item, in order
    pub fn query_all<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.query
                .push((key.to_string(), value.as_ref().to_string()));
        }
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Relative path before encoding, e.g. `/competitor-analysis/predict/Acme`
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Resolve against `base`, keeping the base path as a prefix
    pub fn url(&self, base: &Url) -> ApiResult<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(base.to_string()))?
            .pop_if_empty()
            .extend(&self.segments);

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(url)
    }
}

//! Content Platform API Client
//!
//! Async client for the AI content platform REST API. One [`ApiClient`] holds
//! the base URL, the default JSON headers and a [`TokenProvider`]; the four
//! service groups (content, competitor, strategy, trend) each map a method to
//! exactly one REST call.
//!
//! # Example
//!
//! ```rust,no_run
//! use content_platform_client::{ApiClient, LocalStore, StoredToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), content_platform_client::ApiError> {
//!     let store = LocalStore::open_default()?;
//!     let client = ApiClient::builder()
//!         .base_url("http://localhost:8080/api/v1")
//!         .token_provider(StoredToken::new(store))
//!         .build()?;
//!
//!     let response = client
//!         .competitor()
//!         .predict_competitor_moves("Acme", "retail")
//!         .await?;
//!     println!("{}: {}", response.status, response.data);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;

pub use auth::{FnToken, LocalStore, NoToken, StaticToken, StoredToken, TokenProvider};
pub use client::{
    ApiClient, ApiClientBuilder, CompetitorService, ContentService, StrategyService, TrendService,
};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use protocol::{ApiRequest, ApiResponse};

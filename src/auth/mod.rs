//! Bearer token providers
//!
//! The client asks its [`TokenProvider`] for the current token right before
//! each request is sent. Nothing is cached: rotating the token in the
//! underlying source takes effect on the next call.

pub mod store;

pub use store::{LocalStore, StoredToken, TOKEN_KEY};

use async_trait::async_trait;

use crate::error::ApiResult;

/// Source of the bearer token attached to outgoing requests
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` when the request should go out unauthenticated
    async fn token(&self) -> ApiResult<Option<String>>;
}

/// Never supplies a token
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

#[async_trait]
impl TokenProvider for NoToken {
    async fn token(&self) -> ApiResult<Option<String>> {
        Ok(None)
    }
}

/// Always supplies the same token
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: &str) -> Self {
        Self(token.to_string())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> ApiResult<Option<String>> {
        Ok(Some(self.0.clone()))
    }
}

/// Adapts a closure into a token provider
pub struct FnToken<F>(F);

impl<F> FnToken<F>
where
    F: Fn() -> Option<String> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> TokenProvider for FnToken<F>
where
    F: Fn() -> Option<String> + Send + Sync,
{
    async fn token(&self) -> ApiResult<Option<String>> {
        Ok((self.0)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_no_token() {
        assert_eq!(tokio_test::block_on(NoToken.token()).unwrap(), None);
    }

    #[test]
    fn test_static_token() {
        let provider = StaticToken::new("abc");
        assert_eq!(
            tokio_test::block_on(provider.token()).unwrap().as_deref(),
            Some("abc")
        );
    }

    #[tokio::test]
    async fn test_fn_token_is_called_every_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let provider = FnToken::new(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Some(format!("token-{}", n))
        });

        assert_eq!(provider.token().await.unwrap().as_deref(), Some("token-0"));
        assert_eq!(provider.token().await.unwrap().as_deref(), Some("token-1"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

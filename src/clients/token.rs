// src/clients/token.rs

use async_trait::async_trait;

use crate::common::error::AppError;

/// Source of the id token sent with every authenticated XCS call.
/// Awaited once per request, so implementations may refresh lazily.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn id_token(&self) -> Result<String, AppError>;
}

/// The token the dashboard forwarded in its own `Authorization` header.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the token itself.
impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[async_trait]
impl TokenProvider for BearerToken {
    async fn id_token(&self) -> Result<String, AppError> {
        if self.0.is_empty() {
            return Err(AppError::InvalidToken);
        }
        Ok(self.0.clone())
    }
}

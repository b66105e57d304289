// src/middleware/auth.rs

use std::{
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejection,
    TypedHeader,
};

use crate::{
    clients::{BearerToken, XcsClient, XcsSession},
    common::error::AppError,
};

/// The caller, as identified by the id token it forwarded.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub token: BearerToken,
    /// Stable, non-reversible key for the token. Scopes request sequencing
    /// and search debouncing to one viewer.
    pub viewer_key: String,
}

impl AuthenticatedUser {
    pub fn from_token(token: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);

        Self {
            token: BearerToken::new(token),
            viewer_key: format!("{:016x}", hasher.finish()),
        }
    }

    /// An XCS session that forwards this caller's token.
    pub fn session(&self, client: &XcsClient) -> XcsSession {
        client.session(Arc::new(self.token.clone()))
    }
}

// Rejects the request before it reaches a handler when there is no usable
// bearer token. The token itself is checked by the XCS API on every call.
pub async fn auth_guard(
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|_| AppError::InvalidToken)?;

    let token = bearer.token().trim();
    if token.is_empty() {
        return Err(AppError::InvalidToken);
    }

    request.extensions_mut().insert(AuthenticatedUser::from_token(token));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

//! Authenticated-identity extraction
//!
//! `AuthUser` is the gate in front of every protected route: handlers
//! that take it as an argument cannot run without a verified identity,
//! and the resolved user id is threaded into downstream calls as a
//! plain value rather than smuggled through mutable request state.
//!
//! Per request the path is: header present → exact `Bearer ` scheme →
//! token verifies → subject parses → subject row still exists. Any
//! failure short-circuits to the same generic 401; the precise cause is
//! only ever logged.

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;
use uuid::Uuid;

/// Authenticated user extracted from a bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Extract the token from an Authorization header value.
///
/// Only the exact `Bearer <token>` scheme is accepted; a different
/// scheme, casing, or a missing token counts as malformed.
pub fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                debug!("auth rejected: missing authorization header");
                ApiError::Unauthorized
            })?;

        let token = bearer_token(auth_header).ok_or_else(|| {
            debug!("auth rejected: not a bearer scheme");
            ApiError::Unauthorized
        })?;

        let claims = app_state.jwt().verify(token).map_err(|e| {
            debug!(kind = %e, "auth rejected: token verification failed");
            ApiError::Unauthorized
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            debug!("auth rejected: subject is not a valid user id");
            ApiError::Unauthorized
        })?;

        // A token outlives its account only until this check: deleted
        // accounts fail authentication even with an unexpired token.
        let user = UserRepository::find_by_id(app_state.db(), user_id).await?;
        if user.is_none() {
            debug!(%user_id, "auth rejected: subject no longer exists");
            return Err(ApiError::Unauthorized);
        }

        Ok(AuthUser { user_id })
    }
}

//! Authentication routes
//!
//! Registration and login both answer with a bearer token; there is no
//! separate session state and no server-side logout. Account deletion
//! is the only protected route in this group.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/account", delete(delete_account))
}

/// Credentials for registration and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Generic success message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new account
///
/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let token =
        UserService::register(state.db(), state.jwt(), &req.username, &req.password).await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Login with username and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = UserService::login(state.db(), state.jwt(), &req.username, &req.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// Delete the authenticated account and all of its todos
///
/// DELETE /api/auth/account
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    UserService::delete_account(state.db(), auth.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Account deleted".to_string(),
    }))
}

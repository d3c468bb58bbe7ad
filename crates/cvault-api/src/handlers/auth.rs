//! Login and token verification handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub expires_in: i64,
}

/// Exchange credentials for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let issued = state.auth.login(&request.username, &request.password)?;

    info!(user = %request.username, "Login succeeded");
    Ok(Json(LoginResponse {
        token: issued.token,
        username: request.username,
        expires_in: issued.expires_in_secs,
    }))
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
}

/// Confirm the presented token is still valid.
pub async fn verify(user: AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        username: user.username,
    })
}

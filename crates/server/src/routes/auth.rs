use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service::auth::{
    domain::{AuthUser, LoginInput},
    errors::AuthError,
};

use crate::{errors::JsonApiError, extract::ApiJson, state::AppState};

#[derive(Debug, Serialize)]
pub struct LoginOutput {
    pub success: bool,
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
pub struct LoginFailure {
    pub success: bool,
    pub message: String,
}

#[utoipa::path(
    post, path = "/api/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In", body = crate::openapi::LoginResponseDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::LoginFailureDoc)
    )
)]
pub async fn login(State(state): State<AppState>, ApiJson(input): ApiJson<LoginInput>) -> Response {
    match state.auth.login(input).await {
        Ok(session) => {
            Json(LoginOutput { success: true, token: session.token, user: session.user }).into_response()
        }
        Err(AuthError::Unauthorized) => (
            StatusCode::UNAUTHORIZED,
            Json(LoginFailure { success: false, message: "Invalid credentials".into() }),
        )
            .into_response(),
        Err(e) => JsonApiError::from(e).into_response(),
    }
}

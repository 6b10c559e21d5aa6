use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use potluck_core::{claim_username as engine_claim, Profile};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ClaimUsernameRequest {
    pub username: String,
}

#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "profiles",
    request_body = ClaimUsernameRequest,
    responses(
        (status = 200, description = "Profile created or renamed", body = Profile),
        (status = 400, description = "Invalid username", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn claim_username(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Json(request): Json<ClaimUsernameRequest>,
) -> impl IntoResponse {
    match engine_claim(&ctx.store, user_id, &request.username) {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

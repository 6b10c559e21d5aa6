use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use potluck_core::{create_cookbook as engine_create, Cookbook};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCookbookRequest {
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/cookbooks",
    tag = "cookbooks",
    request_body = CreateCookbookRequest,
    responses(
        (status = 201, description = "Private cookbook created", body = Cookbook),
        (status = 400, description = "Invalid request (empty name)", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_cookbook(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Json(request): Json<CreateCookbookRequest>,
) -> impl IntoResponse {
    match engine_create(&ctx.store, user_id, &request.name) {
        Ok(cookbook) => (StatusCode::CREATED, Json(cookbook)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

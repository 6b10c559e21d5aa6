use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{update_cookbook as engine_update, Cookbook, CookbookUpdate};
use uuid::Uuid;

#[utoipa::path(
    put,
    path = "/api/cookbooks/{id}",
    tag = "cookbooks",
    params(
        ("id" = Uuid, Path, description = "Cookbook ID")
    ),
    request_body = CookbookUpdate,
    responses(
        (status = 200, description = "Cookbook updated", body = Cookbook),
        (status = 400, description = "Invalid name or color, or cookbook is in the trash", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Cookbook not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_cookbook(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<CookbookUpdate>,
) -> impl IntoResponse {
    match engine_update(&ctx.store, user_id, id, update) {
        Ok(cookbook) => (StatusCode::OK, Json(cookbook)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{clone_recipe as engine_clone, Recipe};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/clone",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Source recipe ID")
    ),
    responses(
        (status = 201, description = "Private copy owned by the caller", body = Recipe),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn clone_recipe(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match engine_clone(&ctx.store, user_id, id) {
        Ok(copy) => (StatusCode::CREATED, Json(copy)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

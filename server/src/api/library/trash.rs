use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use potluck_core::{empty_trash as engine_empty, list_trash as engine_list, Recipe};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct TrashResponse {
    /// Most recently deleted first
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmptyTrashResponse {
    pub purged: usize,
}

#[utoipa::path(
    get,
    path = "/api/trash",
    tag = "library",
    responses(
        (status = 200, description = "Recipes in your trash", body = TrashResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_trash(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
) -> impl IntoResponse {
    match engine_list(&ctx.store, user_id) {
        Ok(recipes) => (StatusCode::OK, Json(TrashResponse { recipes })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/trash",
    tag = "library",
    responses(
        (status = 200, description = "Trash emptied", body = EmptyTrashResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn empty_trash(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
) -> impl IntoResponse {
    match engine_empty(&ctx.store, user_id) {
        Ok(purged) => (StatusCode::OK, Json(EmptyTrashResponse { purged })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

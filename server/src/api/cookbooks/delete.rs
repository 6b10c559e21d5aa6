use crate::api::{ApiError, ErrorResponse};
use crate::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use potluck_core::{
    purge_cookbook as engine_purge, restore_cookbook as engine_restore, soft_delete_cookbook,
    Cookbook,
};
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/cookbooks/{id}",
    tag = "cookbooks",
    params(
        ("id" = Uuid, Path, description = "Cookbook ID")
    ),
    responses(
        (status = 204, description = "Cookbook moved to the trash"),
        (status = 400, description = "Already in the trash", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Cookbook not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_cookbook(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match soft_delete_cookbook(&ctx.store, user_id, id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/cookbooks/{id}/restore",
    tag = "cookbooks",
    params(
        ("id" = Uuid, Path, description = "Cookbook ID")
    ),
    responses(
        (status = 200, description = "Cookbook restored as private", body = Cookbook),
        (status = 400, description = "Cookbook is not in the trash", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Cookbook not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn restore_cookbook(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match engine_restore(&ctx.store, user_id, id) {
        Ok(cookbook) => (StatusCode::OK, Json(cookbook)).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/cookbooks/{id}/purge",
    tag = "cookbooks",
    params(
        ("id" = Uuid, Path, description = "Cookbook ID")
    ),
    responses(
        (status = 204, description = "Cookbook and its membership links permanently deleted"),
        (status = 400, description = "Cookbook is not in the trash", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Cookbook not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn purge_cookbook(
    AuthUser(user_id): AuthUser,
    State(ctx): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match engine_purge(&ctx.store, user_id, id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
